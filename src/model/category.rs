//! Emission categories.

use serde::{Deserialize, Serialize};

/// Lifestyle category an emission figure belongs to.
///
/// The declaration order is significant: it is the enumeration order used
/// for tie-breaks when picking the top-emitting category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EmissionCategory {
    Transport,
    Electricity,
    Food,
    Waste,
}

impl EmissionCategory {
    /// All categories in enumeration order.
    pub const ALL: [Self; 4] = [Self::Transport, Self::Electricity, Self::Food, Self::Waste];

    /// Display name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Transport => "Transport",
            Self::Electricity => "Electricity",
            Self::Food => "Food",
            Self::Waste => "Waste",
        }
    }
}

impl std::fmt::Display for EmissionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
