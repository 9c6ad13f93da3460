//! Core data types shared by the assessment engine.
//!
//! - [`RawInput`]: the flat string-keyed record collected by a front end
//! - [`InputProfile`]: the normalized, typed form of that record
//! - [`EmissionCategory`]: the four lifestyle categories in their fixed order

mod category;
pub mod input;

pub use category::EmissionCategory;
pub use input::{
    InputProfile, RangePolicy, RawInput, DEFAULT_MEALS, DEFAULT_REDUCTION, MAX_QUANTITY,
};
