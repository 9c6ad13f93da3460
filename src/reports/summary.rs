//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable overview for terminal usage.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator, ReportSection};
use crate::engine::{Assessment, RiskLevel};
use crate::model::EmissionCategory;

/// Apply ANSI color formatting if colored output is enabled.
pub(crate) fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Terminal color for a risk level
pub(crate) const fn risk_color(risk: RiskLevel) -> &'static str {
    match risk {
        RiskLevel::Low => "green",
        RiskLevel::Medium => "yellow",
        RiskLevel::High => "red",
    }
}

/// Width of the proportional bar drawn for each category
const BAR_WIDTH: usize = 20;

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn push_breakdown(&self, lines: &mut Vec<String>, a: &Assessment) {
        lines.push(String::new());
        lines.push(self.color("Emissions by category:", "bold"));
        let total = a.personal_current;
        for category in EmissionCategory::ALL {
            let value = a.breakdown.get(category);
            let share = if total > 0.0 { value / total } else { 0.0 };
            let filled = (share * BAR_WIDTH as f64).round() as usize;
            lines.push(format!(
                "  {:<12} {:>6.2} t  {}{}",
                category.name(),
                value,
                self.color(&"█".repeat(filled.min(BAR_WIDTH)), "cyan"),
                self.color(&"░".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)), "dim"),
            ));
        }
    }

    fn push_trajectory(&self, lines: &mut Vec<String>, a: &Assessment) {
        lines.push(String::new());
        lines.push(self.color("Ten-year outlook:", "bold"));
        let (Some(first_year), Some(last_year)) = (a.years.first(), a.years.last()) else {
            return;
        };
        let bau = a.original.last().copied().unwrap_or_default();
        let adjusted = a.adjusted.last().copied().unwrap_or_default();
        lines.push(format!(
            "  {}  {bau:.2} t by {last_year}",
            self.color("Business as usual:", "cyan"),
        ));
        lines.push(format!(
            "  {}  {adjusted:.2} t by {last_year} ({}% reduction from {first_year})",
            self.color("With reduction:   ", "cyan"),
            a.reduction_scenario,
        ));
    }

    fn push_costs(&self, lines: &mut Vec<String>, a: &Assessment) {
        let cost = &a.cost_analysis;
        lines.push(String::new());
        lines.push(self.color("Carbon cost:", "bold"));
        lines.push(format!(
            "  {}  ${} per year at ${}/t",
            self.color("Current:", "cyan"),
            cost.current_annual_cost,
            cost.carbon_price
        ));
        lines.push(format!(
            "  {}  ${} per year (solar ${}, transport ${}, efficiency ${})",
            self.color("Potential savings:", "cyan"),
            self.color(&cost.potential_savings.to_string(), "green"),
            cost.solar_savings,
            cost.transport_savings,
            cost.efficiency_savings
        ));
        lines.push(format!(
            "  {}  ${} and {:.1} t CO2 over ten years",
            self.color("Ten-year impact:", "cyan"),
            cost.ten_year_savings,
            cost.ten_year_reduction
        ));
    }

    fn push_recommendations(&self, lines: &mut Vec<String>, a: &Assessment) {
        lines.push(String::new());
        lines.push(self.color("Recommendations:", "bold"));
        if a.recommendations.is_empty() {
            lines.push(format!("  {}", self.color("None for this profile", "dim")));
            return;
        }
        for (i, rec) in a.recommendations.iter().enumerate() {
            let roi = if rec.is_no_investment() {
                self.color("no investment", "green")
            } else {
                format!("ROI {}%", rec.roi)
            };
            lines.push(format!("  {}. {}", i + 1, self.color(&rec.title, "bold")));
            lines.push(format!(
                "     -{:.1} t/yr, saves ${}/yr, invest ${}, payback {}, {}",
                rec.carbon_reduction, rec.annual_savings, rec.investment, rec.payback_period, roi
            ));
        }
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(
        &self,
        assessment: &Assessment,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let a = assessment;
        let mut lines = Vec::new();

        // Header
        lines.push(self.color(config.title_or("Carbon Footprint Summary"), "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        let country = if a.country.is_empty() {
            "default".to_string()
        } else if a.country_matched {
            a.country.clone()
        } else {
            format!("{} (using default baseline)", a.country)
        };
        lines.push(format!("{}  {}", self.color("Country:", "cyan"), country));
        lines.push(format!(
            "{}  {:.2} t CO2/year",
            self.color("Footprint:", "cyan"),
            a.personal_current
        ));
        lines.push(format!(
            "{}  {:.2} t CO2/year ({}% of average)",
            self.color("Country average:", "cyan"),
            a.country_avg,
            a.percent_of_average()
        ));
        lines.push(format!(
            "{}  {}",
            self.color("Risk:", "cyan"),
            self.color(a.risk.name(), risk_color(a.risk))
        ));

        if config.includes(ReportSection::Breakdown) {
            self.push_breakdown(&mut lines, a);
        }
        if config.includes(ReportSection::Trajectory) {
            self.push_trajectory(&mut lines, a);
        }
        if config.includes(ReportSection::Costs) {
            self.push_costs(&mut lines, a);
        }
        if config.includes(ReportSection::Recommendations) {
            self.push_recommendations(&mut lines, a);
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}
