//! Markdown report generator.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator, ReportSection};
use crate::engine::Assessment;
use crate::model::EmissionCategory;
use std::fmt::Write;

/// Markdown report generator
pub struct MarkdownReporter {
    /// Include the description paragraph under each recommendation
    include_descriptions: bool,
}

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            include_descriptions: true,
        }
    }

    /// Omit recommendation descriptions
    #[must_use]
    pub const fn compact(mut self) -> Self {
        self.include_descriptions = false;
        self
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(
        &self,
        assessment: &Assessment,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let a = assessment;
        let mut md = String::new();

        writeln!(md, "# {}", config.title_or("Carbon Footprint Report"))?;
        writeln!(md)?;
        writeln!(md, "| Metric | Value |")?;
        writeln!(md, "|--------|-------|")?;
        let country = if a.country.is_empty() { "default" } else { a.country.as_str() };
        writeln!(md, "| Country | {} |", escape_markdown_table(country))?;
        writeln!(md, "| Footprint | {:.2} t CO2/year |", a.personal_current)?;
        writeln!(md, "| Country average | {:.2} t CO2/year |", a.country_avg)?;
        writeln!(md, "| Risk | **{}** |", a.risk)?;
        writeln!(md, "| Reduction target | {}% |", a.reduction_scenario)?;
        if !a.country_matched {
            writeln!(md)?;
            writeln!(
                md,
                "> No baseline for this country; default reference values were used."
            )?;
        }

        if config.includes(ReportSection::Breakdown) {
            writeln!(md)?;
            writeln!(md, "## Emissions by Category")?;
            writeln!(md)?;
            writeln!(md, "| Category | Tonnes CO2/year |")?;
            writeln!(md, "|----------|----------------:|")?;
            for category in EmissionCategory::ALL {
                writeln!(md, "| {} | {:.2} |", category, a.breakdown.get(category))?;
            }
        }

        if config.includes(ReportSection::Trajectory) {
            writeln!(md)?;
            writeln!(md, "## Ten-Year Projection")?;
            writeln!(md)?;
            writeln!(md, "| Year | Business as usual | With reduction |")?;
            writeln!(md, "|------|------------------:|---------------:|")?;
            for ((year, original), adjusted) in a.years.iter().zip(&a.original).zip(&a.adjusted) {
                writeln!(md, "| {year} | {original:.2} | {adjusted:.2} |")?;
            }
        }

        if config.includes(ReportSection::Costs) {
            let cost = &a.cost_analysis;
            writeln!(md)?;
            writeln!(md, "## Carbon Cost")?;
            writeln!(md)?;
            writeln!(md, "Carbon price: ${}/t", cost.carbon_price)?;
            writeln!(md)?;
            writeln!(md, "| Item | USD/year |")?;
            writeln!(md, "|------|---------:|")?;
            writeln!(md, "| Transport | {} |", cost.transport_cost)?;
            writeln!(md, "| Electricity | {} |", cost.electricity_cost)?;
            writeln!(md, "| Food | {} |", cost.food_cost)?;
            writeln!(md, "| Waste | {} |", cost.waste_cost)?;
            writeln!(md, "| **Total** | **{}** |", cost.current_annual_cost)?;
            writeln!(md, "| Solar savings | {} |", cost.solar_savings)?;
            writeln!(md, "| Transport savings | {} |", cost.transport_savings)?;
            writeln!(md, "| Efficiency savings | {} |", cost.efficiency_savings)?;
            writeln!(md, "| **Potential savings** | **{}** |", cost.potential_savings)?;
            writeln!(md)?;
            writeln!(
                md,
                "Over ten years: ${} saved and {:.1} t CO2 avoided.",
                cost.ten_year_savings, cost.ten_year_reduction
            )?;
        }

        if config.includes(ReportSection::Recommendations) {
            writeln!(md)?;
            writeln!(md, "## Recommendations")?;
            writeln!(md)?;
            if a.recommendations.is_empty() {
                writeln!(md, "_No recommendations for this profile._")?;
            }
            for (i, rec) in a.recommendations.iter().enumerate() {
                writeln!(md, "{}. **{}**", i + 1, rec.title)?;
                if self.include_descriptions {
                    writeln!(md, "   {}", rec.description)?;
                }
                let roi = if rec.is_no_investment() {
                    "no investment".to_string()
                } else {
                    format!("{}% ROI", rec.roi)
                };
                writeln!(
                    md,
                    "   - Cuts {:.1} t CO2/year, saves ${}/year, costs ${} upfront, payback {} ({})",
                    rec.carbon_reduction, rec.annual_savings, rec.investment, rec.payback_period, roi
                )?;
            }
        }

        Ok(md)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }
}

/// Escape a string for a Markdown table cell.
fn escape_markdown_table(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '|' => result.push_str("\\|"),
            '\n' => result.push(' '),
            '\r' => {}
            '`' => result.push_str("\\`"),
            _ => result.push(c),
        }
    }
    result
}
