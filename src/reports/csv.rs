//! CSV report generator.
//!
//! Emits one `Section,Item,Value` row per figure, suitable for spreadsheet
//! import and data analysis pipelines.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator, ReportSection};
use crate::engine::Assessment;
use crate::model::EmissionCategory;

/// CSV report generator.
pub struct CsvReporter;

impl CsvReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for CsvReporter {
    fn generate(
        &self,
        assessment: &Assessment,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let a = assessment;
        let mut content = String::new();
        content.push_str("Section,Item,Value\n");

        push_row(&mut content, "Profile", "Country", &a.country);
        push_row(&mut content, "Profile", "Country Matched", &a.country_matched.to_string());
        push_row(&mut content, "Profile", "Footprint", &format!("{:.2}", a.personal_current));
        push_row(&mut content, "Profile", "Country Average", &a.country_avg.to_string());
        push_row(&mut content, "Profile", "Risk", a.risk.name());
        push_row(&mut content, "Profile", "Reduction Target", &a.reduction_scenario.to_string());

        if config.includes(ReportSection::Breakdown) {
            for category in EmissionCategory::ALL {
                push_row(
                    &mut content,
                    "Breakdown",
                    category.name(),
                    &format!("{:.2}", a.breakdown.get(category)),
                );
            }
        }

        if config.includes(ReportSection::Trajectory) {
            for ((year, original), adjusted) in a.years.iter().zip(&a.original).zip(&a.adjusted) {
                push_row(
                    &mut content,
                    "Business As Usual",
                    &year.to_string(),
                    &format!("{original:.2}"),
                );
                push_row(
                    &mut content,
                    "With Reduction",
                    &year.to_string(),
                    &format!("{adjusted:.2}"),
                );
            }
        }

        if config.includes(ReportSection::Costs) {
            let cost = &a.cost_analysis;
            for (item, value) in [
                ("Carbon Price", cost.carbon_price.to_string()),
                ("Transport Cost", cost.transport_cost.to_string()),
                ("Electricity Cost", cost.electricity_cost.to_string()),
                ("Food Cost", cost.food_cost.to_string()),
                ("Waste Cost", cost.waste_cost.to_string()),
                ("Current Annual Cost", cost.current_annual_cost.to_string()),
                ("Solar Savings", cost.solar_savings.to_string()),
                ("Transport Savings", cost.transport_savings.to_string()),
                ("Efficiency Savings", cost.efficiency_savings.to_string()),
                ("Potential Savings", cost.potential_savings.to_string()),
                ("Ten Year Savings", cost.ten_year_savings.to_string()),
                ("Ten Year Reduction", format!("{:.1}", cost.ten_year_reduction)),
            ] {
                push_row(&mut content, "Costs", item, &value);
            }
        }

        if config.includes(ReportSection::Recommendations) {
            content.push_str("\n# Recommendations\n");
            content.push_str(
                "Rank,Title,Category,Annual Savings,Carbon Reduction,Investment,Payback,ROI\n",
            );
            for (i, rec) in a.recommendations.iter().enumerate() {
                content.push_str(&format!(
                    "{},\"{}\",{},{},{:.1},{},\"{}\",{}\n",
                    i + 1,
                    escape_csv(&rec.title),
                    rec.category,
                    rec.annual_savings,
                    rec.carbon_reduction,
                    rec.investment,
                    escape_csv(&rec.payback_period),
                    rec.roi
                ));
            }
        }

        Ok(content)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }
}

fn push_row(content: &mut String, section: &str, item: &str, value: &str) {
    content.push_str(&format!(
        "{},\"{}\",\"{}\"\n",
        section,
        escape_csv(item),
        escape_csv(value)
    ));
}

/// Escape a string for CSV embedding: double-quote escaping per RFC 4180,
/// plus newline flattening since fields are already wrapped in double quotes.
fn escape_csv(s: &str) -> String {
    s.replace('"', "\"\"").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawInput;

    fn assessment() -> Assessment {
        crate::engine::assess(
            &RawInput::new()
                .with("country", "sweden")
                .with("distance", "20")
                .with("electricity", "300")
                .with("waste", "10"),
        )
        .unwrap()
    }

    #[test]
    fn test_csv_rows() {
        let csv = CsvReporter::new()
            .generate(&assessment(), &ReportConfig::default())
            .unwrap();
        assert!(csv.starts_with("Section,Item,Value\n"));
        assert!(csv.contains("Profile,\"Risk\",\"High\""));
        assert!(csv.contains("Breakdown,\"Transport\",\"0.88\""));
        assert!(csv.contains("With Reduction,\"2025\",\"4.78\""));
        assert!(csv.contains("Costs,\"Current Annual Cost\",\"425\""));
        assert!(csv.contains("1,\"Negotiate Remote Work 2 Days/Week\",Transport,340,0.4,200,\"3 weeks\",1700"));
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("say \"hi\""), "say \"\"hi\"\"");
        assert_eq!(escape_csv("a\nb"), "a b");
    }
}
