//! End-to-end assessment tests through the public library API.
//!
//! These tests exercise normalization, emissions, risk, trajectory, cost and
//! recommendation stages together, plus every report format.

use footprint_tools::reports::{create_reporter_with_options, ReportConfig};
use footprint_tools::{
    assess, Assessor, EmissionCategory, FootprintError, RangePolicy, RawInput, ReportFormat,
    RiskLevel,
};

fn example_profile() -> RawInput {
    RawInput::new()
        .with("country", "sweden")
        .with("distance", "20")
        .with("electricity", "300")
        .with("meals", "3")
        .with("waste", "10")
        .with("renewable", "0")
        .with("reduction", "10")
}

// ============================================================================
// Reference scenarios
// ============================================================================

mod scenarios {
    use super::*;

    #[test]
    fn reference_household() {
        let a = assess(&example_profile()).expect("assessment should succeed");

        assert_eq!(a.breakdown.get(EmissionCategory::Transport), 0.88);
        assert_eq!(a.breakdown.get(EmissionCategory::Electricity), 1.44);
        assert_eq!(a.breakdown.get(EmissionCategory::Food), 2.74);
        assert_eq!(a.breakdown.get(EmissionCategory::Waste), 0.26);
        assert_eq!(a.personal_current, 5.31);
        assert_eq!(a.country_avg, 3.4);
        assert_eq!(a.risk, RiskLevel::High);
        assert_eq!(a.years.first(), Some(&2025));
        assert_eq!(a.years.last(), Some(&2034));
        assert_eq!(a.original[0], 5.31);
        assert_eq!(a.adjusted[0], 4.78);
        assert_eq!(a.breakdown.top_category(), EmissionCategory::Food);
    }

    #[test]
    fn unknown_country_falls_back_to_default() {
        let a = assess(&example_profile().with("country", "Atlantis")).unwrap();
        assert!(!a.country_matched);
        assert_eq!(a.country_avg, 4.5);
        assert_eq!(a.cost_analysis.carbon_price, 50.0);
        assert_eq!(a.risk, RiskLevel::Medium);
    }

    #[test]
    fn fully_renewable_electricity_has_no_emissions() {
        let a = assess(&example_profile().with("renewable", "100")).unwrap();
        assert_eq!(a.breakdown.electricity, 0.0);
        assert_eq!(a.personal_current, 3.87);
    }

    #[test]
    fn empty_profile_only_counts_default_meals() {
        let a = assess(&RawInput::new().with("country", "sweden")).unwrap();
        assert_eq!(a.breakdown.transport, 0.0);
        assert_eq!(a.breakdown.electricity, 0.0);
        assert_eq!(a.breakdown.food, 2.74);
        assert_eq!(a.breakdown.waste, 0.0);
        assert_eq!(a.risk, RiskLevel::Low);
    }

    #[test]
    fn country_name_is_case_and_space_insensitive() {
        let a = assess(&example_profile().with("country", "  SWEDEN ")).unwrap();
        assert!(a.country_matched);
        assert_eq!(a.country, "sweden");
        assert_eq!(a.country_avg, 3.4);
    }

    #[test]
    fn blank_fields_take_defaults() {
        let a = assess(&example_profile().with("meals", "").with("reduction", " ")).unwrap();
        assert_eq!(a.breakdown.food, 2.74);
        assert_eq!(a.reduction_scenario, 10.0);
    }
}

// ============================================================================
// Trajectory
// ============================================================================

mod trajectory {
    use super::*;

    #[test]
    fn full_reduction_zeroes_adjusted_path() {
        let a = assess(&example_profile().with("reduction", "100")).unwrap();
        assert_eq!(a.adjusted.len(), 10);
        assert!(a.adjusted.iter().all(|v| *v == 0.0));
        assert!(a.original.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn zero_reduction_starts_on_business_as_usual() {
        let a = assess(&example_profile().with("reduction", "0")).unwrap();
        assert_eq!(a.adjusted[0], a.original[0]);
        assert!(a.adjusted.windows(2).all(|w| w[1] < w[0]));
    }
}

// ============================================================================
// Input errors
// ============================================================================

mod input_errors {
    use super::*;

    #[test]
    fn negative_quantity_is_rejected() {
        let err = assess(&example_profile().with("distance", "-5")).unwrap_err();
        match err {
            FootprintError::InvalidInput { field, .. } => assert_eq!(field, "distance"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_value_is_rejected() {
        let err = assess(&example_profile().with("waste", "some")).unwrap_err();
        assert!(err.is_input_error());
        assert!(err.to_string().contains("waste"));
    }

    #[test]
    fn out_of_range_percentage_depends_on_policy() {
        let raw = example_profile().with("renewable", "120");
        assert!(assess(&raw).is_err());

        let a = Assessor::new()
            .with_range_policy(RangePolicy::Clamp)
            .assess(&raw)
            .unwrap();
        assert_eq!(a.breakdown.electricity, 0.0);
    }

    #[test]
    fn oversized_quantity_is_rejected_without_panicking() {
        for text in ["1e20", "1e308"] {
            let raw = RawInput::new().with("distance", text);
            let result = std::panic::catch_unwind(|| assess(&raw));
            match result {
                Ok(Err(FootprintError::InvalidInput { field, .. })) => {
                    assert_eq!(field, "distance");
                }
                Ok(other) => panic!("expected InvalidInput for {text}, got {other:?}"),
                Err(_) => panic!("assessing distance={text} panicked"),
            }
        }
    }

    #[test]
    fn largest_accepted_profile_round_trips_through_json() {
        let max = footprint_tools::model::MAX_QUANTITY.to_string();
        let raw = RawInput::new()
            .with("distance", max.as_str())
            .with("electricity", max.as_str())
            .with("meals", max.as_str())
            .with("waste", max.as_str());
        let a = assess(&raw).unwrap();
        assert!(a.personal_current.is_finite());
        assert!(a.cost_analysis.current_annual_cost > 0);

        let report = create_reporter_with_options(ReportFormat::Json, false)
            .generate(&a, &ReportConfig::default())
            .unwrap();
        let parsed: footprint_tools::Assessment = serde_json::from_str(&report).unwrap();
        assert_eq!(
            parsed.cost_analysis.current_annual_cost,
            a.cost_analysis.current_annual_cost
        );
        assert_eq!(parsed.cost_analysis.roi_scenarios, a.cost_analysis.roi_scenarios);
    }
}

// ============================================================================
// Recommendations
// ============================================================================

mod recommendations {
    use super::*;

    fn profiles() -> Vec<RawInput> {
        vec![
            example_profile(),
            example_profile().with("distance", "80").with("electricity", "900"),
            example_profile().with("renewable", "60").with("reduction", "40"),
            RawInput::new().with("waste", "40").with("meals", "5"),
            RawInput::new(),
        ]
    }

    #[test]
    fn at_most_five_and_no_investment_last() {
        for raw in profiles() {
            let a = assess(&raw).unwrap();
            assert!(a.recommendations.len() <= 5);
            let first_free = a
                .recommendations
                .iter()
                .position(|r| r.is_no_investment())
                .unwrap_or(a.recommendations.len());
            assert!(
                a.recommendations[first_free..]
                    .iter()
                    .all(|r| r.is_no_investment()),
                "zero-ROI recommendation ranked before a paying one"
            );
        }
    }

    #[test]
    fn paying_recommendations_sorted_by_roi() {
        for raw in profiles() {
            let a = assess(&raw).unwrap();
            let rois: Vec<u32> = a
                .recommendations
                .iter()
                .filter(|r| !r.is_no_investment())
                .map(|r| r.roi)
                .collect();
            assert!(rois.windows(2).all(|w| w[0] >= w[1]), "{rois:?}");
        }
    }
}

// ============================================================================
// Reports
// ============================================================================

mod reports {
    use super::*;

    #[test]
    fn every_format_renders() {
        let a = assess(&example_profile()).unwrap();
        for format in [
            ReportFormat::Summary,
            ReportFormat::Json,
            ReportFormat::Markdown,
            ReportFormat::Csv,
        ] {
            let reporter = create_reporter_with_options(format, false);
            let report = reporter
                .generate(&a, &ReportConfig::default())
                .expect("report should render");
            assert!(!report.is_empty(), "{format} report is empty");
            assert!(report.contains("5.31"), "{format} report lacks the total");
        }
    }

    #[test]
    fn json_report_keeps_envelope_fields() {
        let a = assess(&example_profile()).unwrap();
        let report = create_reporter_with_options(ReportFormat::Json, false)
            .generate(&a, &ReportConfig::default())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(value["personal_current"], 5.31);
        assert_eq!(value["risk"], "High");
        assert_eq!(value["cost_analysis"]["current_annual_cost"], 425);
        assert_eq!(value["recommendations"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn summary_without_color_has_no_escape_codes() {
        let a = assess(&example_profile()).unwrap();
        let report = create_reporter_with_options(ReportFormat::Summary, false)
            .generate(&a, &ReportConfig::default())
            .unwrap();
        assert!(!report.contains('\x1b'));
    }
}
