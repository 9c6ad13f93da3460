#![no_main]
use footprint_tools::model::{InputProfile, RangePolicy};
use footprint_tools::pipeline::parse_input_str;
use footprint_tools::Assessor;
use libfuzzer_sys::fuzz_target;

/// Fuzz input parsing, normalization and assessment.
///
/// Arbitrary text goes through the JSON / key=value reader, both range
/// policies, and a full assessment whenever normalization succeeds. Nothing
/// on this path may panic, and a normalized profile always assesses.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(raw) = parse_input_str(s) {
            for policy in [RangePolicy::Reject, RangePolicy::Clamp] {
                if InputProfile::from_raw(&raw, policy).is_ok() {
                    let assessment = Assessor::new().with_range_policy(policy).assess(&raw);
                    assert!(assessment.is_ok(), "{assessment:?}");
                }
            }
        }
    }
});
