#![no_main]
use footprint_tools::forecast::{CountryTrend, HistoricalDataset};
use libfuzzer_sys::fuzz_target;

/// Fuzz the CSV dataset reader and the trend statistics.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(dataset) = HistoricalDataset::from_csv_str(s) {
            let mut grouped = 0;
            for country in dataset.countries() {
                let records = dataset.country(country);
                assert!(records.windows(2).all(|w| w[0].year <= w[1].year));
                grouped += records.len();
                let _ = CountryTrend::analyze(records);
            }
            assert_eq!(grouped, dataset.len());
        }
    }
});
