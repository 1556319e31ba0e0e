use gapdash::query::slice_by_year;
use gapdash::stats::{continent_summary, summarize};
use gapdash::{Continent, Dataset, Metric};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/gapminder_sample.csv");

#[test]
fn continent_summaries_are_ordered_and_complete() {
    let ds = Dataset::load_csv(FIXTURE).unwrap();
    let got = continent_summary(&ds, 1952, Metric::LifeExpectancy);
    let order: Vec<Continent> = got.iter().map(|s| s.continent).collect();
    assert_eq!(order, Continent::ALL);

    let oceania = got.iter().find(|s| s.continent == Continent::Oceania).unwrap();
    assert_eq!(oceania.summary.count, 2);
    assert_eq!(oceania.summary.min, 69.12);
    assert_eq!(oceania.summary.max, 69.39);
    assert!((oceania.summary.median - 69.255).abs() < 1e-9);
    assert!((oceania.summary.mean - 69.255).abs() < 1e-9);

    let asia = got.iter().find(|s| s.continent == Continent::Asia).unwrap();
    assert_eq!(asia.summary.count, 19);
    assert_eq!(asia.summary.min, 28.801);
}

#[test]
fn odd_count_median_and_empty_rows() {
    let ds = Dataset::load_csv(FIXTURE).unwrap();
    let africa: Vec<_> = slice_by_year(&ds, 2007)
        .into_iter()
        .filter(|r| r.continent == Continent::Africa)
        .collect();
    let s = summarize(&africa, Metric::LifeExpectancy).unwrap();
    assert_eq!(s.count, 3);
    assert_eq!(s.median, 54.11);
    assert!(summarize(&[], Metric::Population).is_none());
    assert!(continent_summary(&ds, 1800, Metric::Population).is_empty());
}
