use gapdash::query::{TOP_N, rank, select, slice_by_year};
use gapdash::{Continent, Dataset, FilterCriteria, Metric};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/gapminder_sample.csv");

fn dataset() -> Dataset {
    Dataset::load_csv(FIXTURE).expect("fixture loads")
}

#[test]
fn asia_1952_population_top_15() {
    let ds = dataset();
    let rows = rank(&ds, Continent::Asia, 1952, Metric::Population);
    assert_eq!(rows.len(), TOP_N);
    assert!(rows.iter().all(|r| r.continent == Continent::Asia && r.year == 1952));
    for pair in rows.windows(2) {
        assert!(pair[0].pop >= pair[1].pop);
    }
    let names: Vec<&str> = rows.iter().take(4).map(|r| r.country.as_str()).collect();
    assert_eq!(names, ["China", "India", "Japan", "Indonesia"]);
    assert_eq!(rows[0].pop, 556_263_527.0);
    // 19 Asian countries in the fixture; the four smallest drop out
    assert_eq!(rows[TOP_N - 1].country, "Taiwan");
    assert!(!rows.iter().any(|r| r.country == "Afghanistan"));
}

#[test]
fn europe_2007_life_expectancy_has_fewer_than_15() {
    let ds = dataset();
    let rows = rank(&ds, Continent::Europe, 2007, Metric::LifeExpectancy);
    let names: Vec<&str> = rows.iter().map(|r| r.country.as_str()).collect();
    assert_eq!(
        names,
        [
            "Iceland",
            "Switzerland",
            "Spain",
            "Sweden",
            "France",
            "Italy",
            "Norway",
            "Germany"
        ]
    );
    assert_eq!(rows[0].life_exp, 81.757);
}

#[test]
fn unmatched_filter_is_empty() {
    let ds = dataset();
    assert!(rank(&ds, Continent::Asia, 1953, Metric::Population).is_empty());

    let asia_only: Vec<_> = ds
        .records()
        .iter()
        .filter(|r| r.continent == Continent::Asia)
        .cloned()
        .collect();
    let asia = Dataset::from_records(asia_only).unwrap();
    assert!(rank(&asia, Continent::Europe, 1952, Metric::Population).is_empty());
}

#[test]
fn map_slice_keeps_every_country_of_the_year() {
    let ds = dataset();
    let slice = slice_by_year(&ds, 2007);
    assert_eq!(slice.len(), 35);
    assert!(slice.iter().all(|r| r.year == 2007));

    let via_criteria = select(
        &ds,
        &FilterCriteria::Map {
            metric: Metric::GdpPerCapita,
            year: 2007,
        },
    );
    assert_eq!(via_criteria, slice);
}

#[test]
fn oceania_gdp_ranking_follows_metric_not_population() {
    let ds = dataset();
    let by_gdp = rank(&ds, Continent::Oceania, 1952, Metric::GdpPerCapita);
    let by_pop = rank(&ds, Continent::Oceania, 1952, Metric::Population);
    assert_eq!(by_gdp[0].country, "New Zealand");
    assert_eq!(by_pop[0].country, "Australia");
}
