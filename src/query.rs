//! Pure filter/sort/truncate operations over the dataset.

use crate::dataset::Dataset;
use crate::models::{Continent, FilterCriteria, Metric, Record};

/// Maximum number of rows in a ranking.
pub const TOP_N: usize = 15;

/// Top rows of one continent in one year, ordered by `metric` descending.
pub type RankedSubset<'a> = Vec<&'a Record>;

/// Rank the rows matching `continent` and `year` exactly.
///
/// Ties keep dataset order. An unmatched filter yields an empty subset.
pub fn rank<'a>(
    dataset: &'a Dataset,
    continent: Continent,
    year: i32,
    metric: Metric,
) -> RankedSubset<'a> {
    let mut rows: Vec<&Record> = dataset
        .records()
        .iter()
        .filter(|r| r.continent == continent && r.year == year)
        .collect();
    // sort_by is stable
    rows.sort_by(|a, b| metric.value(b).total_cmp(&metric.value(a)));
    rows.truncate(TOP_N);
    rows
}

/// All rows of one year, in dataset order.
pub fn slice_by_year(dataset: &Dataset, year: i32) -> Vec<&Record> {
    dataset.records().iter().filter(|r| r.year == year).collect()
}

/// Apply a panel's criteria: ranking panels rank, the map panel slices.
pub fn select<'a>(dataset: &'a Dataset, criteria: &FilterCriteria) -> Vec<&'a Record> {
    match *criteria {
        FilterCriteria::Ranking {
            continent,
            year,
            metric,
        } => rank(dataset, continent, year, metric),
        FilterCriteria::Map { year, .. } => slice_by_year(dataset, year),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(country: &str, continent: Continent, year: i32, pop: f64) -> Record {
        Record {
            country: country.into(),
            continent,
            year,
            life_exp: 50.0,
            pop,
            gdp_percap: 1000.0,
            iso_alpha: country[..3].to_ascii_uppercase(),
            iso_num: None,
        }
    }

    #[test]
    fn ties_keep_insertion_order() {
        let ds = Dataset::from_records(vec![
            rec("Alpha", Continent::Asia, 2000, 5.0),
            rec("Bravo", Continent::Asia, 2000, 7.0),
            rec("Charlie", Continent::Asia, 2000, 5.0),
            rec("Delta", Continent::Asia, 2000, 5.0),
        ])
        .unwrap();
        let names: Vec<&str> = rank(&ds, Continent::Asia, 2000, Metric::Population)
            .iter()
            .map(|r| r.country.as_str())
            .collect();
        assert_eq!(names, ["Bravo", "Alpha", "Charlie", "Delta"]);
    }

    #[test]
    fn truncates_to_top_n() {
        let rows = (0..20)
            .map(|i| rec(&format!("Country{i:02}"), Continent::Africa, 1990, i as f64))
            .collect();
        let ds = Dataset::from_records(rows).unwrap();
        let ranked = rank(&ds, Continent::Africa, 1990, Metric::Population);
        assert_eq!(ranked.len(), TOP_N);
        assert_eq!(ranked[0].country, "Country19");
        assert_eq!(ranked[TOP_N - 1].country, "Country05");
    }

    #[test]
    fn no_nearest_year_fallback() {
        let ds = Dataset::from_records(vec![rec("Alpha", Continent::Asia, 2000, 1.0)]).unwrap();
        assert!(rank(&ds, Continent::Asia, 2001, Metric::Population).is_empty());
        assert!(slice_by_year(&ds, 1999).is_empty());
    }
}
