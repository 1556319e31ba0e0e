use crate::dataset::Dataset;
use crate::models::{Continent, Metric, Record};
use crate::query::slice_by_year;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary statistics of one metric over a set of rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub metric: Metric,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

/// Per-continent summary for one year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContinentSummary {
    pub continent: Continent,
    pub year: i32,
    pub summary: Summary,
}

/// Summarize `metric` over `rows`. `None` when there are no rows.
pub fn summarize(rows: &[&Record], metric: Metric) -> Option<Summary> {
    let mut vals: Vec<f64> = rows.iter().map(|r| metric.value(r)).collect();
    if vals.is_empty() {
        return None;
    }
    vals.sort_by(f64::total_cmp);
    let count = vals.len();
    let mean = vals.iter().sum::<f64>() / count as f64;
    let median = if count % 2 == 1 {
        vals[count / 2]
    } else {
        (vals[count / 2 - 1] + vals[count / 2]) / 2.0
    };
    Some(Summary {
        metric,
        count,
        min: vals[0],
        max: vals[count - 1],
        mean,
        median,
    })
}

/// Summaries of `metric` per continent for `year`, ordered by continent.
pub fn continent_summary(dataset: &Dataset, year: i32, metric: Metric) -> Vec<ContinentSummary> {
    let mut groups: BTreeMap<Continent, Vec<&Record>> = BTreeMap::new();
    for r in slice_by_year(dataset, year) {
        groups.entry(r.continent).or_default().push(r);
    }
    groups
        .into_iter()
        .filter_map(|(continent, rows)| {
            summarize(&rows, metric).map(|summary| ContinentSummary {
                continent,
                year,
                summary,
            })
        })
        .collect()
}
