//! Pure builders turning query results into [`ChartSpec`]s.

use crate::chart::{Align, Bar, BarChart, ChartSpec, ChoroplethMap, Layout, Margin, Region, TableView};
use crate::dataset::Dataset;
use crate::models::{Continent, Metric, Record};
use crate::numfmt::format_value;
use crate::palette::{ColorScale, Rgb8, set2_color};
use crate::query::TOP_N;
use crate::stats::summarize;

pub const RANKING_HEIGHT: u32 = 500;
pub const MAP_HEIGHT: u32 = 600;
pub const TABLE_HEIGHT: u32 = 600;

const PAPER_BG: Rgb8 = Rgb8::new(0xF8, 0xF9, 0xFA);
// Labels inside specs are always English; surfaces may reformat.
const SPEC_LOCALE: &str = "en";

/// Title used by the ranking panels, e.g. `Top 15 Populations in Asia (1952)`.
pub fn ranking_title(metric: Metric, continent: Continent, year: i32) -> String {
    let what = match metric {
        Metric::Population => "Populations",
        Metric::GdpPerCapita => "GDP per Capita",
        Metric::LifeExpectancy => "Life Expectancy",
    };
    format!("Top {TOP_N} {what} in {continent} ({year})")
}

pub fn choropleth_title(metric: Metric, year: i32) -> String {
    format!("{} Map ({year})", metric.column())
}

/// Bar chart with one bar per row of `subset`, in subset order.
///
/// Each distinct country gets the next Set2 color by order of first appearance.
pub fn build_ranking_chart(subset: &[&Record], metric: Metric, title: &str) -> ChartSpec {
    let mut seen: Vec<&str> = Vec::new();
    let bars = subset
        .iter()
        .map(|r| {
            let idx = match seen.iter().position(|c| *c == r.country) {
                Some(i) => i,
                None => {
                    seen.push(&r.country);
                    seen.len() - 1
                }
            };
            let value = metric.value(r);
            Bar {
                category: r.country.clone(),
                value,
                label: format_value(metric, value, SPEC_LOCALE),
                color: set2_color(idx),
            }
        })
        .collect();

    ChartSpec::Bar(BarChart {
        layout: Layout {
            title: Some(title.to_string()),
            height: RANKING_HEIGHT,
            margin: Some(Margin {
                t: 50,
                l: 20,
                r: 20,
                b: 20,
            }),
            template: "plotly_white",
            paper_bgcolor: None,
        },
        metric,
        x_title: "country".to_string(),
        y_title: metric.column().to_string(),
        bars,
    })
}

/// World map colored by `metric` on the RdYlBu scale.
///
/// Only rows in `subset` become regions; every other country renders as no data.
pub fn build_choropleth(subset: &[&Record], metric: Metric, year: i32) -> ChartSpec {
    let scale = ColorScale::rd_yl_bu();
    let range = summarize(subset, metric).map(|s| (s.min, s.max));
    let regions = subset
        .iter()
        .map(|r| {
            let value = metric.value(r);
            let t = match range {
                Some((lo, hi)) if hi > lo => (value - lo) / (hi - lo),
                _ => 0.5,
            };
            Region {
                location: r.iso_alpha.clone(),
                country: r.country.clone(),
                value,
                color: scale.sample(t),
                hover: format!(
                    "{}\n{}: {}",
                    r.country,
                    metric.label(),
                    format_value(metric, value, SPEC_LOCALE)
                ),
            }
        })
        .collect();

    ChartSpec::Choropleth(ChoroplethMap {
        layout: Layout {
            title: Some(choropleth_title(metric, year)),
            height: MAP_HEIGHT,
            margin: Some(Margin {
                t: 50,
                l: 0,
                r: 0,
                b: 20,
            }),
            template: "plotly",
            paper_bgcolor: Some(PAPER_BG),
        },
        metric,
        year,
        location_mode: "ISO-3",
        color_scale: scale,
        range,
        regions,
    })
}

/// Static table of the whole dataset, native column order, left-aligned.
pub fn build_table_view(dataset: &Dataset) -> ChartSpec {
    ChartSpec::Table(TableView {
        layout: Layout {
            title: None,
            height: TABLE_HEIGHT,
            margin: Some(Margin {
                t: 0,
                l: 0,
                r: 0,
                b: 0,
            }),
            template: "plotly",
            paper_bgcolor: Some(PAPER_BG),
        },
        columns: Record::COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows: dataset.records().iter().map(Record::cells).collect(),
        align: Align::Left,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_embed_context() {
        assert_eq!(
            ranking_title(Metric::Population, Continent::Asia, 1952),
            "Top 15 Populations in Asia (1952)"
        );
        assert_eq!(
            ranking_title(Metric::GdpPerCapita, Continent::Europe, 2007),
            "Top 15 GDP per Capita in Europe (2007)"
        );
        assert_eq!(
            choropleth_title(Metric::LifeExpectancy, 1952),
            "lifeExp Map (1952)"
        );
    }

    #[test]
    fn empty_subset_builds_empty_charts() {
        let bar = build_ranking_chart(&[], Metric::Population, "nothing");
        assert_eq!(bar.kind(), "bar");
        assert_eq!(bar.mark_count(), 0);
        let map = build_choropleth(&[], Metric::Population, 1800);
        assert_eq!(map.mark_count(), 0);
        assert_eq!(map.as_choropleth().unwrap().range, None);
    }
}
