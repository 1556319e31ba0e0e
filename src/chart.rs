//! Renderer-agnostic chart descriptions produced by [`crate::views`].
//!
//! A [`ChartSpec`] is immutable once built; display surfaces replace the
//! rendered chart wholesale with each new spec.

use crate::models::Metric;
use crate::palette::{ColorScale, Rgb8};
use serde::Serialize;

/// Outer margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Margin {
    pub t: u32,
    pub l: u32,
    pub r: u32,
    pub b: u32,
}

/// Layout hints shared by every chart kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Option<String>,
    /// Fixed canvas height in pixels; width follows the container.
    pub height: u32,
    /// Margins the host should apply. `None` leaves the renderer default.
    pub margin: Option<Margin>,
    pub template: &'static str,
    pub paper_bgcolor: Option<Rgb8>,
}

/// One bar of a ranking chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    /// Category key (country name).
    pub category: String,
    pub value: f64,
    /// Value label drawn on the bar.
    pub label: String,
    pub color: Rgb8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub layout: Layout,
    pub metric: Metric,
    pub x_title: String,
    pub y_title: String,
    pub bars: Vec<Bar>,
}

/// One colored country on the world map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    /// ISO-3 location code.
    pub location: String,
    pub country: String,
    pub value: f64,
    pub color: Rgb8,
    pub hover: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethMap {
    pub layout: Layout,
    pub metric: Metric,
    pub year: i32,
    /// How `Region::location` is resolved to a polygon.
    pub location_mode: &'static str,
    pub color_scale: ColorScale,
    /// Value range mapped onto the scale; `None` when there are no regions.
    pub range: Option<(f64, f64)>,
    pub regions: Vec<Region>,
}

impl ChoroplethMap {
    /// Metric value for an ISO-3 code, `None` renders as no data.
    pub fn value_for(&self, location: &str) -> Option<f64> {
        self.regions
            .iter()
            .find(|r| r.location == location)
            .map(|r| r.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub layout: Layout,
    pub columns: Vec<String>,
    /// Row-major cell texts; every row has `columns.len()` cells.
    pub rows: Vec<Vec<String>>,
    pub align: Align,
}

/// A complete chart ready to be published to a display surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartSpec {
    Bar(BarChart),
    Choropleth(ChoroplethMap),
    Table(TableView),
}

impl ChartSpec {
    pub fn layout(&self) -> &Layout {
        match self {
            ChartSpec::Bar(c) => &c.layout,
            ChartSpec::Choropleth(c) => &c.layout,
            ChartSpec::Table(c) => &c.layout,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.layout().title.as_deref()
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ChartSpec::Bar(_) => "bar",
            ChartSpec::Choropleth(_) => "choropleth",
            ChartSpec::Table(_) => "table",
        }
    }

    /// Number of data marks: bars, regions or table rows.
    pub fn mark_count(&self) -> usize {
        match self {
            ChartSpec::Bar(c) => c.bars.len(),
            ChartSpec::Choropleth(c) => c.regions.len(),
            ChartSpec::Table(c) => c.rows.len(),
        }
    }

    pub fn as_bar(&self) -> Option<&BarChart> {
        match self {
            ChartSpec::Bar(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_choropleth(&self) -> Option<&ChoroplethMap> {
        match self {
            ChartSpec::Choropleth(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&TableView> {
        match self {
            ChartSpec::Table(c) => Some(c),
            _ => None,
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
