//! gapdash
//!
//! An interactive dashboard over the Gapminder country table. Pick a continent,
//! a year and a metric; ranked bar charts and a world choropleth follow.
//! Pairs with the `gapdash` CLI and the `gapdash-gui` desktop app.
//!
//! ### Features
//! - Load and validate a Gapminder-format CSV once, share it read-only
//! - Top-15 rankings per continent/year and per-year map slices
//! - Renderer-agnostic chart specs (bar, choropleth, table)
//! - Per-panel filter state driven by an explicit control → field registry
//! - Export as Plotly JSON, standalone HTML, SVG/PNG bar charts, CSV/JSON rows
//!
//! ### Example
//! ```no_run
//! use std::sync::Arc;
//! use gapdash::{Dashboard, Dataset, MemorySurface, PanelId};
//!
//! let dataset = Arc::new(Dataset::load_csv("gapminder.csv")?);
//! let mut surface = MemorySurface::new();
//! let mut dash = Dashboard::new(dataset);
//! dash.start(&mut surface);
//! dash.dispatch_str("cont_pop=Europe", &mut surface)?;
//! let chart = surface.latest(PanelId::Population).unwrap();
//! println!("{}", chart.to_json_pretty()?);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod binding;
pub mod chart;
pub mod config;
pub mod controls;
pub mod dataset;
pub mod error;
pub mod models;
pub mod numfmt;
pub mod palette;
pub mod panel;
pub mod plotly;
pub mod query;
pub mod stats;
pub mod storage;
pub mod views;
pub mod viz;

pub use binding::{Dashboard, DisplaySurface, MemorySurface};
pub use chart::ChartSpec;
pub use controls::{ControlEvent, ControlId};
pub use dataset::{CsvDataset, Dataset, DatasetProvider};
pub use error::{DataLoadError, SelectionError};
pub use models::{Continent, Field, FilterCriteria, Metric, Record};
pub use panel::{PanelId, PanelState};
