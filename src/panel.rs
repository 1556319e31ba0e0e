//! Dashboard panels and the filter state each one owns.

use crate::chart::ChartSpec;
use crate::dataset::Dataset;
use crate::error::SelectionError;
use crate::models::{Continent, Field, FilterCriteria, Metric};
use crate::query::select;
use crate::views::{build_choropleth, build_ranking_chart, ranking_title};
use serde::Serialize;
use std::fmt;

/// One tab of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelId {
    /// Static table of the whole dataset.
    Dataset,
    Population,
    Gdp,
    LifeExpectancy,
    Map,
}

impl PanelId {
    pub const ALL: [PanelId; 5] = [
        PanelId::Dataset,
        PanelId::Population,
        PanelId::Gdp,
        PanelId::LifeExpectancy,
        PanelId::Map,
    ];

    /// Panels that recompute their chart in response to controls.
    pub const REACTIVE: [PanelId; 4] = [
        PanelId::Population,
        PanelId::Gdp,
        PanelId::LifeExpectancy,
        PanelId::Map,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PanelId::Dataset => "Dataset",
            PanelId::Population => "Population",
            PanelId::Gdp => "GDP per Capita",
            PanelId::LifeExpectancy => "Life Expectancy",
            PanelId::Map => "Choropleth Map",
        }
    }

    /// Stable snake_case name, used for file names.
    pub fn key(&self) -> &'static str {
        match self {
            PanelId::Dataset => "dataset",
            PanelId::Population => "population",
            PanelId::Gdp => "gdp",
            PanelId::LifeExpectancy => "life_expectancy",
            PanelId::Map => "map",
        }
    }

    /// Metric ranked by a bar panel; `None` for the table and the map.
    pub fn ranking_metric(&self) -> Option<Metric> {
        match self {
            PanelId::Population => Some(Metric::Population),
            PanelId::Gdp => Some(Metric::GdpPerCapita),
            PanelId::LifeExpectancy => Some(Metric::LifeExpectancy),
            PanelId::Dataset | PanelId::Map => None,
        }
    }

    /// Initial criteria: Asia, earliest year; the map starts on life expectancy.
    pub fn default_criteria(&self, dataset: &Dataset) -> Option<FilterCriteria> {
        let year = dataset.earliest_year();
        match self {
            PanelId::Dataset => None,
            PanelId::Map => Some(FilterCriteria::Map {
                metric: Metric::LifeExpectancy,
                year,
            }),
            _ => self.ranking_metric().map(|metric| FilterCriteria::Ranking {
                continent: Continent::Asia,
                year,
                metric,
            }),
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A validated new value for one criteria field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlValue {
    Continent(Continent),
    Year(i32),
    Metric(Metric),
}

impl ControlValue {
    pub fn field(&self) -> Field {
        match self {
            ControlValue::Continent(_) => Field::Continent,
            ControlValue::Year(_) => Field::Year,
            ControlValue::Metric(_) => Field::Metric,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PanelState {
    /// Showing the last published chart.
    Idle,
    /// Recomputing after a control event.
    Updating,
}

/// A reactive panel: its criteria, its state and the last chart it published.
#[derive(Debug, Clone)]
pub struct Panel {
    id: PanelId,
    criteria: FilterCriteria,
    state: PanelState,
    published: Option<ChartSpec>,
}

impl Panel {
    pub fn new(id: PanelId, criteria: FilterCriteria) -> Self {
        Self {
            id,
            criteria,
            state: PanelState::Idle,
            published: None,
        }
    }

    pub fn id(&self) -> PanelId {
        self.id
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn published(&self) -> Option<&ChartSpec> {
        self.published.as_ref()
    }

    /// Query and build this panel's chart from its current criteria.
    pub fn render(&self, dataset: &Dataset) -> ChartSpec {
        let rows = select(dataset, &self.criteria);
        match self.criteria {
            FilterCriteria::Ranking {
                continent,
                year,
                metric,
            } => build_ranking_chart(&rows, metric, &ranking_title(metric, continent, year)),
            FilterCriteria::Map { metric, year } => build_choropleth(&rows, metric, year),
        }
    }

    /// Update one criteria field. On error the criteria are unchanged.
    pub(crate) fn apply(&mut self, value: ControlValue) -> Result<(), SelectionError> {
        let mut next = self.criteria;
        apply_value(self.id, &mut next, value)?;
        self.criteria = next;
        Ok(())
    }

    pub(crate) fn begin_update(&mut self) {
        self.state = PanelState::Updating;
    }

    pub(crate) fn finish_update(&mut self, spec: ChartSpec) {
        self.published = Some(spec);
        self.state = PanelState::Idle;
    }
}

/// Write `value` into the matching field of `criteria`.
///
/// Ranking panels carry a fixed metric, so only the map accepts metric values.
pub fn apply_value(
    panel: PanelId,
    criteria: &mut FilterCriteria,
    value: ControlValue,
) -> Result<(), SelectionError> {
    match (criteria, value) {
        (FilterCriteria::Ranking { continent, .. }, ControlValue::Continent(c)) => *continent = c,
        (
            FilterCriteria::Ranking { year, .. } | FilterCriteria::Map { year, .. },
            ControlValue::Year(y),
        ) => *year = y,
        (FilterCriteria::Map { metric, .. }, ControlValue::Metric(m)) => *metric = m,
        (_, v) => {
            return Err(SelectionError::Unbound {
                panel,
                field: v.field(),
            });
        }
    }
    Ok(())
}
