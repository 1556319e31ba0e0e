//! Selector controls, their fixed option sets and the events they emit.

use crate::dataset::Dataset;
use crate::error::SelectionError;
use crate::models::{Continent, Field, Metric};
use crate::panel::{ControlValue, PanelId};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Identity of one selector. Each is bound to exactly one panel field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ControlId {
    ContPop,
    YearPop,
    ContGdp,
    YearGdp,
    ContLifeExp,
    YearLifeExp,
    VarMap,
    YearMap,
}

impl ControlId {
    pub const ALL: [ControlId; 8] = [
        ControlId::ContPop,
        ControlId::YearPop,
        ControlId::ContGdp,
        ControlId::YearGdp,
        ControlId::ContLifeExp,
        ControlId::YearLifeExp,
        ControlId::VarMap,
        ControlId::YearMap,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlId::ContPop => "cont_pop",
            ControlId::YearPop => "year_pop",
            ControlId::ContGdp => "cont_gdp",
            ControlId::YearGdp => "year_gdp",
            ControlId::ContLifeExp => "cont_life_exp",
            ControlId::YearLifeExp => "year_life_exp",
            ControlId::VarMap => "var_map",
            ControlId::YearMap => "year_map",
        }
    }

    pub fn panel(&self) -> PanelId {
        match self {
            ControlId::ContPop | ControlId::YearPop => PanelId::Population,
            ControlId::ContGdp | ControlId::YearGdp => PanelId::Gdp,
            ControlId::ContLifeExp | ControlId::YearLifeExp => PanelId::LifeExpectancy,
            ControlId::VarMap | ControlId::YearMap => PanelId::Map,
        }
    }

    pub fn field(&self) -> Field {
        match self {
            ControlId::ContPop | ControlId::ContGdp | ControlId::ContLifeExp => Field::Continent,
            ControlId::YearPop
            | ControlId::YearGdp
            | ControlId::YearLifeExp
            | ControlId::YearMap => Field::Year,
            ControlId::VarMap => Field::Metric,
        }
    }

    /// The control bound to `field` of `panel`, if any.
    pub fn bound_to(panel: PanelId, field: Field) -> Option<ControlId> {
        ControlId::ALL
            .into_iter()
            .find(|c| c.panel() == panel && c.field() == field)
    }

    pub fn label(&self) -> &'static str {
        match self.field() {
            Field::Continent => "Select Continent:",
            Field::Year => "Select Year:",
            Field::Metric => "Select Variable:",
        }
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlId {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ControlId::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| SelectionError::UnknownControl(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

/// A one-of-N selector with options fixed from the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Control {
    pub id: ControlId,
    pub options: Vec<SelectOption>,
}

impl Control {
    pub fn for_dataset(id: ControlId, dataset: &Dataset) -> Self {
        let options = match id.field() {
            Field::Continent => dataset
                .continents()
                .iter()
                .map(|c| SelectOption {
                    label: c.to_string(),
                    value: c.to_string(),
                })
                .collect(),
            Field::Year => dataset
                .years()
                .iter()
                .map(|y| SelectOption {
                    label: y.to_string(),
                    value: y.to_string(),
                })
                .collect(),
            Field::Metric => Metric::ALL
                .iter()
                .map(|m| SelectOption {
                    label: m.label().to_string(),
                    value: m.column().to_string(),
                })
                .collect(),
        };
        Self { id, options }
    }

    pub fn offers(&self, raw: &str) -> bool {
        let raw = raw.trim();
        self.options.iter().any(|o| o.value.eq_ignore_ascii_case(raw))
    }

    /// Turn an emitted value into a typed one, rejecting anything not offered.
    pub fn parse(&self, raw: &str) -> Result<ControlValue, SelectionError> {
        let not_an_option = || SelectionError::NotAnOption {
            control: self.id.as_str(),
            value: raw.to_string(),
        };
        if !self.offers(raw) {
            return Err(not_an_option());
        }
        let raw = raw.trim();
        match self.id.field() {
            Field::Continent => Continent::from_str(raw)
                .map(ControlValue::Continent)
                .map_err(|_| not_an_option()),
            Field::Year => raw
                .parse::<i32>()
                .map(ControlValue::Year)
                .map_err(|_| not_an_option()),
            Field::Metric => Metric::from_str(raw)
                .map(ControlValue::Metric)
                .map_err(|_| not_an_option()),
        }
    }
}

/// A user selection: `(panel, field, new value)` as emitted by a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlEvent {
    pub panel: PanelId,
    pub field: Field,
    pub value: String,
}

impl ControlEvent {
    pub fn new(panel: PanelId, field: Field, value: impl Into<String>) -> Self {
        Self {
            panel,
            field,
            value: value.into(),
        }
    }

    pub fn from_control(id: ControlId, value: impl Into<String>) -> Self {
        Self::new(id.panel(), id.field(), value)
    }
}

impl FromStr for ControlEvent {
    type Err = SelectionError;

    /// Parse `control_id=value`, e.g. `cont_pop=Europe`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, value) = s
            .split_once('=')
            .ok_or_else(|| SelectionError::Malformed(s.to_string()))?;
        let id: ControlId = id.parse()?;
        Ok(ControlEvent::from_control(id, value.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_their_names() {
        for id in ControlId::ALL {
            assert_eq!(id.as_str().parse::<ControlId>().unwrap(), id);
        }
        assert_eq!(ControlId::VarMap.label(), "Select Variable:");
    }

    #[test]
    fn event_string_splits_on_first_equals() {
        let ev: ControlEvent = "var_map= lifeExp".parse().unwrap();
        assert_eq!(ev.panel, PanelId::Map);
        assert_eq!(ev.field, Field::Metric);
        assert_eq!(ev.value, "lifeExp");
    }
}
