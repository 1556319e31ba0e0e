use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of continents used by the Gapminder table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Continent {
    Africa,
    Americas,
    Asia,
    Europe,
    Oceania,
}

impl Continent {
    pub const ALL: [Continent; 5] = [
        Continent::Africa,
        Continent::Americas,
        Continent::Asia,
        Continent::Europe,
        Continent::Oceania,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Continent::Africa => "Africa",
            Continent::Americas => "Americas",
            Continent::Asia => "Asia",
            Continent::Europe => "Europe",
            Continent::Oceania => "Oceania",
        }
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known continent or metric.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseNameError {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for Continent {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Continent::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseNameError {
                kind: "continent",
                value: s.to_string(),
            })
    }
}

/// A numeric column of the table that charts can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "pop")]
    Population,
    #[serde(rename = "gdpPercap")]
    GdpPerCapita,
    #[serde(rename = "lifeExp")]
    LifeExpectancy,
}

impl Metric {
    pub const ALL: [Metric; 3] = [
        Metric::Population,
        Metric::GdpPerCapita,
        Metric::LifeExpectancy,
    ];

    /// Column name in the dataset (`pop`, `gdpPercap`, `lifeExp`).
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Population => "pop",
            Metric::GdpPerCapita => "gdpPercap",
            Metric::LifeExpectancy => "lifeExp",
        }
    }

    /// Human label shown in selectors.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Population => "Population",
            Metric::GdpPerCapita => "GDP per Capita",
            Metric::LifeExpectancy => "Life Expectancy",
        }
    }

    pub fn value(&self, record: &Record) -> f64 {
        match self {
            Metric::Population => record.pop,
            Metric::GdpPerCapita => record.gdp_percap,
            Metric::LifeExpectancy => record.life_exp,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Metric {
    type Err = ParseNameError;

    /// Accepts the column name (`gdpPercap`) as well as the spelled-out
    /// aliases (`gdpPerCapita`, `gdp-per-capita`, `gdp`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "pop" | "population" => Ok(Metric::Population),
            "gdppercap" | "gdppercapita" | "gdp" => Ok(Metric::GdpPerCapita),
            "lifeexp" | "lifeexpectancy" | "life" => Ok(Metric::LifeExpectancy),
            _ => Err(ParseNameError {
                kind: "metric",
                value: s.trim().to_string(),
            }),
        }
    }
}

/// One row of the table. Field order is the native column order of the CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub country: String,
    pub continent: Continent,
    pub year: i32,
    #[serde(rename = "lifeExp")]
    pub life_exp: f64,
    pub pop: f64,
    #[serde(rename = "gdpPercap")]
    pub gdp_percap: f64,
    /// ISO 3166-1 alpha-3 code, used to resolve map regions.
    pub iso_alpha: String,
    #[serde(default)]
    pub iso_num: Option<u32>,
}

impl Record {
    /// Column headers in native order.
    pub const COLUMNS: [&'static str; 8] = [
        "country",
        "continent",
        "year",
        "lifeExp",
        "pop",
        "gdpPercap",
        "iso_alpha",
        "iso_num",
    ];

    /// Cell texts in the same order as [`Record::COLUMNS`].
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.country.clone(),
            self.continent.to_string(),
            self.year.to_string(),
            self.life_exp.to_string(),
            self.pop.to_string(),
            self.gdp_percap.to_string(),
            self.iso_alpha.clone(),
            self.iso_num.map(|n| n.to_string()).unwrap_or_default(),
        ]
    }
}

/// Parameters narrowing the dataset for one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterCriteria {
    /// Bar ranking: one continent, one year, one metric.
    Ranking {
        continent: Continent,
        year: i32,
        metric: Metric,
    },
    /// World map: one metric, one year.
    Map { metric: Metric, year: i32 },
}

impl FilterCriteria {
    pub fn year(&self) -> i32 {
        match *self {
            FilterCriteria::Ranking { year, .. } | FilterCriteria::Map { year, .. } => year,
        }
    }

    pub fn metric(&self) -> Metric {
        match *self {
            FilterCriteria::Ranking { metric, .. } | FilterCriteria::Map { metric, .. } => metric,
        }
    }

    pub fn continent(&self) -> Option<Continent> {
        match *self {
            FilterCriteria::Ranking { continent, .. } => Some(continent),
            FilterCriteria::Map { .. } => None,
        }
    }

    /// Current value of `field` in the form a selector option carries.
    pub fn value_of(&self, field: Field) -> Option<String> {
        match field {
            Field::Continent => self.continent().map(|c| c.to_string()),
            Field::Year => Some(self.year().to_string()),
            Field::Metric => Some(self.metric().column().to_string()),
        }
    }
}

/// A single field of [`FilterCriteria`] that a control can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Continent,
    Year,
    Metric,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Continent => "continent",
            Field::Year => "year",
            Field::Metric => "metric",
        })
    }
}
