//! Loading and validating the immutable record table.

use crate::error::DataLoadError;
use crate::models::{Continent, Record};
use csv::ReaderBuilder;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// The in-memory table. Built once, shared read-only (usually behind an `Arc`).
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
    years: Vec<i32>,
    continents: Vec<Continent>,
}

impl Dataset {
    /// Validate records and build the table.
    ///
    /// Rejects an empty table and countries that do not share one common year
    /// sequence.
    pub fn from_records(records: Vec<Record>) -> Result<Self, DataLoadError> {
        if records.is_empty() {
            return Err(DataLoadError::Empty);
        }

        let mut years_by_country: BTreeMap<&str, BTreeSet<i32>> = BTreeMap::new();
        let mut continents: Vec<Continent> = Vec::new();
        for r in &records {
            years_by_country
                .entry(r.country.as_str())
                .or_default()
                .insert(r.year);
            if !continents.contains(&r.continent) {
                continents.push(r.continent);
            }
        }

        let years: Vec<i32> = records
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        for (country, found) in &years_by_country {
            if found.len() != years.len() {
                return Err(DataLoadError::InconsistentYears {
                    country: country.to_string(),
                    expected: years.clone(),
                    found: found.iter().copied().collect(),
                });
            }
        }

        Ok(Self {
            records,
            years,
            continents,
        })
    }

    /// Parse a Gapminder-format CSV stream (header row required).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataLoadError> {
        let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let records = rdr
            .deserialize::<Record>()
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_records(records)
    }

    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Self, DataLoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let ds = Self::from_reader(file)?;
        log::info!(
            "loaded {} records ({} years, {} continents) from {}",
            ds.len(),
            ds.years.len(),
            ds.continents.len(),
            path.display()
        );
        Ok(ds)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Distinct continents in order of first appearance.
    pub fn continents(&self) -> &[Continent] {
        &self.continents
    }

    pub fn earliest_year(&self) -> i32 {
        // from_records guarantees at least one year
        self.years[0]
    }
}

/// Source of the dataset, called once at process start.
pub trait DatasetProvider {
    fn load_dataset(&self) -> Result<Dataset, DataLoadError>;
}

/// Reads the table from a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvDataset {
    pub path: PathBuf,
}

impl CsvDataset {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetProvider for CsvDataset {
    fn load_dataset(&self) -> Result<Dataset, DataLoadError> {
        Dataset::load_csv(&self.path)
    }
}
