//! Error types shared by the dataset loader and the binding layer.

use crate::models::Field;
use crate::panel::PanelId;
use std::path::PathBuf;

/// The dataset could not be supplied. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("failed to open dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed dataset row: {0}")]
    Csv(#[from] csv::Error),
    #[error("dataset contains no records")]
    Empty,
    /// Every country must cover the same ascending year sequence.
    #[error("country {country:?} has years {found:?}, expected {expected:?}")]
    InconsistentYears {
        country: String,
        expected: Vec<i32>,
        found: Vec<i32>,
    },
}

/// A control event that cannot be applied. The panel is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("unknown control {0:?}")]
    UnknownControl(String),
    #[error("no control is bound to {field} of the {panel} panel")]
    Unbound { panel: PanelId, field: Field },
    #[error("{value:?} is not an option of control {control}")]
    NotAnOption { control: &'static str, value: String },
    #[error("expected `control=value`, got {0:?}")]
    Malformed(String),
}
