//! Error types shared by the scene core, the configuration layer and the viewer.

use thiserror::Error;

use crate::data::rows::{Field, RowId};
use crate::plot::AxisIndex;

/// Validation failures of a [`LogScale`](crate::data::scale::LogScale).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScaleError {
    #[error("logarithm base must be positive, finite and not 1 (got {0})")]
    InvalidBase(f64),
    #[error("log domain [{low}, {high}] must be strictly positive and finite")]
    NonPositiveDomain { low: f64, high: f64 },
    #[error("log domain [{low}, {high}] must satisfy low < high")]
    EmptyDomain { low: f64, high: f64 },
    #[error("display range [{min}, {max}] must be finite with min < max")]
    InvalidRange { min: f64, max: f64 },
    #[error("value {0} is outside the logarithmic domain (must be > 0)")]
    NonPositiveValue(f64),
    #[error("value {0} is not finite")]
    NonFinite(f64),
}

/// Failures while loading, saving or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported config file extension {0:?} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors returned by [`ScatterPlot`](crate::plot::ScatterPlot) operations.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("axis index {0} is out of range (expected 0, 1 or 2)")]
    AxisIndexOutOfRange(usize),
    #[error("invalid display range [{min}, {max}]: min must be less than max")]
    InvalidDisplayRange { min: f64, max: f64 },
    #[error("axis {0} has no scale yet; configure it before rendering data")]
    AxisNotConfigured(AxisIndex),
    #[error("row {row} field {field}: {source}")]
    InvalidRowValue {
        row: RowId,
        field: Field,
        #[source]
        source: ScaleError,
    },
    #[error(transparent)]
    Scale(#[from] ScaleError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("X3D export failed: {0}")]
    Io(#[from] std::io::Error),
}
