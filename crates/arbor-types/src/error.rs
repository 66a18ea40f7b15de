//! Error types for arbor-estimate

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

/// Rejected user input.
///
/// The pricing engine never raises these itself; callers check input with the
/// validation functions in `arbor-domain` before handing it over.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Please select a service type")]
    MissingService,

    #[error("Dimension must be a number, got {0:?}")]
    NonNumericDimension(String),

    #[error("Dimension must be greater than zero, got {0}")]
    NonPositiveDimension(f64),

    #[error("Quantity must be at least 1")]
    ZeroQuantity,

    #[error("Haul-away needs at least 1 truckload")]
    ZeroTruckloads,

    #[error("Please add at least one item to the estimate.")]
    EmptyEstimate,

    #[error("Customer {0} is required")]
    MissingCustomerField(&'static str),

    #[error("Price for {field} must be between 0 and {max}, got {value}")]
    InvalidPrice {
        field: &'static str,
        value: f64,
        max: f64,
    },

    #[error("{0} is too large to price")]
    CostOutOfRange(&'static str),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("No line item matches {0:?}")]
    ItemNotFound(String),

    #[error("No finalized estimate yet, run `finalize` first")]
    NoEstimate,

    #[error("Store error: {0}")]
    Store(String),

    #[error("Settings import error: {0}")]
    Import(String),

    #[error("Export error: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, Error>;
