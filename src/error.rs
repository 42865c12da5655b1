// ABOUTME: Error types for the storage layer and the calculator.
// ABOUTME: Storage failures are returned for the caller to inspect or ignore; none are fatal.

use thiserror::Error;

/// A failure reading or writing the host key-value store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("quota exceeded writing '{key}': {size} bytes over a {quota} byte quota")]
    QuotaExceeded {
        key: String,
        size: usize,
        quota: usize,
    },

    /// A value that JSON cannot represent would be written.
    #[error("refusing to save non-finite {field}")]
    NonFinite { field: &'static str },

    #[error("no calculation ids left above {newest}")]
    IdsExhausted { newest: u64 },
}

/// Why a calculation or add-to-total request was declined.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    /// One of the inputs is not a finite number.
    #[error("please enter valid numbers for all sides (got '{0}')")]
    InvalidNumber(String),

    #[error("side lengths must be positive")]
    NonPositive,

    #[error("the values do not form a valid triangle")]
    NotATriangle,

    /// The sides are valid but the area does not fit in a finite number.
    #[error("the area is too large to calculate")]
    AreaOutOfRange,

    #[error("there is no calculated area to add to the total")]
    NoCurrentResult,
}
