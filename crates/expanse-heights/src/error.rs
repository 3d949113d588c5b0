use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScaleRangeError {
    #[error("old range is empty: max {max} must be greater than min {min}")]
    EmptyOldRange { min: i32, max: i32 },
    #[error("new range is empty: max {max} must be greater than min {min}")]
    EmptyNewRange { min: i32, max: i32 },
}

/// Wire-format violation of a vertical anchor object.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnchorWireError {
    #[error("anchor object has none of absolute, above_bottom, below_top")]
    NoKey,
    #[error("anchor object sets more than one of absolute, above_bottom, below_top")]
    Ambiguous,
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("placement modifier {index}: {reason}")]
    InvalidModifier { index: usize, reason: String },
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no placement definition named {0}")]
    UnknownDefinition(String),
    #[error("definition {name} rejected: {reason}")]
    Rejected { name: String, reason: String },
}

/// Why a single definition was left untouched during a reload.
#[derive(Debug, Error)]
pub enum RescaleError {
    #[error("encode failed: {0}")]
    Encode(#[source] CodecError),
    #[error("decode failed: {0}")]
    Decode(#[source] CodecError),
    #[error("replace failed: {0}")]
    Replace(#[source] RegistryError),
}
