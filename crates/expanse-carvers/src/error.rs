use thiserror::Error;

/// Rejected carver or generation parameters; raised once while building a
/// [`CarverSet`](crate::CarverSet) or [`CarveContext`](crate::CarveContext).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CarverConfigError {
    #[error("{carver}: probability {value} outside [0, 1]")]
    Probability { carver: &'static str, value: f32 },
    #[error("{carver}.{field}: {reason}")]
    Parameter { carver: &'static str, field: &'static str, reason: String },
    #[error("generation depth {0} is too shallow to carve")]
    GenDepth(i32),
    #[error("block {0} is not in the registry")]
    UnknownBlock(String),
}
