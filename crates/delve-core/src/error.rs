use thiserror::Error;

/// Invalid simulation configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tick duration must be at least 1 ms")]
    ZeroTickDuration,

    #[error("gravity must not be negative (got {0})")]
    NegativeGravity(i32),

    #[error("terminal fall speed must be positive (got {0})")]
    InvalidMaxFallSpeed(i32),

    #[error("entity height must be at least one block (got {0})")]
    InvalidEntityHeight(i32),

    #[error("placement reach must be positive (got {0})")]
    InvalidReach(i32),

    #[error("{field} must not be negative (got {value})")]
    NegativeValue { field: &'static str, value: i32 },
}
