use thiserror::Error;

/// Errors surfaced by the wheel core. None of them are fatal; callers log and
/// fall back to an idle wheel.
#[derive(Debug, Error)]
pub enum WheelError {
    #[error("Unknown animation phase: {0}")]
    UnknownPhase(String),

    #[error("Malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid wheel configuration: {0}")]
    InvalidConfig(String),
}
