use thiserror::Error;

/// Errors surfaced to the host.
///
/// Numeric anomalies inside the dynamics loop never show up here: they put
/// the vehicle into the crashed state instead.
#[derive(Debug, Error)]
pub enum SimError {
    /// No ground-truth start pose is available (no map selected).
    #[error("no start pose available: select a map before starting the simulation")]
    NoStartPose,

    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("motor command has {got} values, frame has {expected} motors")]
    MotorCount { expected: usize, got: usize },

    /// The dedicated worker thread could not be started.
    #[error("failed to spawn worker thread")]
    Spawn(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
