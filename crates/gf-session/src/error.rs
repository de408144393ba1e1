use gf_core::GeoError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("no target has been set")]
    NoTarget,

    #[error("no start position for the simulated observer")]
    NoStartPosition,

    #[error("operation not allowed while tracking is active")]
    Active,

    #[error(transparent)]
    Geo(#[from] GeoError),
}

pub type SessionResult<T> = Result<T, SessionError>;
