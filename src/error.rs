use thiserror::Error;

/// Top-level error type for the Planaris geometry kernel.
#[derive(Debug, Error)]
pub enum PlanarisError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Sweep(#[from] SweepError),

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}

/// Errors related to geometry decomposition.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("unsupported geometry: {0}")]
    Unsupported(&'static str),
}

/// Errors raised by the intersection sweep.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("sweep cancelled")]
    Cancelled,

    #[error("intersection callback failed")]
    Callback(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// An opaque failure from an injected collaborator, tagged with the
/// pipeline stage it came from.
#[derive(Debug, Error)]
#[error("{stage} failed")]
pub struct CollaboratorError {
    pub stage: &'static str,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

/// Convenience type alias for results using [`PlanarisError`].
pub type Result<T> = std::result::Result<T, PlanarisError>;
