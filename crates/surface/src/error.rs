use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("Surface does not support updating overlays in place")]
    UpdateUnsupported,

    #[error("Surface has already been destroyed")]
    Destroyed,

    #[error("Failed to create surface: {0}")]
    Creation(String),
}
