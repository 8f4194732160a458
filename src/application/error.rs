// Application error types
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("{cities} cities but {temperatures} temperatures; readings must align by index")]
    LengthMismatch { cities: usize, temperatures: usize },
}

/// Failure to obtain a drawing surface for the chart. Recovered by the
/// renderer through the static table.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SurfaceError {
    #[error("drawing surface element '{0}' not found")]
    ElementMissing(String),

    #[error("2d context unavailable for '{0}': {1}")]
    ContextUnavailable(String, String),
}
