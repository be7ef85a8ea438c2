use thiserror::Error;

/// Failures surfaced by the prominence library.
#[derive(Debug, Error)]
pub enum ProminenceError {
    /// A sample buffer does not cover the declared grid.
    #[error("grid of {width}x{height} needs {expected} samples, got {actual}")]
    SampleCount {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    /// The caller's checkpoint stopped the sweep early.
    #[error("sweep cancelled after {processed} of {total} cells")]
    Cancelled { processed: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, ProminenceError>;
