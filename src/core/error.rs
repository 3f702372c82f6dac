use thiserror::Error;

/// Errors that can occur at the boundaries of a settlement run.
///
/// Aggregation and statement arithmetic are pure and infallible given
/// well-typed inputs; errors exist only where the pipeline touches the
/// outside world (record store, rendering, filesystem, mail transport)
/// and at the period-selection boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JeongsanError {
    /// Invalid settlement period (bad year/month override).
    #[error("period error: {0}")]
    Period(String),

    /// The record store failed to deliver the month's records.
    #[error("record source error: {0}")]
    Source(String),

    /// Document rendering (PDF or filing sheet) failed.
    #[error("render error: {0}")]
    Render(String),

    /// The mail transport reported a failure during the single send attempt.
    #[error("transport error: {0}")]
    Transport(String),

    /// Local persistence of generated attachments failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
