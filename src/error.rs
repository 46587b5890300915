// error.rs
use thiserror::Error;

/// Concrete reasons a quote download could not be turned into data.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },
    #[error("loader thread exited without a result")]
    WorkerExited,
}

/// The two states a chart shows instead of data. Both end the render attempt.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("data unavailable: {0}")]
    Unavailable(#[from] LoadError),
    #[error("no data available")]
    Empty,
}
