use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("insufficient fit data: {valid} valid samples, at least {required} required")]
    InsufficientData { valid: usize, required: usize },

    #[error("malformed interval: lower bound {lower} is not below upper bound {upper}")]
    MalformedInterval { lower: f64, upper: f64 },

    #[error("least-squares solve failed: {0}")]
    LeastSquares(&'static str),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("worker thread disconnected")]
    WorkerDisconnected,

    #[error("worker results could not be reassembled")]
    Join,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
