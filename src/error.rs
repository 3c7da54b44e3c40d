use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("percentage length resolved without a reference size")]
    MissingReference,

    #[error("rebase target extent is smaller than the reference extent on the {edge} edge")]
    RebaseTargetSmaller { edge: &'static str },

    #[error("update pass already in progress")]
    UpdateInProgress,

    #[error("unknown node `{0}`")]
    UnknownNode(String),

    #[error("unknown color token `{0}`")]
    UnknownColorToken(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
