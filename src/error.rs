use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("series provider failed: {0}")]
    Provider(String),

    #[error("invalid config: {0}")]
    Config(String),
}
