use thiserror::Error;

pub type DashResult<T> = Result<T, DashError>;

#[derive(Debug, Error)]
pub enum DashError {
    #[error("malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("no rows survived ingestion")]
    EmptyDataset,

    #[error("unknown metric key: {0}")]
    UnknownMetric(String),

    #[error("series for \"{entity}\" has no observations for the active metric")]
    EmptySeries { entity: String },

    #[error("mutation attempted while a recompute pass is in progress")]
    ReentrantRecompute,

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
