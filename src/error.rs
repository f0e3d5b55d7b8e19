use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("dataset has no column with role `x`")]
    MissingXColumn,

    #[error("dataset references missing column `{id}`")]
    MissingColumn { id: String },

    #[error("series `{id}` has no {field} entry")]
    MissingSeriesMetadata { id: String, field: &'static str },

    #[error("column `{id}` has {actual} values, expected {expected}")]
    ColumnLengthMismatch {
        id: String,
        expected: usize,
        actual: usize,
    },

    #[error("column `{id}` holds a non-numeric value at index {index}")]
    NonNumericValue { id: String, index: usize },

    #[error("dataset has no x values")]
    EmptyDataset,

    #[error("dataset has no series")]
    NoSeries,

    #[error("invalid color `{value}`")]
    InvalidColor { value: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("series index {index} out of range (series count {len})")]
    SeriesIndexOutOfRange { index: usize, len: usize },

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}
