use thiserror::Error;

/// Failures raised while turning source data into a [`Dataset`](crate::dataset::Dataset).
///
/// Aggregation itself never fails; only ingestion can.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Malformed dataset: {0}")]
    Malformed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DatasetError {
    pub(crate) fn malformed(path: impl std::fmt::Display, reason: impl std::fmt::Display) -> Self {
        DatasetError::Malformed(format!("{path}: {reason}"))
    }
}

pub type Result<T> = std::result::Result<T, DatasetError>;
