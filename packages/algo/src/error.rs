use crate::types::{ItemId, StudyMode};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AlgoError {
    #[error("queue is empty: no current item to answer")]
    EmptyQueue,
    #[error("duplicate item id {0}")]
    DuplicateId(ItemId),
    #[error("invalid exam configuration: {0}")]
    InvalidExam(String),
    #[error("invalid study sample at index {index}: {reason}")]
    InvalidSample { index: usize, reason: String },
    #[error("unknown {field} `{value}`")]
    InvalidSetting { field: &'static str, value: String },
    #[error("snapshot mode {found:?} does not match {expected:?}")]
    SnapshotMismatch { expected: StudyMode, found: StudyMode },
    #[error("snapshot belongs to set {found:?}, not {expected:?}")]
    SnapshotSetMismatch {
        expected: Option<u64>,
        found: Option<u64>,
    },
    #[error("snapshot item {0} is not part of this word list")]
    SnapshotForeignItem(ItemId),
}

pub type Result<T> = std::result::Result<T, AlgoError>;
