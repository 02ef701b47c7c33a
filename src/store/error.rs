use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    InvalidRequest,
    UnknownResource,
    CapacityConflict,
    CommitConflict,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StoreError {
    pub kind: StoreErrorKind,
    pub message: String,
}

impl StoreError {
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

pub fn invalid_request(message: impl Into<String>) -> StoreError {
    StoreError::new(StoreErrorKind::InvalidRequest, message)
}

pub fn unknown_resource(message: impl Into<String>) -> StoreError {
    StoreError::new(StoreErrorKind::UnknownResource, message)
}

pub fn capacity_conflict(message: impl Into<String>) -> StoreError {
    StoreError::new(StoreErrorKind::CapacityConflict, message)
}

pub fn commit_conflict(message: impl Into<String>) -> StoreError {
    StoreError::new(StoreErrorKind::CommitConflict, message)
}

pub fn internal_error(message: impl Into<String>) -> StoreError {
    StoreError::new(StoreErrorKind::Internal, message)
}
