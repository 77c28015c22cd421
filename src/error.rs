use thiserror::Error;

use crate::types::{RecordId, RecordTypeId};

/// Domain rule violations surfaced to the CLI and the status line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("record {0} not found")]
    RecordNotFound(RecordId),
    #[error("record type {0} not found")]
    RecordTypeNotFound(RecordTypeId),
    #[error("record type '{0}' not found")]
    RecordTypeNameNotFound(String),
    #[error("record type '{0}' already exists")]
    DuplicateTypeName(String),
    #[error("record must not end before it starts")]
    InvalidTimeRange,
    #[error("start time can't be in the future")]
    StartInFuture,
    #[error("'{0}' is already running")]
    AlreadyRunning(String),
    #[error("'{0}' is not running")]
    NotRunning(String),
    #[error("invalid color '{0}', expected #RRGGBB")]
    InvalidColor(String),
    #[error("unknown icon '{0}'")]
    UnknownIcon(String),
}
