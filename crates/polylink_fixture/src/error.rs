#![forbid(unsafe_code)]

use std::fmt;

use polylink_contracts::ContractViolation;
use polylink_resolve::ResolveError;
use polylink_storage::StorageError;

#[derive(Debug)]
pub enum DomainError {
    UnknownParty(String),
    UnknownCase(String),
    UnknownChannel(String),
    DuplicateChannelDetails { owner: String, details: String },
    NotOwnedBy { channel: String, party: String },
    Contract(ContractViolation),
    Storage(StorageError),
    Resolve(ResolveError),
    Json(serde_json::Error),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownParty(id) => write!(f, "unknown party: {id}"),
            Self::UnknownCase(id) => write!(f, "unknown case: {id}"),
            Self::UnknownChannel(id) => write!(f, "unknown communication channel: {id}"),
            Self::DuplicateChannelDetails { owner, details } => {
                write!(f, "{owner} already has a communication channel with details: {details}")
            }
            Self::NotOwnedBy { channel, party } => {
                write!(f, "channel {channel} is not owned by {party}")
            }
            Self::Contract(v) => write!(f, "contract violation: {v:?}"),
            Self::Storage(e) => write!(f, "storage error: {e:?}"),
            Self::Resolve(e) => write!(f, "{e}"),
            Self::Json(e) => write!(f, "json error: {e}"),
        }
    }
}

impl std::error::Error for DomainError {}

impl From<ContractViolation> for DomainError {
    fn from(value: ContractViolation) -> Self {
        Self::Contract(value)
    }
}

impl From<StorageError> for DomainError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<ResolveError> for DomainError {
    fn from(value: ResolveError) -> Self {
        Self::Resolve(value)
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
