#![forbid(unsafe_code)]

pub mod casemgmt;
pub mod comms;
pub mod common;
pub mod link;
pub mod party;

pub use common::{ContractViolation, MonotonicTimeNs, SchemaVersion, Validate};
