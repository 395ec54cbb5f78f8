#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::link::{Cardinality, LinkKind, SubjectKey, POLYLINK_CONTRACT_VERSION};
use crate::{ContractViolation, MonotonicTimeNs, SchemaVersion, Validate};

/// Link kind: a communication channel is owned by exactly one polymorphic
/// owner, while one owner may hold many channels.
pub const COMMS_CHANNEL_OWNER_LINKS: LinkKind = LinkKind {
    table: "comms_channel_owner_links",
    subject_role: "communication_channel",
    target_role: "owner",
    links_per_subject: Cardinality::AtMostOne,
    subjects_per_target: Cardinality::Many,
    title_pattern: "{target} owns {subject}",
};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CommunicationChannelId(String);

impl CommunicationChannelId {
    pub fn new(id: impl Into<String>) -> Result<Self, ContractViolation> {
        let id = id.into();
        let v = Self(id);
        v.validate()?;
        Ok(v)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Validate for CommunicationChannelId {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.0.trim().is_empty() {
            return Err(ContractViolation::InvalidValue {
                field: "communication_channel_id",
                reason: "must not be empty",
            });
        }
        if self.0.len() > 64 {
            return Err(ContractViolation::InvalidValue {
                field: "communication_channel_id",
                reason: "must be <= 64 chars",
            });
        }
        if !self.0.is_ascii() {
            return Err(ContractViolation::InvalidValue {
                field: "communication_channel_id",
                reason: "must be ASCII",
            });
        }
        Ok(())
    }
}

impl SubjectKey for CommunicationChannelId {
    fn subject_key(&self) -> &str {
        self.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunicationChannelRecord {
    pub schema_version: SchemaVersion,
    pub channel_id: CommunicationChannelId,
    pub details: String,
    pub created_at: MonotonicTimeNs,
}

impl CommunicationChannelRecord {
    pub fn v1(
        channel_id: CommunicationChannelId,
        details: impl Into<String>,
        created_at: MonotonicTimeNs,
    ) -> Result<Self, ContractViolation> {
        let r = Self {
            schema_version: POLYLINK_CONTRACT_VERSION,
            channel_id,
            details: details.into(),
            created_at,
        };
        r.validate()?;
        Ok(r)
    }
}

impl Validate for CommunicationChannelRecord {
    fn validate(&self) -> Result<(), ContractViolation> {
        self.channel_id.validate()?;
        if self.details.trim().is_empty() {
            return Err(ContractViolation::InvalidValue {
                field: "communication_channels.details",
                reason: "must not be empty",
            });
        }
        if self.details.len() > 255 {
            return Err(ContractViolation::InvalidValue {
                field: "communication_channels.details",
                reason: "must be <= 255 chars",
            });
        }
        Ok(())
    }
}
