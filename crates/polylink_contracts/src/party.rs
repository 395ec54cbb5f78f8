#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::link::{SubjectKey, TargetIdentifier, TargetRef, TypeTag, POLYLINK_CONTRACT_VERSION};
use crate::{ContractViolation, MonotonicTimeNs, SchemaVersion, Validate};

/// Object-type tag under which parties are registered with target resolvers.
pub const OBJECT_TYPE_PARTY: &str = "PARTY";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PartyId(String);

impl PartyId {
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

impl Validate for PartyId {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.0.trim().is_empty() {
            return Err(ContractViolation::InvalidValue {
                field: "party_id",
                reason: "must not be empty",
            });
        }
        if self.0.len() > 64 {
            return Err(ContractViolation::InvalidValue {
                field: "party_id",
                reason: "must be <= 64 chars",
            });
        }
        if !self.0.is_ascii() {
            return Err(ContractViolation::InvalidValue {
                field: "party_id",
                reason: "must be ASCII",
            });
        }
        Ok(())
    }
}

// Parties are targets in the shipped link kinds, but nothing stops a future
// kind from using them as subjects.
impl SubjectKey for PartyId {
    fn subject_key(&self) -> &str {
        self.as_str()
    }
}

/// A party can be both a communication-channel owner and a case content item,
/// so it carries its own `TargetRef` projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyRecord {
    pub schema_version: SchemaVersion,
    pub party_id: PartyId,
    pub name: String,
    pub created_at: MonotonicTimeNs,
}

impl PartyRecord {
    pub fn v1(
        party_id: PartyId,
        name: impl Into<String>,
        created_at: MonotonicTimeNs,
    ) -> Result<Self, ContractViolation> {
        let r = Self {
            schema_version: POLYLINK_CONTRACT_VERSION,
            party_id,
            name: name.into(),
            created_at,
        };
        r.validate()?;
        Ok(r)
    }

    pub fn target_ref(&self) -> TargetRef {
        TargetRef {
            object_type: TypeTag::from_validated(OBJECT_TYPE_PARTY),
            identifier: TargetIdentifier::from_validated(self.party_id.as_str()),
        }
    }
}

impl Validate for PartyRecord {
    fn validate(&self) -> Result<(), ContractViolation> {
        self.party_id.validate()?;
        if self.name.trim().is_empty() {
            return Err(ContractViolation::InvalidValue {
                field: "parties.name",
                reason: "must not be empty",
            });
        }
        if self.name.len() > 40 {
            return Err(ContractViolation::InvalidValue {
                field: "parties.name",
                reason: "must be <= 40 chars",
            });
        }
        Ok(())
    }
}
