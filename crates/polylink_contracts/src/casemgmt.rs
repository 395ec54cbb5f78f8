#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::link::{Cardinality, LinkKind, SubjectKey, POLYLINK_CONTRACT_VERSION};
use crate::{ContractViolation, MonotonicTimeNs, SchemaVersion, Validate};

/// Link kind: a case holds many content items, and the same content item may
/// be linked from several cases.
pub const CASE_CONTENT_LINKS: LinkKind = LinkKind {
    table: "case_content_links",
    subject_role: "case",
    target_role: "content",
    links_per_subject: Cardinality::Many,
    subjects_per_target: Cardinality::Many,
    title_pattern: "{subject} contains {target}",
};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CaseId(String);

impl CaseId {
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

impl Validate for CaseId {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.0.trim().is_empty() {
            return Err(ContractViolation::InvalidValue {
                field: "case_id",
                reason: "must not be empty",
            });
        }
        if self.0.len() > 64 {
            return Err(ContractViolation::InvalidValue {
                field: "case_id",
                reason: "must be <= 64 chars",
            });
        }
        if !self.0.is_ascii() {
            return Err(ContractViolation::InvalidValue {
                field: "case_id",
                reason: "must be ASCII",
            });
        }
        Ok(())
    }
}

impl SubjectKey for CaseId {
    fn subject_key(&self) -> &str {
        self.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub schema_version: SchemaVersion,
    pub case_id: CaseId,
    pub name: String,
    pub created_at: MonotonicTimeNs,
}

impl CaseRecord {
    pub fn v1(
        case_id: CaseId,
        name: impl Into<String>,
        created_at: MonotonicTimeNs,
    ) -> Result<Self, ContractViolation> {
        let r = Self {
            schema_version: POLYLINK_CONTRACT_VERSION,
            case_id,
            name: name.into(),
            created_at,
        };
        r.validate()?;
        Ok(r)
    }
}

impl Validate for CaseRecord {
    fn validate(&self) -> Result<(), ContractViolation> {
        self.case_id.validate()?;
        if self.name.trim().is_empty() {
            return Err(ContractViolation::InvalidValue {
                field: "cases.name",
                reason: "must not be empty",
            });
        }
        if self.name.len() > 40 {
            return Err(ContractViolation::InvalidValue {
                field: "cases.name",
                reason: "must be <= 40 chars",
            });
        }
        Ok(())
    }
}
