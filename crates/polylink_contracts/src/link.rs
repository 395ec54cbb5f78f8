#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::{ContractViolation, MonotonicTimeNs, SchemaVersion, Validate};

pub const POLYLINK_CONTRACT_VERSION: SchemaVersion = SchemaVersion(1);

/// String tag naming the concrete type a target identifier resolves against.
///
/// The tag is the only type information a link row carries about its target;
/// the tag -> repository mapping lives outside the link abstraction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeTag(String);

impl TypeTag {
    pub fn new(tag: impl Into<String>) -> Result<Self, ContractViolation> {
        let tag = tag.into();
        let v = Self(tag);
        v.validate()?;
        Ok(v)
    }

    /// Caller guarantees the value already passed a contract check at least as
    /// strict as `TypeTag::validate`.
    pub(crate) fn from_validated(tag: &str) -> Self {
        Self(tag.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Validate for TypeTag {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.0.trim().is_empty() {
            return Err(ContractViolation::InvalidValue {
                field: "type_tag",
                reason: "must not be empty",
            });
        }
        if self.0.len() > 255 {
            return Err(ContractViolation::InvalidValue {
                field: "type_tag",
                reason: "must be <= 255 chars",
            });
        }
        if !self.0.is_ascii() {
            return Err(ContractViolation::InvalidValue {
                field: "type_tag",
                reason: "must be ASCII",
            });
        }
        Ok(())
    }
}

/// Identifier of a target instance within its type's repository.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TargetIdentifier(String);

impl TargetIdentifier {
    pub fn new(id: impl Into<String>) -> Result<Self, ContractViolation> {
        let id = id.into();
        let v = Self(id);
        v.validate()?;
        Ok(v)
    }

    /// Caller guarantees the value already passed a contract check at least as
    /// strict as `TargetIdentifier::validate`.
    pub(crate) fn from_validated(id: &str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Validate for TargetIdentifier {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.0.trim().is_empty() {
            return Err(ContractViolation::InvalidValue {
                field: "target_identifier",
                reason: "must not be empty",
            });
        }
        if self.0.len() > 255 {
            return Err(ContractViolation::InvalidValue {
                field: "target_identifier",
                reason: "must be <= 255 chars",
            });
        }
        if !self.0.is_ascii() {
            return Err(ContractViolation::InvalidValue {
                field: "target_identifier",
                reason: "must be ASCII",
            });
        }
        Ok(())
    }
}

/// Type-erased reference to a target entity: (type tag, identifier).
///
/// A stable substitute for a direct reference; resolving it back to a concrete
/// object requires an external tag -> repository mapping.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TargetRef {
    pub object_type: TypeTag,
    pub identifier: TargetIdentifier,
}

impl TargetRef {
    pub fn new(object_type: TypeTag, identifier: TargetIdentifier) -> Self {
        Self {
            object_type,
            identifier,
        }
    }
}

impl Validate for TargetRef {
    fn validate(&self) -> Result<(), ContractViolation> {
        self.object_type.validate()?;
        self.identifier.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    AtMostOne,
    Many,
}

/// Per-kind configuration of a polymorphic link table.
///
/// One concrete association kind = one `LinkKind` value, not one new type.
/// Cardinality is configured on both sides because the kinds shipped so far
/// disagree: a communication channel has exactly one owner link, while a case
/// holds many content links and a content item may sit in several cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkKind {
    pub table: &'static str,
    pub subject_role: &'static str,
    pub target_role: &'static str,
    pub links_per_subject: Cardinality,
    pub subjects_per_target: Cardinality,
    pub title_pattern: &'static str,
}

impl LinkKind {
    pub fn title(&self, subject: &str, target: &str) -> String {
        self.title_pattern
            .replace("{subject}", subject)
            .replace("{target}", target)
    }
}

/// Key type usable as the subject of a polymorphic link table.
pub trait SubjectKey: Ord + Clone {
    fn subject_key(&self) -> &str;
}

/// One persisted association row: subject S points at a type-erased target.
///
/// A link has no identity of its own beyond the (subject, target) pair it
/// encodes; the triple (subject, target type, target identifier) is unique
/// within a link table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolymorphicLink<S> {
    pub schema_version: SchemaVersion,
    pub subject: S,
    pub target: TargetRef,
    pub created_at: MonotonicTimeNs,
}

impl<S> PolymorphicLink<S> {
    pub fn v1(subject: S, target: TargetRef, created_at: MonotonicTimeNs) -> Self {
        Self {
            schema_version: POLYLINK_CONTRACT_VERSION,
            subject,
            target,
            created_at,
        }
    }
}

impl<S> Validate for PolymorphicLink<S> {
    fn validate(&self) -> Result<(), ContractViolation> {
        self.target.validate()
    }
}
