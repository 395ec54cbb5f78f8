#![forbid(unsafe_code)]

//! Type-tag -> repository resolution for polymorphic link targets.
//!
//! A link row only stores a `(TypeTag, TargetIdentifier)` pair; turning that
//! back into a concrete object requires a registry of per-tag lookup
//! functions, supplied by the application wiring. Unregistered tags are a hard
//! error, never a silent miss.

use std::collections::BTreeMap;
use std::fmt;

use polylink_contracts::link::{PolymorphicLink, TargetIdentifier, TargetRef, TypeTag};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    UnknownTypeTag {
        object_type: String,
    },
    TargetNotFound {
        object_type: String,
        identifier: String,
    },
    DuplicateResolver {
        object_type: String,
    },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTypeTag { object_type } => {
                write!(f, "no resolver registered for type tag: {object_type}")
            }
            Self::TargetNotFound {
                object_type,
                identifier,
            } => {
                write!(f, "target not found: {object_type}/{identifier}")
            }
            Self::DuplicateResolver { object_type } => {
                write!(f, "resolver already registered for type tag: {object_type}")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

type LookupFn<'a, T> = Box<dyn Fn(&TargetIdentifier) -> Option<T> + 'a>;

/// Registry mapping type tags to repository lookup functions.
///
/// Built per call site over borrowed repositories; there is no process-wide
/// registry state.
pub struct TargetResolver<'a, T> {
    repositories: BTreeMap<TypeTag, LookupFn<'a, T>>,
}

impl<'a, T> TargetResolver<'a, T> {
    pub fn new() -> Self {
        Self {
            repositories: BTreeMap::new(),
        }
    }

    pub fn register(
        &mut self,
        tag: TypeTag,
        lookup: impl Fn(&TargetIdentifier) -> Option<T> + 'a,
    ) -> Result<(), ResolveError> {
        if self.repositories.contains_key(&tag) {
            return Err(ResolveError::DuplicateResolver {
                object_type: tag.as_str().to_string(),
            });
        }
        self.repositories.insert(tag, Box::new(lookup));
        Ok(())
    }

    pub fn registered_tags(&self) -> Vec<&TypeTag> {
        self.repositories.keys().collect()
    }

    pub fn resolve(&self, target: &TargetRef) -> Result<T, ResolveError> {
        let lookup = self.repositories.get(&target.object_type).ok_or_else(|| {
            ResolveError::UnknownTypeTag {
                object_type: target.object_type.as_str().to_string(),
            }
        })?;
        lookup(&target.identifier).ok_or_else(|| ResolveError::TargetNotFound {
            object_type: target.object_type.as_str().to_string(),
            identifier: target.identifier.as_str().to_string(),
        })
    }

    pub fn resolve_link<S>(&self, link: &PolymorphicLink<S>) -> Result<T, ResolveError> {
        self.resolve(&link.target)
    }
}

impl<'a, T> Default for TargetResolver<'a, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> fmt::Debug for TargetResolver<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetResolver")
            .field("registered_tags", &self.repositories.keys())
            .finish()
    }
}
