#![forbid(unsafe_code)]

//! Tagged unions for the polymorphic target roles, plus the resolver wiring
//! that maps each registered type tag onto a store-backed lookup.
//!
//! Only parties implement the two target roles today; adding a new target
//! type means one new union variant and one `register` call, nothing else.

use polylink_contracts::link::TypeTag;
use polylink_contracts::party::{PartyId, PartyRecord, OBJECT_TYPE_PARTY};
use polylink_resolve::TargetResolver;
use polylink_storage::PolyStore;

use crate::error::DomainError;

/// Content item linked into a case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseContentObject {
    Party(PartyRecord),
}

impl CaseContentObject {
    pub fn title(&self) -> &str {
        match self {
            Self::Party(p) => &p.name,
        }
    }
}

/// Owner of a communication channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelOwner {
    Party(PartyRecord),
}

impl ChannelOwner {
    pub fn title(&self) -> &str {
        match self {
            Self::Party(p) => &p.name,
        }
    }
}

fn party_lookup(store: &PolyStore, id: &str) -> Option<PartyRecord> {
    PartyId::new(id).ok().and_then(|pid| store.get_party(&pid).cloned())
}

pub fn case_content_resolver(
    store: &PolyStore,
) -> Result<TargetResolver<'_, CaseContentObject>, DomainError> {
    let mut resolver = TargetResolver::new();
    resolver.register(TypeTag::new(OBJECT_TYPE_PARTY)?, |id| {
        party_lookup(store, id.as_str()).map(CaseContentObject::Party)
    })?;
    Ok(resolver)
}

pub fn channel_owner_resolver(
    store: &PolyStore,
) -> Result<TargetResolver<'_, ChannelOwner>, DomainError> {
    let mut resolver = TargetResolver::new();
    resolver.register(TypeTag::new(OBJECT_TYPE_PARTY)?, |id| {
        party_lookup(store, id.as_str()).map(ChannelOwner::Party)
    })?;
    Ok(resolver)
}
