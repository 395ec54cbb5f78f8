#![forbid(unsafe_code)]

use polylink_contracts::casemgmt::{CaseId, CaseRecord};
use polylink_contracts::link::{PolymorphicLink, TargetRef};
use polylink_contracts::MonotonicTimeNs;
use polylink_storage::repo::CaseContentRepo;
use polylink_storage::PolyStore;

use crate::content::{case_content_resolver, CaseContentObject};
use crate::error::DomainError;

/// Case management operations over the case-content link kind.
pub struct Cases;

impl Cases {
    pub fn create(
        store: &mut PolyStore,
        case_id: CaseId,
        name: &str,
        at: MonotonicTimeNs,
    ) -> Result<CaseRecord, DomainError> {
        let record = CaseRecord::v1(case_id, name, at)?;
        store.insert_case_row(record.clone())?;
        Ok(record)
    }

    pub fn add_content(
        store: &mut PolyStore,
        case_id: &CaseId,
        content: TargetRef,
        at: MonotonicTimeNs,
    ) -> Result<PolymorphicLink<CaseId>, DomainError> {
        store
            .case_row(case_id)
            .ok_or_else(|| DomainError::UnknownCase(case_id.as_str().to_string()))?;

        let link = PolymorphicLink::v1(case_id.clone(), content, at);
        store.insert_content_link_row(link.clone())?;
        Ok(link)
    }

    /// Idempotent on the link itself; an unknown case is still an error.
    pub fn remove_content(
        store: &mut PolyStore,
        case_id: &CaseId,
        content: &TargetRef,
    ) -> Result<bool, DomainError> {
        store
            .case_row(case_id)
            .ok_or_else(|| DomainError::UnknownCase(case_id.as_str().to_string()))?;
        Ok(store.remove_content_link_row(case_id, content))
    }

    /// Derived collection: the case's content links resolved to concrete
    /// objects. A dangling link surfaces as `TargetNotFound`; the caller
    /// decides whether that means an orphaned link.
    pub fn contents(
        store: &PolyStore,
        case_id: &CaseId,
    ) -> Result<Vec<CaseContentObject>, DomainError> {
        store
            .case_row(case_id)
            .ok_or_else(|| DomainError::UnknownCase(case_id.as_str().to_string()))?;

        let resolver = case_content_resolver(store)?;
        let mut out = Vec::new();
        for link in store.content_links_by_case(case_id) {
            out.push(resolver.resolve_link(link)?);
        }
        Ok(out)
    }

    /// Reverse lookup: every case holding a link to the given content item.
    pub fn cases_containing(store: &PolyStore, content: &TargetRef) -> Vec<CaseRecord> {
        store
            .content_links_by_content(content)
            .into_iter()
            .filter_map(|l| store.case_row(&l.subject).cloned())
            .collect()
    }
}
