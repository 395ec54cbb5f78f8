#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use polylink_contracts::casemgmt::{CaseId, CaseRecord, CASE_CONTENT_LINKS};
use polylink_contracts::comms::{
    CommunicationChannelId, CommunicationChannelRecord, COMMS_CHANNEL_OWNER_LINKS,
};
use polylink_contracts::link::{Cardinality, LinkKind, PolymorphicLink, SubjectKey, TargetRef};
use polylink_contracts::party::{PartyId, PartyRecord};
use polylink_contracts::{ContractViolation, Validate};

#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// The (subject, target type, target identifier) triple already exists.
    DuplicateAssociation { table: &'static str, key: String },
    DuplicateKey { table: &'static str, key: String },
    ForeignKeyViolation { table: &'static str, key: String },
    /// An insert would exceed the link kind's configured cardinality; `role`
    /// names the constrained side (the kind's subject or target role).
    CardinalityViolation {
        table: &'static str,
        role: &'static str,
        key: String,
    },
    ContractViolation(ContractViolation),
}

impl From<ContractViolation> for StorageError {
    fn from(v: ContractViolation) -> Self {
        StorageError::ContractViolation(v)
    }
}

fn triple_key<S: SubjectKey>(link: &PolymorphicLink<S>) -> String {
    format!(
        "{}:{}:{}",
        link.subject.subject_key(),
        link.target.object_type.as_str(),
        link.target.identifier.as_str()
    )
}

/// One uniqueness-constrained table of polymorphic link rows.
///
/// Rows are keyed by (subject, target), which makes iteration order
/// deterministic for a fixed data state. The kind's cardinality policy is
/// enforced on insert; the storage layer cannot lean on a foreign key for the
/// target side, so the triple constraint lives here.
#[derive(Debug, Clone)]
pub struct LinkTable<S: SubjectKey> {
    kind: LinkKind,
    rows: BTreeMap<(S, TargetRef), PolymorphicLink<S>>,
}

impl<S: SubjectKey> LinkTable<S> {
    pub fn new(kind: LinkKind) -> Self {
        Self {
            kind,
            rows: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> &LinkKind {
        &self.kind
    }

    pub fn insert(&mut self, link: PolymorphicLink<S>) -> Result<(), StorageError> {
        link.validate()?;
        let key = (link.subject.clone(), link.target.clone());
        if self.rows.contains_key(&key) {
            return Err(StorageError::DuplicateAssociation {
                table: self.kind.table,
                key: triple_key(&link),
            });
        }
        if self.kind.links_per_subject == Cardinality::AtMostOne
            && self.rows.keys().any(|(s, _)| *s == link.subject)
        {
            return Err(StorageError::CardinalityViolation {
                table: self.kind.table,
                role: self.kind.subject_role,
                key: link.subject.subject_key().to_string(),
            });
        }
        if self.kind.subjects_per_target == Cardinality::AtMostOne
            && self.rows.keys().any(|(_, t)| *t == link.target)
        {
            return Err(StorageError::CardinalityViolation {
                table: self.kind.table,
                role: self.kind.target_role,
                key: format!(
                    "{}:{}",
                    link.target.object_type.as_str(),
                    link.target.identifier.as_str()
                ),
            });
        }
        self.rows.insert(key, link);
        Ok(())
    }

    pub fn find_by_subject(&self, subject: &S) -> Vec<&PolymorphicLink<S>> {
        self.rows
            .values()
            .filter(|l| l.subject == *subject)
            .collect()
    }

    pub fn find_by_target(&self, target: &TargetRef) -> Vec<&PolymorphicLink<S>> {
        self.rows
            .values()
            .filter(|l| l.target == *target)
            .collect()
    }

    /// Single-row target lookup for kinds whose policy permits at most one
    /// link per subject or per target; for `Many` kinds it returns the first
    /// row in table order.
    pub fn find_one_by_target(&self, target: &TargetRef) -> Option<&PolymorphicLink<S>> {
        self.rows.values().find(|l| l.target == *target)
    }

    /// Idempotent: removing an absent row is a no-op reported as `false`.
    pub fn remove(&mut self, subject: &S, target: &TargetRef) -> bool {
        self.rows
            .remove(&(subject.clone(), target.clone()))
            .is_some()
    }

    pub fn rows(&self) -> impl Iterator<Item = &PolymorphicLink<S>> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// In-memory store backing the demo domain: entity tables plus one link table
/// per association kind.
#[derive(Debug, Clone)]
pub struct PolyStore {
    parties: BTreeMap<PartyId, PartyRecord>,
    party_name_index: BTreeMap<String, PartyId>,
    cases: BTreeMap<CaseId, CaseRecord>,
    case_name_index: BTreeMap<String, CaseId>,
    communication_channels: BTreeMap<CommunicationChannelId, CommunicationChannelRecord>,
    comms_channel_owner_links: LinkTable<CommunicationChannelId>,
    case_content_links: LinkTable<CaseId>,
}

impl PolyStore {
    pub fn new_in_memory() -> Self {
        Self {
            parties: BTreeMap::new(),
            party_name_index: BTreeMap::new(),
            cases: BTreeMap::new(),
            case_name_index: BTreeMap::new(),
            communication_channels: BTreeMap::new(),
            comms_channel_owner_links: LinkTable::new(COMMS_CHANNEL_OWNER_LINKS),
            case_content_links: LinkTable::new(CASE_CONTENT_LINKS),
        }
    }

    pub fn insert_party(&mut self, record: PartyRecord) -> Result<(), StorageError> {
        record.validate()?;
        if self.parties.contains_key(&record.party_id) {
            return Err(StorageError::DuplicateKey {
                table: "parties",
                key: record.party_id.as_str().to_string(),
            });
        }
        if self.party_name_index.contains_key(&record.name) {
            return Err(StorageError::DuplicateKey {
                table: "parties.name",
                key: record.name.clone(),
            });
        }
        self.party_name_index
            .insert(record.name.clone(), record.party_id.clone());
        self.parties.insert(record.party_id.clone(), record);
        Ok(())
    }

    pub fn get_party(&self, party_id: &PartyId) -> Option<&PartyRecord> {
        self.parties.get(party_id)
    }

    pub fn get_party_by_name(&self, name: &str) -> Option<&PartyRecord> {
        self.party_name_index
            .get(name)
            .and_then(|id| self.parties.get(id))
    }

    pub fn parties(&self) -> impl Iterator<Item = &PartyRecord> {
        self.parties.values()
    }

    pub fn insert_case(&mut self, record: CaseRecord) -> Result<(), StorageError> {
        record.validate()?;
        if self.cases.contains_key(&record.case_id) {
            return Err(StorageError::DuplicateKey {
                table: "cases",
                key: record.case_id.as_str().to_string(),
            });
        }
        if self.case_name_index.contains_key(&record.name) {
            return Err(StorageError::DuplicateKey {
                table: "cases.name",
                key: record.name.clone(),
            });
        }
        self.case_name_index
            .insert(record.name.clone(), record.case_id.clone());
        self.cases.insert(record.case_id.clone(), record);
        Ok(())
    }

    pub fn get_case(&self, case_id: &CaseId) -> Option<&CaseRecord> {
        self.cases.get(case_id)
    }

    pub fn get_case_by_name(&self, name: &str) -> Option<&CaseRecord> {
        self.case_name_index
            .get(name)
            .and_then(|id| self.cases.get(id))
    }

    pub fn cases(&self) -> impl Iterator<Item = &CaseRecord> {
        self.cases.values()
    }

    pub fn insert_communication_channel(
        &mut self,
        record: CommunicationChannelRecord,
    ) -> Result<(), StorageError> {
        record.validate()?;
        if self.communication_channels.contains_key(&record.channel_id) {
            return Err(StorageError::DuplicateKey {
                table: "communication_channels",
                key: record.channel_id.as_str().to_string(),
            });
        }
        self.communication_channels
            .insert(record.channel_id.clone(), record);
        Ok(())
    }

    pub fn get_communication_channel(
        &self,
        channel_id: &CommunicationChannelId,
    ) -> Option<&CommunicationChannelRecord> {
        self.communication_channels.get(channel_id)
    }

    /// Idempotent, mirroring link removal.
    pub fn remove_communication_channel(&mut self, channel_id: &CommunicationChannelId) -> bool {
        self.communication_channels.remove(channel_id).is_some()
    }

    pub fn insert_comms_owner_link(
        &mut self,
        link: PolymorphicLink<CommunicationChannelId>,
    ) -> Result<(), StorageError> {
        if !self.communication_channels.contains_key(&link.subject) {
            return Err(StorageError::ForeignKeyViolation {
                table: "comms_channel_owner_links.communication_channel",
                key: link.subject.as_str().to_string(),
            });
        }
        self.comms_channel_owner_links.insert(link)
    }

    pub fn comms_owner_link_by_channel(
        &self,
        channel_id: &CommunicationChannelId,
    ) -> Option<&PolymorphicLink<CommunicationChannelId>> {
        // links_per_subject is AtMostOne for this kind, so first match is the
        // only match.
        self.comms_channel_owner_links
            .find_by_subject(channel_id)
            .into_iter()
            .next()
    }

    pub fn comms_owner_links_by_owner(
        &self,
        owner: &TargetRef,
    ) -> Vec<&PolymorphicLink<CommunicationChannelId>> {
        self.comms_channel_owner_links.find_by_target(owner)
    }

    pub fn remove_comms_owner_link(
        &mut self,
        channel_id: &CommunicationChannelId,
        owner: &TargetRef,
    ) -> bool {
        self.comms_channel_owner_links.remove(channel_id, owner)
    }

    pub fn comms_owner_links(&self) -> &LinkTable<CommunicationChannelId> {
        &self.comms_channel_owner_links
    }

    pub fn insert_case_content_link(
        &mut self,
        link: PolymorphicLink<CaseId>,
    ) -> Result<(), StorageError> {
        if !self.cases.contains_key(&link.subject) {
            return Err(StorageError::ForeignKeyViolation {
                table: "case_content_links.case",
                key: link.subject.as_str().to_string(),
            });
        }
        self.case_content_links.insert(link)
    }

    pub fn case_content_links_by_case(&self, case_id: &CaseId) -> Vec<&PolymorphicLink<CaseId>> {
        self.case_content_links.find_by_subject(case_id)
    }

    pub fn case_content_links_by_content(
        &self,
        content: &TargetRef,
    ) -> Vec<&PolymorphicLink<CaseId>> {
        self.case_content_links.find_by_target(content)
    }

    pub fn remove_case_content_link(&mut self, case_id: &CaseId, content: &TargetRef) -> bool {
        self.case_content_links.remove(case_id, content)
    }

    pub fn case_content_link_table(&self) -> &LinkTable<CaseId> {
        &self.case_content_links
    }
}
