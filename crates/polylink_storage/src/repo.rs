#![forbid(unsafe_code)]

use polylink_contracts::casemgmt::{CaseId, CaseRecord};
use polylink_contracts::comms::{CommunicationChannelId, CommunicationChannelRecord};
use polylink_contracts::link::{PolymorphicLink, TargetRef};
use polylink_contracts::party::{PartyId, PartyRecord};

use crate::store::{PolyStore, StorageError};

/// Typed repository interface for the party directory.
pub trait PartyDirectoryRepo {
    fn insert_party_row(&mut self, record: PartyRecord) -> Result<(), StorageError>;
    fn party_row(&self, party_id: &PartyId) -> Option<&PartyRecord>;
    fn party_row_by_name(&self, name: &str) -> Option<&PartyRecord>;
    fn party_rows(&self) -> Vec<&PartyRecord>;
}

/// Typed repository interface for communication channels and their
/// polymorphic owner links.
pub trait CommsChannelOwnerRepo {
    fn insert_channel_row(
        &mut self,
        record: CommunicationChannelRecord,
    ) -> Result<(), StorageError>;
    fn channel_row(
        &self,
        channel_id: &CommunicationChannelId,
    ) -> Option<&CommunicationChannelRecord>;
    fn remove_channel_row(&mut self, channel_id: &CommunicationChannelId) -> bool;

    fn insert_owner_link_row(
        &mut self,
        link: PolymorphicLink<CommunicationChannelId>,
    ) -> Result<(), StorageError>;
    fn owner_link_by_channel(
        &self,
        channel_id: &CommunicationChannelId,
    ) -> Option<&PolymorphicLink<CommunicationChannelId>>;
    fn owner_links_by_owner(
        &self,
        owner: &TargetRef,
    ) -> Vec<&PolymorphicLink<CommunicationChannelId>>;
    fn remove_owner_link_row(
        &mut self,
        channel_id: &CommunicationChannelId,
        owner: &TargetRef,
    ) -> bool;
}

/// Typed repository interface for cases and their polymorphic content links.
pub trait CaseContentRepo {
    fn insert_case_row(&mut self, record: CaseRecord) -> Result<(), StorageError>;
    fn case_row(&self, case_id: &CaseId) -> Option<&CaseRecord>;
    fn case_row_by_name(&self, name: &str) -> Option<&CaseRecord>;
    fn case_rows(&self) -> Vec<&CaseRecord>;

    fn insert_content_link_row(
        &mut self,
        link: PolymorphicLink<CaseId>,
    ) -> Result<(), StorageError>;
    fn content_links_by_case(&self, case_id: &CaseId) -> Vec<&PolymorphicLink<CaseId>>;
    fn content_links_by_content(&self, content: &TargetRef) -> Vec<&PolymorphicLink<CaseId>>;
    fn remove_content_link_row(&mut self, case_id: &CaseId, content: &TargetRef) -> bool;
}

impl PartyDirectoryRepo for PolyStore {
    fn insert_party_row(&mut self, record: PartyRecord) -> Result<(), StorageError> {
        self.insert_party(record)
    }

    fn party_row(&self, party_id: &PartyId) -> Option<&PartyRecord> {
        self.get_party(party_id)
    }

    fn party_row_by_name(&self, name: &str) -> Option<&PartyRecord> {
        self.get_party_by_name(name)
    }

    fn party_rows(&self) -> Vec<&PartyRecord> {
        self.parties().collect()
    }
}

impl CommsChannelOwnerRepo for PolyStore {
    fn insert_channel_row(
        &mut self,
        record: CommunicationChannelRecord,
    ) -> Result<(), StorageError> {
        self.insert_communication_channel(record)
    }

    fn channel_row(
        &self,
        channel_id: &CommunicationChannelId,
    ) -> Option<&CommunicationChannelRecord> {
        self.get_communication_channel(channel_id)
    }

    fn remove_channel_row(&mut self, channel_id: &CommunicationChannelId) -> bool {
        self.remove_communication_channel(channel_id)
    }

    fn insert_owner_link_row(
        &mut self,
        link: PolymorphicLink<CommunicationChannelId>,
    ) -> Result<(), StorageError> {
        self.insert_comms_owner_link(link)
    }

    fn owner_link_by_channel(
        &self,
        channel_id: &CommunicationChannelId,
    ) -> Option<&PolymorphicLink<CommunicationChannelId>> {
        self.comms_owner_link_by_channel(channel_id)
    }

    fn owner_links_by_owner(
        &self,
        owner: &TargetRef,
    ) -> Vec<&PolymorphicLink<CommunicationChannelId>> {
        self.comms_owner_links_by_owner(owner)
    }

    fn remove_owner_link_row(
        &mut self,
        channel_id: &CommunicationChannelId,
        owner: &TargetRef,
    ) -> bool {
        self.remove_comms_owner_link(channel_id, owner)
    }
}

impl CaseContentRepo for PolyStore {
    fn insert_case_row(&mut self, record: CaseRecord) -> Result<(), StorageError> {
        self.insert_case(record)
    }

    fn case_row(&self, case_id: &CaseId) -> Option<&CaseRecord> {
        self.get_case(case_id)
    }

    fn case_row_by_name(&self, name: &str) -> Option<&CaseRecord> {
        self.get_case_by_name(name)
    }

    fn case_rows(&self) -> Vec<&CaseRecord> {
        self.cases().collect()
    }

    fn insert_content_link_row(
        &mut self,
        link: PolymorphicLink<CaseId>,
    ) -> Result<(), StorageError> {
        self.insert_case_content_link(link)
    }

    fn content_links_by_case(&self, case_id: &CaseId) -> Vec<&PolymorphicLink<CaseId>> {
        self.case_content_links_by_case(case_id)
    }

    fn content_links_by_content(&self, content: &TargetRef) -> Vec<&PolymorphicLink<CaseId>> {
        self.case_content_links_by_content(content)
    }

    fn remove_content_link_row(&mut self, case_id: &CaseId, content: &TargetRef) -> bool {
        self.remove_case_content_link(case_id, content)
    }
}
