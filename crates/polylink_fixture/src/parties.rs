#![forbid(unsafe_code)]

use polylink_contracts::comms::{CommunicationChannelId, CommunicationChannelRecord};
use polylink_contracts::link::PolymorphicLink;
use polylink_contracts::party::{PartyId, PartyRecord};
use polylink_contracts::MonotonicTimeNs;
use polylink_storage::repo::{CommsChannelOwnerRepo, PartyDirectoryRepo};
use polylink_storage::PolyStore;

use crate::content::{channel_owner_resolver, ChannelOwner};
use crate::error::DomainError;

/// Party directory operations. All repositories are explicit parameters;
/// there is no injected service state.
pub struct Parties;

impl Parties {
    pub fn create(
        store: &mut PolyStore,
        party_id: PartyId,
        name: &str,
        at: MonotonicTimeNs,
    ) -> Result<PartyRecord, DomainError> {
        let record = PartyRecord::v1(party_id, name, at)?;
        store.insert_party_row(record.clone())?;
        Ok(record)
    }

    /// Creates the channel row and the owner link in one step. A party may
    /// not hold two channels with the same details string.
    pub fn add_communication_channel(
        store: &mut PolyStore,
        party_id: &PartyId,
        channel_id: CommunicationChannelId,
        details: &str,
        at: MonotonicTimeNs,
    ) -> Result<PolymorphicLink<CommunicationChannelId>, DomainError> {
        let owner = store
            .party_row(party_id)
            .cloned()
            .ok_or_else(|| DomainError::UnknownParty(party_id.as_str().to_string()))?;

        for existing in Self::communication_channels(store, party_id)? {
            if existing.details == details {
                return Err(DomainError::DuplicateChannelDetails {
                    owner: owner.name.clone(),
                    details: details.to_string(),
                });
            }
        }

        let channel = CommunicationChannelRecord::v1(channel_id.clone(), details, at)?;
        store.insert_channel_row(channel)?;

        let link = PolymorphicLink::v1(channel_id, owner.target_ref(), at);
        if let Err(e) = store.insert_owner_link_row(link.clone()) {
            // Keep channel and link creation all-or-nothing.
            store.remove_channel_row(&link.subject);
            return Err(e.into());
        }
        Ok(link)
    }

    /// Removes the owner link and the channel row. Absent channel is a no-op;
    /// a channel owned by a different party is an error, not a removal.
    pub fn remove_communication_channel(
        store: &mut PolyStore,
        party_id: &PartyId,
        channel_id: &CommunicationChannelId,
    ) -> Result<bool, DomainError> {
        let owner = store
            .party_row(party_id)
            .cloned()
            .ok_or_else(|| DomainError::UnknownParty(party_id.as_str().to_string()))?;

        let link = match store.owner_link_by_channel(channel_id) {
            Some(l) => l.clone(),
            None => return Ok(false),
        };
        if link.target != owner.target_ref() {
            return Err(DomainError::NotOwnedBy {
                channel: channel_id.as_str().to_string(),
                party: party_id.as_str().to_string(),
            });
        }

        store.remove_owner_link_row(channel_id, &link.target);
        store.remove_channel_row(channel_id);
        Ok(true)
    }

    /// Derived collection: the channels a party owns, via the link table.
    pub fn communication_channels(
        store: &PolyStore,
        party_id: &PartyId,
    ) -> Result<Vec<CommunicationChannelRecord>, DomainError> {
        let owner = store
            .party_row(party_id)
            .ok_or_else(|| DomainError::UnknownParty(party_id.as_str().to_string()))?;

        Ok(store
            .owner_links_by_owner(&owner.target_ref())
            .into_iter()
            .filter_map(|l| store.channel_row(&l.subject).cloned())
            .collect())
    }

    /// Reverse lookup: resolves a channel's owner link back to the concrete
    /// owner object.
    pub fn owner_of(
        store: &PolyStore,
        channel_id: &CommunicationChannelId,
    ) -> Result<Option<ChannelOwner>, DomainError> {
        store
            .channel_row(channel_id)
            .ok_or_else(|| DomainError::UnknownChannel(channel_id.as_str().to_string()))?;

        let link = match store.owner_link_by_channel(channel_id) {
            Some(l) => l,
            None => return Ok(None),
        };
        let resolver = channel_owner_resolver(store)?;
        Ok(Some(resolver.resolve_link(link)?))
    }
}
