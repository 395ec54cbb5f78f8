#![forbid(unsafe_code)]

use polylink_contracts::comms::{CommunicationChannelId, CommunicationChannelRecord};
use polylink_contracts::link::{PolymorphicLink, TargetRef};
use polylink_contracts::party::{PartyId, PartyRecord};
use polylink_contracts::MonotonicTimeNs;
use polylink_storage::repo::{CommsChannelOwnerRepo, PartyDirectoryRepo};
use polylink_storage::{PolyStore, StorageError};

fn party(store: &mut PolyStore, id: &str, name: &str) -> PartyRecord {
    let record = PartyRecord::v1(PartyId::new(id).unwrap(), name, MonotonicTimeNs(1)).unwrap();
    store.insert_party_row(record.clone()).unwrap();
    record
}

fn channel(store: &mut PolyStore, id: &str, details: &str) -> CommunicationChannelId {
    let channel_id = CommunicationChannelId::new(id).unwrap();
    store
        .insert_channel_row(
            CommunicationChannelRecord::v1(channel_id.clone(), details, MonotonicTimeNs(1))
                .unwrap(),
        )
        .unwrap();
    channel_id
}

fn owner_link(
    channel_id: &CommunicationChannelId,
    owner: &TargetRef,
    at: u64,
) -> PolymorphicLink<CommunicationChannelId> {
    PolymorphicLink::v1(channel_id.clone(), owner.clone(), MonotonicTimeNs(at))
}

#[test]
fn at_comms_db_01_owner_link_roundtrip() {
    let mut s = PolyStore::new_in_memory();
    let alice = party(&mut s, "party:alice", "Alice Freeman");
    let chan = channel(&mut s, "chan-1", "alice@example.com");
    let owner = alice.target_ref();

    s.insert_owner_link_row(owner_link(&chan, &owner, 2)).unwrap();

    // Symmetric lookup: by subject and by target agree.
    let by_channel = s.owner_link_by_channel(&chan).unwrap();
    assert_eq!(by_channel.target, owner);
    let by_owner = s.owner_links_by_owner(&owner);
    assert_eq!(by_owner.len(), 1);
    assert_eq!(by_owner[0].subject, chan);

    assert!(s.remove_owner_link_row(&chan, &owner));
    assert!(s.owner_link_by_channel(&chan).is_none());
    assert!(s.owner_links_by_owner(&owner).is_empty());
}

#[test]
fn at_comms_db_02_duplicate_owner_link_rejected() {
    let mut s = PolyStore::new_in_memory();
    let alice = party(&mut s, "party:alice", "Alice Freeman");
    let chan = channel(&mut s, "chan-1", "alice@example.com");
    let owner = alice.target_ref();

    s.insert_owner_link_row(owner_link(&chan, &owner, 2)).unwrap();
    let err = s
        .insert_owner_link_row(owner_link(&chan, &owner, 3))
        .unwrap_err();

    assert!(matches!(err, StorageError::DuplicateAssociation { .. }));
    assert_eq!(s.comms_owner_links().len(), 1);
}

#[test]
fn at_comms_db_03_channel_cannot_gain_a_second_owner() {
    let mut s = PolyStore::new_in_memory();
    let alice = party(&mut s, "party:alice", "Alice Freeman");
    let bob = party(&mut s, "party:bob", "Bob Whitfield");
    let chan = channel(&mut s, "chan-1", "shared@example.com");

    s.insert_owner_link_row(owner_link(&chan, &alice.target_ref(), 2))
        .unwrap();
    let err = s
        .insert_owner_link_row(owner_link(&chan, &bob.target_ref(), 3))
        .unwrap_err();

    assert!(matches!(
        err,
        StorageError::CardinalityViolation {
            role: "communication_channel",
            ..
        }
    ));
    // The original owner link is intact.
    assert_eq!(
        s.owner_link_by_channel(&chan).unwrap().target,
        alice.target_ref()
    );
}

#[test]
fn at_comms_db_04_owner_link_requires_existing_channel() {
    let mut s = PolyStore::new_in_memory();
    let alice = party(&mut s, "party:alice", "Alice Freeman");

    let ghost = CommunicationChannelId::new("chan-ghost").unwrap();
    let err = s
        .insert_owner_link_row(owner_link(&ghost, &alice.target_ref(), 2))
        .unwrap_err();

    assert_eq!(
        err,
        StorageError::ForeignKeyViolation {
            table: "comms_channel_owner_links.communication_channel",
            key: "chan-ghost".to_string(),
        }
    );
}

#[test]
fn at_comms_db_05_owner_side_lists_every_channel() {
    let mut s = PolyStore::new_in_memory();
    let alice = party(&mut s, "party:alice", "Alice Freeman");
    let owner = alice.target_ref();

    let email = channel(&mut s, "chan-email", "alice@example.com");
    let phone = channel(&mut s, "chan-phone", "+44 555 0100");
    s.insert_owner_link_row(owner_link(&email, &owner, 2)).unwrap();
    s.insert_owner_link_row(owner_link(&phone, &owner, 3)).unwrap();

    let links = s.owner_links_by_owner(&owner);
    assert_eq!(links.len(), 2);
    let subjects: Vec<&str> = links.iter().map(|l| l.subject.as_str()).collect();
    assert!(subjects.contains(&"chan-email"));
    assert!(subjects.contains(&"chan-phone"));
}

#[test]
fn at_comms_db_06_remove_owner_link_idempotent() {
    let mut s = PolyStore::new_in_memory();
    let alice = party(&mut s, "party:alice", "Alice Freeman");
    let chan = channel(&mut s, "chan-1", "alice@example.com");
    let owner = alice.target_ref();

    s.insert_owner_link_row(owner_link(&chan, &owner, 2)).unwrap();
    assert!(s.remove_owner_link_row(&chan, &owner));
    assert!(!s.remove_owner_link_row(&chan, &owner));
}

#[test]
fn at_comms_db_07_party_name_unique() {
    let mut s = PolyStore::new_in_memory();
    party(&mut s, "party:alice", "Alice Freeman");

    let dup = PartyRecord::v1(
        PartyId::new("party:alice2").unwrap(),
        "Alice Freeman",
        MonotonicTimeNs(2),
    )
    .unwrap();
    let err = s.insert_party_row(dup).unwrap_err();
    assert_eq!(
        err,
        StorageError::DuplicateKey {
            table: "parties.name",
            key: "Alice Freeman".to_string(),
        }
    );
}
