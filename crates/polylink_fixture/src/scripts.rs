#![forbid(unsafe_code)]

//! Fixture scripts: small imperative seeds that build a deterministic demo
//! data set, mirroring the create-one-entity script style of the original
//! fixture module.

use serde::Serialize;

use polylink_contracts::casemgmt::{CaseId, CaseRecord};
use polylink_contracts::comms::CommunicationChannelId;
use polylink_contracts::party::{PartyId, PartyRecord};
use polylink_contracts::MonotonicTimeNs;
use polylink_storage::PolyStore;

use crate::cases::Cases;
use crate::error::DomainError;
use crate::parties::Parties;

fn slug(prefix: &str, name: &str) -> String {
    let body: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!("{prefix}:{body}")
}

/// Creates one party, deriving its identifier from the name.
#[derive(Debug, Clone)]
pub struct PartyCreate {
    pub name: String,
}

impl PartyCreate {
    pub fn execute(
        &self,
        store: &mut PolyStore,
        at: MonotonicTimeNs,
    ) -> Result<PartyRecord, DomainError> {
        let party_id = PartyId::new(slug("party", &self.name))?;
        Parties::create(store, party_id, &self.name, at)
    }
}

/// Creates one case, deriving its identifier from the name.
#[derive(Debug, Clone)]
pub struct CaseCreate {
    pub name: String,
}

impl CaseCreate {
    pub fn execute(
        &self,
        store: &mut PolyStore,
        at: MonotonicTimeNs,
    ) -> Result<CaseRecord, DomainError> {
        let case_id = CaseId::new(slug("case", &self.name))?;
        Cases::create(store, case_id, &self.name, at)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DemoFixtureResult {
    pub parties: Vec<PartyRecord>,
    pub cases: Vec<CaseRecord>,
    pub channel_link_count: usize,
    pub content_link_count: usize,
}

impl DemoFixtureResult {
    pub fn to_json(&self) -> Result<String, DomainError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Seeds a fresh store with the demo scenario: three parties, channels for
/// two of them, and two cases sharing party content.
#[derive(Debug, Clone, Default)]
pub struct DemoFixture;

impl DemoFixture {
    pub fn execute(store: &mut PolyStore) -> Result<DemoFixtureResult, DomainError> {
        // Teardown first: the demo scenario always starts from an empty store,
        // so re-running replaces the rows instead of colliding with them.
        *store = PolyStore::new_in_memory();

        let mut tick = 0u64;
        let mut next = || {
            tick += 1;
            MonotonicTimeNs(tick)
        };

        let alice = PartyCreate {
            name: "Alice Freeman".to_string(),
        }
        .execute(store, next())?;
        let bob = PartyCreate {
            name: "Bob Whitfield".to_string(),
        }
        .execute(store, next())?;
        let carol = PartyCreate {
            name: "Carol Young".to_string(),
        }
        .execute(store, next())?;

        Parties::add_communication_channel(
            store,
            &alice.party_id,
            CommunicationChannelId::new("chan:alice-email")?,
            "alice@example.com",
            next(),
        )?;
        Parties::add_communication_channel(
            store,
            &alice.party_id,
            CommunicationChannelId::new("chan:alice-phone")?,
            "+44 555 0100",
            next(),
        )?;
        Parties::add_communication_channel(
            store,
            &bob.party_id,
            CommunicationChannelId::new("chan:bob-email")?,
            "bob@example.com",
            next(),
        )?;

        let onboarding = CaseCreate {
            name: "Onboarding Review".to_string(),
        }
        .execute(store, next())?;
        let renewal = CaseCreate {
            name: "Contract Renewal".to_string(),
        }
        .execute(store, next())?;

        Cases::add_content(store, &onboarding.case_id, alice.target_ref(), next())?;
        Cases::add_content(store, &onboarding.case_id, bob.target_ref(), next())?;
        Cases::add_content(store, &renewal.case_id, bob.target_ref(), next())?;
        Cases::add_content(store, &renewal.case_id, carol.target_ref(), next())?;

        Ok(DemoFixtureResult {
            parties: vec![alice, bob, carol],
            cases: vec![onboarding, renewal],
            channel_link_count: store.comms_owner_links().len(),
            content_link_count: store.case_content_link_table().len(),
        })
    }
}
