#![forbid(unsafe_code)]

//! Demo domain for the polymorphic association link abstraction: parties,
//! cases, communication channels, and the fixture scripts that seed them.

pub mod cases;
pub mod content;
pub mod error;
pub mod parties;
pub mod scripts;

pub use cases::Cases;
pub use content::{CaseContentObject, ChannelOwner};
pub use error::DomainError;
pub use parties::Parties;
pub use scripts::{CaseCreate, DemoFixture, DemoFixtureResult, PartyCreate};
