//! Per-client collections: caught records and teams of up to six members.
//!
//! Clients are anonymous and identified only by the `clientId` they send.

mod handler;
mod store;
pub mod types;

pub use handler::{collection_router, CollectionState};
pub use store::{CaughtStore, TeamStore};
pub use types::{CaughtRecord, Team, TeamMember, MAX_TEAM_SIZE};
