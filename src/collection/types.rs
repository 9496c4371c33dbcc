//! Wire types for caught records and teams
//!
//! JSON is camelCase; record ids serialize as `_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Largest number of members a team may hold
pub const MAX_TEAM_SIZE: usize = 6;

/// A species caught by an anonymous client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaughtRecord {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub client_id: String,
    pub pokemon_id: u32,
    pub pokemon_name: String,
    pub nickname: Option<String>,
    pub image_url: String,
    pub caught_at: DateTime<Utc>,
}

/// Request body for recording a catch. Every field is optional on the wire so
/// missing ones produce a validation message rather than a decode rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCaught {
    pub client_id: Option<String>,
    pub pokemon_id: Option<u32>,
    pub pokemon_name: Option<String>,
    pub nickname: Option<String>,
    pub image_url: Option<String>,
}

/// Request body for renaming a caught record
#[derive(Debug, Default, Deserialize)]
pub struct RenameCaught {
    pub nickname: Option<String>,
}

/// A team slot referencing a caught record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub caught_pokemon_id: Uuid,
    #[serde(default)]
    pub nickname: Option<String>,
    pub pokemon_name: String,
    pub image_url: String,
}

/// Named group of up to [`MAX_TEAM_SIZE`] caught records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub client_id: String,
    pub team_name: String,
    pub members: Vec<TeamMember>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTeam {
    pub client_id: Option<String>,
    pub team_name: Option<String>,
    pub members: Option<Vec<TeamMember>>,
}

/// Partial team update; absent fields keep their current value
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamUpdate {
    pub team_name: Option<String>,
    pub members: Option<Vec<TeamMember>>,
}
