//! In-memory stores for caught records and teams
//!
//! Records live for the lifetime of the process. Listing returns a client's
//! records newest first.

use super::types::*;
use crate::error::{Error, Result};
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn check_team_size(members: &[TeamMember]) -> Result<()> {
    if members.len() > MAX_TEAM_SIZE {
        return Err(Error::Validation(format!(
            "Team cannot have more than {} members",
            MAX_TEAM_SIZE
        )));
    }
    Ok(())
}

/// Caught records, in insertion order
#[derive(Default)]
pub struct CaughtStore {
    records: RwLock<Vec<CaughtRecord>>,
}

impl CaughtStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records of `client_id`, newest first
    pub async fn list(&self, client_id: &str) -> Vec<CaughtRecord> {
        let records = self.records.read().await;
        records
            .iter()
            .rev()
            .filter(|r| r.client_id == client_id)
            .cloned()
            .collect()
    }

    /// Record a catch. `clientId`, `pokemonId`, `pokemonName` and `imageUrl`
    /// are required.
    pub async fn create(&self, req: NewCaught) -> Result<CaughtRecord> {
        let missing = || {
            Error::Validation(
                "Missing required fields: clientId, pokemonId, pokemonName, imageUrl".to_string(),
            )
        };

        let record = CaughtRecord {
            id: Uuid::new_v4(),
            client_id: required(req.client_id).ok_or_else(missing)?,
            pokemon_id: req.pokemon_id.filter(|id| *id > 0).ok_or_else(missing)?,
            pokemon_name: required(req.pokemon_name).ok_or_else(missing)?,
            nickname: required(req.nickname),
            image_url: required(req.image_url).ok_or_else(missing)?,
            caught_at: Utc::now(),
        };

        self.records.write().await.push(record.clone());
        tracing::info!(
            id = %record.id,
            pokemon = %record.pokemon_name,
            "Caught record created"
        );
        Ok(record)
    }

    /// Set or clear the nickname of a record
    pub async fn rename(&self, id: Uuid, nickname: Option<String>) -> Result<CaughtRecord> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::NotFound("Pokemon not found".to_string()))?;
        record.nickname = required(nickname);
        Ok(record.clone())
    }

    /// Remove a record, returning it
    pub async fn release(&self, id: Uuid) -> Result<CaughtRecord> {
        let mut records = self.records.write().await;
        let idx = records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| Error::NotFound("Pokemon not found".to_string()))?;
        let record = records.remove(idx);
        tracing::info!(id = %record.id, "Caught record released");
        Ok(record)
    }
}

/// Teams, in insertion order
#[derive(Default)]
pub struct TeamStore {
    teams: RwLock<Vec<Team>>,
}

impl TeamStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Teams of `client_id`, newest first
    pub async fn list(&self, client_id: &str) -> Vec<Team> {
        let teams = self.teams.read().await;
        teams
            .iter()
            .rev()
            .filter(|t| t.client_id == client_id)
            .cloned()
            .collect()
    }

    pub async fn create(&self, req: NewTeam) -> Result<Team> {
        let missing = || Error::Validation("Missing required fields: clientId, teamName".to_string());
        let client_id = required(req.client_id).ok_or_else(missing)?;
        let team_name = required(req.team_name).ok_or_else(missing)?;
        let members = req.members.unwrap_or_default();
        check_team_size(&members)?;

        let now = Utc::now();
        let team = Team {
            id: Uuid::new_v4(),
            client_id,
            team_name,
            members,
            created_at: now,
            updated_at: now,
        };

        self.teams.write().await.push(team.clone());
        tracing::info!(id = %team.id, members = team.members.len(), "Team created");
        Ok(team)
    }

    /// Apply `update` and bump `updated_at`
    pub async fn update(&self, id: Uuid, update: TeamUpdate) -> Result<Team> {
        if let Some(members) = &update.members {
            check_team_size(members)?;
        }

        let mut teams = self.teams.write().await;
        let team = teams
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;

        if let Some(name) = required(update.team_name) {
            team.team_name = name;
        }
        if let Some(members) = update.members {
            team.members = members;
        }
        team.updated_at = Utc::now();
        Ok(team.clone())
    }

    pub async fn delete(&self, id: Uuid) -> Result<Team> {
        let mut teams = self.teams.write().await;
        let idx = teams
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;
        let team = teams.remove(idx);
        tracing::info!(id = %team.id, "Team deleted");
        Ok(team)
    }
}
