//! HTTP handlers for caught records and teams
//!
//! - GET    /api/caught?clientId   — list a client's caught records
//! - POST   /api/caught            — record a catch
//! - PUT    /api/caught/:id        — rename
//! - DELETE /api/caught/:id        — release
//! - GET    /api/teams?clientId    — list a client's teams
//! - POST   /api/teams             — create a team
//! - PUT    /api/teams/:id         — update a team
//! - DELETE /api/teams/:id         — delete a team

use super::store::{CaughtStore, TeamStore};
use super::types::*;
use crate::api::{ok, ApiResult, JsonBody};
use crate::error::Error;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// Shared state for collection handlers
#[derive(Clone)]
pub struct CollectionState {
    pub caught: Arc<CaughtStore>,
    pub teams: Arc<TeamStore>,
}

/// Create the collection router
pub fn collection_router(state: CollectionState) -> Router {
    Router::new()
        .route("/api/caught", get(list_caught).post(create_caught))
        .route("/api/caught/:id", put(rename_caught).delete(release_caught))
        .route("/api/teams", get(list_teams).post(create_team))
        .route("/api/teams/:id", put(update_team).delete(delete_team))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct ClientQuery {
    #[serde(rename = "clientId")]
    client_id: Option<String>,
}

impl ClientQuery {
    fn require(self) -> ApiResult<String> {
        self.client_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| Error::Validation("clientId is required".to_string()))
    }
}

fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| Error::Validation("Invalid ID format".to_string()))
}

// =============================================================================
// Caught records
// =============================================================================

/// GET /api/caught
async fn list_caught(
    State(state): State<CollectionState>,
    Query(params): Query<ClientQuery>,
) -> ApiResult<impl IntoResponse> {
    let client_id = params.require()?;
    Ok(ok(state.caught.list(&client_id).await))
}

/// POST /api/caught
async fn create_caught(
    State(state): State<CollectionState>,
    JsonBody(request): JsonBody<NewCaught>,
) -> ApiResult<impl IntoResponse> {
    let record = state.caught.create(request).await?;
    Ok((StatusCode::CREATED, ok(record)))
}

/// PUT /api/caught/:id
async fn rename_caught(
    State(state): State<CollectionState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<RenameCaught>,
) -> ApiResult<impl IntoResponse> {
    let record = state.caught.rename(parse_id(&id)?, request.nickname).await?;
    Ok(ok(record))
}

/// DELETE /api/caught/:id
async fn release_caught(
    State(state): State<CollectionState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let record = state.caught.release(parse_id(&id)?).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Pokemon released",
        "data": record,
    })))
}

// =============================================================================
// Teams
// =============================================================================

/// GET /api/teams
async fn list_teams(
    State(state): State<CollectionState>,
    Query(params): Query<ClientQuery>,
) -> ApiResult<impl IntoResponse> {
    let client_id = params.require()?;
    Ok(ok(state.teams.list(&client_id).await))
}

/// POST /api/teams
async fn create_team(
    State(state): State<CollectionState>,
    JsonBody(request): JsonBody<NewTeam>,
) -> ApiResult<impl IntoResponse> {
    let team = state.teams.create(request).await?;
    Ok((StatusCode::CREATED, ok(team)))
}

/// PUT /api/teams/:id
async fn update_team(
    State(state): State<CollectionState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<TeamUpdate>,
) -> ApiResult<impl IntoResponse> {
    let team = state.teams.update(parse_id(&id)?, request).await?;
    Ok(ok(team))
}

/// DELETE /api/teams/:id
async fn delete_team(
    State(state): State<CollectionState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let team = state.teams.delete(parse_id(&id)?).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Team deleted",
        "data": team,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn make_app() -> Router {
        collection_router(CollectionState {
            caught: Arc::new(CaughtStore::new()),
            teams: Arc::new(TeamStore::new()),
        })
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let resp = app.clone().oneshot(request).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 64)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn pikachu() -> serde_json::Value {
        json!({
            "clientId": "client-1",
            "pokemonId": 25,
            "pokemonName": "pikachu",
            "imageUrl": "https://img/25.png"
        })
    }

    #[tokio::test]
    async fn test_list_requires_client_id() {
        let app = make_app();
        for uri in ["/api/caught", "/api/teams"] {
            let (status, json) = send(&app, "GET", uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["message"], "clientId is required");
        }
    }

    #[tokio::test]
    async fn test_caught_lifecycle() {
        let app = make_app();

        let (status, json) = send(&app, "POST", "/api/caught", Some(pikachu())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["success"], true);
        let id = json["data"]["_id"].as_str().unwrap().to_string();

        let (status, json) = send(&app, "GET", "/api/caught?clientId=client-1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"].as_array().unwrap().len(), 1);

        let (status, json) = send(
            &app,
            "PUT",
            &format!("/api/caught/{}", id),
            Some(json!({"nickname": "Sparky"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["nickname"], "Sparky");

        let (status, json) = send(&app, "DELETE", &format!("/api/caught/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Pokemon released");

        let (status, json) = send(&app, "DELETE", &format!("/api/caught/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Pokemon not found");
    }

    #[tokio::test]
    async fn test_caught_missing_fields() {
        let app = make_app();
        let (status, json) = send(
            &app,
            "POST",
            "/api/caught",
            Some(json!({"clientId": "client-1", "pokemonName": "pikachu"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["message"],
            "Missing required fields: clientId, pokemonId, pokemonName, imageUrl"
        );
    }

    #[tokio::test]
    async fn test_invalid_id_format() {
        let app = make_app();
        let (status, json) = send(&app, "DELETE", "/api/teams/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Invalid ID format");
    }

    #[tokio::test]
    async fn test_team_lifecycle() {
        let app = make_app();
        let member = json!({
            "caughtPokemonId": Uuid::new_v4(),
            "pokemonName": "pikachu",
            "imageUrl": "https://img/25.png"
        });

        let (status, json) = send(
            &app,
            "POST",
            "/api/teams",
            Some(json!({"clientId": "client-1", "teamName": "Kanto", "members": [member]})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["members"].as_array().unwrap().len(), 1);
        let id = json["data"]["_id"].as_str().unwrap().to_string();

        let seven: Vec<_> = (0..7).map(|_| member.clone()).collect();
        let (status, json) = send(
            &app,
            "PUT",
            &format!("/api/teams/{}", id),
            Some(json!({"members": seven})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Team cannot have more than 6 members");

        let (status, json) = send(
            &app,
            "PUT",
            &format!("/api/teams/{}", id),
            Some(json!({"teamName": "Johto"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["teamName"], "Johto");

        let (status, json) = send(&app, "DELETE", &format!("/api/teams/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Team deleted");

        let (_, json) = send(&app, "GET", "/api/teams?clientId=client-1", None).await;
        assert!(json["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_team_missing_name() {
        let app = make_app();
        let (status, json) = send(&app, "POST", "/api/teams", Some(json!({"clientId": "c"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Missing required fields: clientId, teamName");
    }

    #[tokio::test]
    async fn test_malformed_member_id_is_bad_request() {
        let app = make_app();
        let (status, json) = send(
            &app,
            "POST",
            "/api/teams",
            Some(json!({
                "clientId": "client-1",
                "teamName": "Kanto",
                "members": [{"caughtPokemonId": "abc", "pokemonName": "pikachu", "imageUrl": "img"}]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert!(json["message"].as_str().unwrap().contains("caughtPokemonId"));
    }

    #[tokio::test]
    async fn test_wrong_body_type_is_bad_request() {
        let app = make_app();
        let (status, json) = send(
            &app,
            "POST",
            "/api/caught",
            Some(json!({"clientId": "client-1", "pokemonId": "twenty-five"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
    }
}
