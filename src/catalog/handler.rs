//! HTTP handlers for the catalog API
//!
//! - GET /api/pokemon          — generation page (`generation=1..9`) or plain list
//! - GET /api/pokemon/search   — name search (`q` required)
//! - GET /api/pokemon/:id      — detail with evolution chain

use super::engine::CatalogEngine;
use super::starters::is_valid_generation;
use crate::api::{ok, ApiResult};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Shared state for catalog handlers
#[derive(Clone)]
pub struct CatalogState {
    pub engine: Arc<CatalogEngine>,
}

/// Create the catalog router
pub fn catalog_router(state: CatalogState) -> Router {
    Router::new()
        .route("/api/pokemon", get(list_pokemon))
        .route("/api/pokemon/search", get(search_pokemon))
        .route("/api/pokemon/:id", get(get_pokemon))
        .with_state(state)
}

// Raw strings: malformed numbers fall back to defaults instead of rejecting
// the request.
#[derive(Debug, Default, Deserialize)]
struct PageQuery {
    limit: Option<String>,
    offset: Option<String>,
    generation: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchQuery {
    q: Option<String>,
    limit: Option<String>,
    offset: Option<String>,
}

fn parse_limit(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|limit| *limit > 0)
        .unwrap_or(default)
}

fn parse_offset(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

fn parse_generation(raw: Option<&str>) -> Option<u8> {
    raw.and_then(|s| s.trim().parse::<u8>().ok())
        .filter(|g| is_valid_generation(*g))
}

/// GET /api/pokemon
async fn list_pokemon(
    State(state): State<CatalogState>,
    Query(params): Query<PageQuery>,
) -> ApiResult<impl IntoResponse> {
    let limit = parse_limit(
        params.limit.as_deref(),
        state.engine.config().default_page_limit,
    );
    let offset = parse_offset(params.offset.as_deref());

    let page = match parse_generation(params.generation.as_deref()) {
        Some(generation) => {
            state
                .engine
                .generation_page(generation, limit, offset)
                .await?
        }
        None => state.engine.list_page(limit, offset).await?,
    };
    Ok(ok(page))
}

/// GET /api/pokemon/search
async fn search_pokemon(
    State(state): State<CatalogState>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<impl IntoResponse> {
    let query = params.q.unwrap_or_default();
    let limit = parse_limit(
        params.limit.as_deref(),
        state.engine.config().default_page_limit,
    );
    let offset = parse_offset(params.offset.as_deref());

    let page = state.engine.search(&query, limit, offset).await?;
    Ok(ok(page))
}

/// GET /api/pokemon/:id
async fn get_pokemon(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let detail = state.engine.entry_detail(&id).await?;
    Ok(ok(detail))
}
