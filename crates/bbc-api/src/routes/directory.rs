//! # Directory API
//!
//! Routes:
//! - GET    /{kind}: paged listing (`limit`, `offset`, `category`)
//! - GET    /{kind}/{id}: one published record
//! - POST   /{kind}: submit a new or changed record for moderation
//! - DELETE /{kind}/{id}: unpublish a record (admin)
//!
//! `{kind}` is `apps` or `organizations`; anything else is a 404.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use bbc_core::Record;
use bbc_moderation::{ListQuery, Page, PendingEntry};
use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;
use crate::extractors::{extract_json, parse_kind};
use crate::state::AppState;

/// Response to an accepted submission.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub saved: PendingEntry,
}

/// Response to a delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub deleted: String,
}

pub fn read_router() -> Router<AppState> {
    Router::new()
        .route("/{kind}", get(list_records))
        .route("/{kind}/{id}", get(get_record))
}

pub fn submission_router() -> Router<AppState> {
    Router::new().route("/{kind}", post(submit_record))
}

pub fn admin_router() -> Router<AppState> {
    Router::new().route("/{kind}/{id}", delete(delete_record))
}

/// GET /{kind}: paged listing of published records.
async fn list_records(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page>, AppError> {
    let kind = parse_kind(&kind)?;
    Ok(Json(state.moderator.list(kind, &query)))
}

/// GET /{kind}/{id}: one published record.
async fn get_record(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<Record>, AppError> {
    let kind = parse_kind(&kind)?;
    Ok(Json(state.moderator.get(kind, &id)?))
}

/// POST /{kind}: queue a submission for moderation.
async fn submit_record(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SubmitResponse>, AppError> {
    let kind = parse_kind(&kind)?;
    let input = extract_json(body)?;
    let saved = state.moderator.submit(kind, &input)?;
    Ok(Json(SubmitResponse {
        success: true,
        saved,
    }))
}

/// DELETE /{kind}/{id}: unpublish a record.
async fn delete_record(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<DeleteResponse>, AppError> {
    let kind = parse_kind(&kind)?;
    state.moderator.delete(kind, &id)?;
    Ok(Json(DeleteResponse {
        success: true,
        deleted: id,
    }))
}
