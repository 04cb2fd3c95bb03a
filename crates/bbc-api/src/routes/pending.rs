//! # Moderation Console
//!
//! Routes (admin):
//! - GET /pending/{kind}/{pending_id}: review table
//! - GET /pending/{kind}/{pending_id}?action=approve: publish
//! - GET /pending/{kind}/{pending_id}?action=reject: discard
//!
//! Moderators act from links in their notification mail, so decisions are
//! GETs. Responses are HTML unless the client sends
//! `Accept: application/json`.

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use bbc_moderation::Upsert;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::{parse_kind, wants_json};
use crate::render;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PendingQuery {
    pub action: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Approve,
    Reject,
}

impl Action {
    fn parse(raw: Option<&str>) -> Result<Option<Self>, AppError> {
        match raw {
            None | Some("") => Ok(None),
            Some("approve") => Ok(Some(Self::Approve)),
            Some("reject") => Ok(Some(Self::Reject)),
            Some(_) => Err(AppError::BadRequest(
                "action parameter must be 'approve' or 'reject'".to_string(),
            )),
        }
    }
}

/// JSON form of a moderation decision.
#[derive(Debug, Serialize)]
pub struct DecisionResponse {
    pub success: bool,
    pub action: &'static str,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<&'static str>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/pending/{kind}/{pending_id}", get(moderate))
}

/// GET /pending/{kind}/{pending_id}: review, approve, or reject.
async fn moderate(
    State(state): State<AppState>,
    Path((kind, pending_id)): Path<(String, String)>,
    Query(query): Query<PendingQuery>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let action = Action::parse(query.action.as_deref())?;
    let kind = parse_kind(&kind)?;
    let json = wants_json(&headers);

    match action {
        None => {
            let review = state.moderator.review(kind, &pending_id)?;
            if json {
                return Ok(Json(review).into_response());
            }
            let action_base = format!("/pending/{kind}/{pending_id}?action=");
            Ok(Html(render::review_page(&review, &action_base)).into_response())
        }
        Some(Action::Approve) => {
            let approval = state.moderator.approve(kind, &pending_id)?;
            if json {
                let outcome = match approval.outcome {
                    Upsert::Inserted => "inserted",
                    Upsert::Replaced => "replaced",
                };
                return Ok(Json(DecisionResponse {
                    success: true,
                    action: "approved",
                    id: approval.id.to_string(),
                    outcome: Some(outcome),
                })
                .into_response());
            }
            Ok(Html(render::approved_page()).into_response())
        }
        Some(Action::Reject) => {
            let entry = state.moderator.reject(kind, &pending_id)?;
            if json {
                return Ok(Json(DecisionResponse {
                    success: true,
                    action: "rejected",
                    id: entry.id.to_string(),
                    outcome: None,
                })
                .into_response());
            }
            Ok(Html(render::rejected_page()).into_response())
        }
    }
}
