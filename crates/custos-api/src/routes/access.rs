//! # Access Admission Routes
//!
//! - `POST /v1/access-requests` — public submission (201)
//! - `GET  /v1/access-requests` — pending queue, reviewers only
//! - `POST /v1/access-requests/{id}/approve` — provision an account;
//!   the response carries the temporary secret exactly once
//! - `POST /v1/access-requests/{id}/deny` — deny without side effects
//!
//! The approval response is the single place the plaintext secret ever
//! crosses an interface. It is not persisted, and no other route can
//! produce it.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use custos_access::{AccessRequest, AccessRequestForm};
use custos_core::{AccountId, Department, RequestId, Role, Username};
use custos_gate::{allowed, Action, Resource};

use crate::error::AppError;
use crate::extractors::ActorContext;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct ApproveBody {
    /// Role granted to the new account; defaults to `user`.
    role: Option<Role>,
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DenyBody {
    notes: Option<String>,
}

#[derive(Debug, Serialize)]
struct AccountSummary {
    id: AccountId,
    username: Username,
    role: Role,
    department: Department,
}

/// One-time disclosure payload for an approval.
#[derive(Debug, Serialize)]
struct ApprovalResponse {
    request: AccessRequest,
    account: AccountSummary,
    /// Shown once in this response; not retrievable afterwards.
    temporary_secret: String,
}

/// Routes for the access admission workflow.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/access-requests", post(submit_request).get(list_pending))
        .route("/v1/access-requests/{id}/approve", post(approve_request))
        .route("/v1/access-requests/{id}/deny", post(deny_request))
}

async fn submit_request(
    State(state): State<AppState>,
    Json(form): Json<AccessRequestForm>,
) -> Result<(StatusCode, Json<AccessRequest>), AppError> {
    let request = state.admission.submit(form)?;
    Ok((StatusCode::CREATED, Json(request)))
}

async fn list_pending(
    State(state): State<AppState>,
    ActorContext(actor): ActorContext,
) -> Result<Json<Vec<AccessRequest>>, AppError> {
    if !allowed(&actor, Action::ReviewAccess, &Resource::AdmissionQueue) {
        return Err(AppError::Forbidden(
            "reviewer lacks admission authority".to_string(),
        ));
    }
    Ok(Json(state.admission.pending()))
}

async fn approve_request(
    State(state): State<AppState>,
    ActorContext(actor): ActorContext,
    Path(id): Path<Uuid>,
    Json(body): Json<ApproveBody>,
) -> Result<Json<ApprovalResponse>, AppError> {
    let receipt = state.admission.approve(
        RequestId(id),
        &actor,
        body.role.unwrap_or(Role::User),
        body.notes,
    )?;
    let response = ApprovalResponse {
        account: AccountSummary {
            id: receipt.account.id,
            username: receipt.account.username.clone(),
            role: receipt.account.role,
            department: receipt.account.department,
        },
        temporary_secret: receipt.secret.expose().to_string(),
        request: receipt.request,
    };
    Ok(Json(response))
}

async fn deny_request(
    State(state): State<AppState>,
    ActorContext(actor): ActorContext,
    Path(id): Path<Uuid>,
    Json(body): Json<DenyBody>,
) -> Result<Json<AccessRequest>, AppError> {
    let request = state.admission.deny(RequestId(id), &actor, body.notes)?;
    Ok(Json(request))
}
