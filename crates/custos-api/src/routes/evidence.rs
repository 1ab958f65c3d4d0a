//! # Evidence Routes
//!
//! - `POST   /v1/evidence` — register an item (201)
//! - `GET    /v1/evidence/{id}` — item snapshot
//! - `PUT    /v1/evidence/{id}/status` — status transition
//! - `PATCH  /v1/evidence/{id}/damage` — damage flag
//! - `DELETE /v1/evidence/{id}` — delete a created-in-error item (204)
//! - `POST   /v1/evidence/{id}/transfers` — append a custody transfer (201)
//! - `GET    /v1/evidence/{id}/transfers` — the custody chain

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use custos_core::{Department, EvidenceId};
use custos_registry::{CustodyTransfer, EvidenceIntake, EvidenceItem, TransferOrder};
use custos_state::EvidenceStatus;

use crate::error::AppError;
use crate::extractors::ActorContext;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct UpdateStatusBody {
    status: EvidenceStatus,
}

#[derive(Debug, Deserialize)]
struct DamageBody {
    damaged: bool,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TransferBody {
    to_department: Department,
    transferred_by: String,
    from_department: Option<Department>,
    notes: Option<String>,
}

/// Transfer receipt shape: the committed entry plus a warning when the
/// timeline collaborator did not accept the event.
#[derive(Debug, Serialize)]
struct TransferResponse {
    transfer: CustodyTransfer,
    warning: Option<String>,
}

/// Routes for the evidence registry and custody ledger.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/evidence", post(create_item))
        .route("/v1/evidence/{id}", get(get_item).delete(delete_item))
        .route("/v1/evidence/{id}/status", put(update_status))
        .route("/v1/evidence/{id}/damage", patch(set_damage))
        .route(
            "/v1/evidence/{id}/transfers",
            post(append_transfer).get(list_transfers),
        )
}

async fn create_item(
    State(state): State<AppState>,
    ActorContext(actor): ActorContext,
    Json(intake): Json<EvidenceIntake>,
) -> Result<(StatusCode, Json<EvidenceItem>), AppError> {
    let item = state.registry.create(intake, &actor)?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EvidenceItem>, AppError> {
    Ok(Json(state.registry.get(EvidenceId(id))?))
}

async fn update_status(
    State(state): State<AppState>,
    ActorContext(actor): ActorContext,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateStatusBody>,
) -> Result<Json<EvidenceItem>, AppError> {
    let item = state
        .registry
        .update_status(EvidenceId(id), body.status, &actor)?;
    Ok(Json(item))
}

async fn set_damage(
    State(state): State<AppState>,
    ActorContext(actor): ActorContext,
    Path(id): Path<Uuid>,
    Json(body): Json<DamageBody>,
) -> Result<Json<EvidenceItem>, AppError> {
    let item = state
        .registry
        .set_damaged(EvidenceId(id), body.damaged, body.description, &actor)?;
    Ok(Json(item))
}

async fn delete_item(
    State(state): State<AppState>,
    ActorContext(actor): ActorContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.registry.delete(EvidenceId(id), &actor)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn append_transfer(
    State(state): State<AppState>,
    ActorContext(actor): ActorContext,
    Path(id): Path<Uuid>,
    Json(body): Json<TransferBody>,
) -> Result<(StatusCode, Json<TransferResponse>), AppError> {
    let order = TransferOrder {
        to_department: body.to_department,
        transferred_by: body.transferred_by,
        claimed_from: body.from_department,
        notes: body.notes,
    };
    let receipt = state.registry.append_transfer(EvidenceId(id), order, &actor)?;
    Ok((
        StatusCode::CREATED,
        Json(TransferResponse {
            transfer: receipt.transfer,
            warning: receipt.timeline_warning,
        }),
    ))
}

async fn list_transfers(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CustodyTransfer>>, AppError> {
    Ok(Json(state.registry.list_transfers(EvidenceId(id))?))
}
