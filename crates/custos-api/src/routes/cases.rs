//! # Case Directory Wiring
//!
//! Case management proper belongs to a collaborator system. The
//! single-process deployment still needs cases in the directory before
//! evidence can be filed against them, so this module exposes the
//! minimal registration route that seeds it.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use custos_core::{CaseId, Department};

use crate::error::AppError;
use crate::extractors::ActorContext;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct RegisterCaseBody {
    department: Department,
}

#[derive(Debug, Serialize)]
struct RegisterCaseResponse {
    case_id: CaseId,
    department: Department,
}

/// Routes for case directory wiring.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/cases", post(register_case))
}

async fn register_case(
    State(state): State<AppState>,
    ActorContext(actor): ActorContext,
    Json(body): Json<RegisterCaseBody>,
) -> Result<(StatusCode, Json<RegisterCaseResponse>), AppError> {
    if !actor.active {
        return Err(AppError::Forbidden("account is deactivated".to_string()));
    }
    let case_id = CaseId::new();
    state.cases.register(case_id, body.department);
    Ok((
        StatusCode::CREATED,
        Json(RegisterCaseResponse {
            case_id,
            department: body.department,
        }),
    ))
}
