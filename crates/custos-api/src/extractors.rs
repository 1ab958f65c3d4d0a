//! # Actor Context Extraction
//!
//! The identity and role store is an external collaborator; it fronts
//! this service and asserts the caller's identity in trusted headers.
//! This extractor materializes that assertion into an [`Actor`] for the
//! permission gate. Missing or malformed headers are a 401 — the gate
//! never sees an unauthenticated caller.

use axum::extract::FromRequestParts;
use axum::http::header::HeaderMap;
use axum::http::request::Parts;
use uuid::Uuid;

use custos_core::{AccountId, Actor, Department, Role};

use crate::error::AppError;

/// Caller identity asserted by the identity-store collaborator.
#[derive(Debug, Clone)]
pub struct ActorContext(pub Actor);

impl<S> FromRequestParts<S> for ActorContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let headers = &parts.headers;

        let account_id = required(headers, "x-actor-id")?
            .parse::<Uuid>()
            .map(AccountId)
            .map_err(|_| AppError::Unauthorized("x-actor-id must be a UUID".to_string()))?;
        let role = required(headers, "x-actor-role")?
            .parse::<Role>()
            .map_err(|e| AppError::Unauthorized(e.to_string()))?;
        let department = required(headers, "x-actor-department")?
            .parse::<Department>()
            .map_err(|e| AppError::Unauthorized(e.to_string()))?;
        let display_name = headers
            .get("x-actor-name")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();
        let active = headers
            .get("x-actor-active")
            .and_then(|v| v.to_str().ok())
            .map(|v| v != "false")
            .unwrap_or(true);

        let mut actor = Actor::new(account_id, display_name, role, department);
        actor.active = active;
        Ok(Self(actor))
    }
}

fn required<'h>(headers: &'h HeaderMap, name: &str) -> Result<&'h str, AppError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized(format!("missing {name} header")))
}
