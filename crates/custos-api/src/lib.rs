//! # custos-api — Axum API Services
//!
//! The transport layer over the Custos domain services, built on
//! Axum/Tower. Assembles the evidence, access, and case-wiring routers
//! into a single application with request tracing.
//!
//! ## Routes
//!
//! - `/v1/evidence/*` — registry and custody ledger operations
//! - `/v1/access-requests/*` — admission workflow
//! - `/v1/cases` — case directory wiring for single-process deployments
//! - `/health/live` — liveness probe (unauthenticated)
//!
//! ## Crate Policy
//!
//! - No business logic in route handlers — they translate HTTP shapes
//!   and delegate to the domain crates.
//! - All errors map to structured HTTP responses via [`AppError`].
//! - Caller identity arrives from the identity-store collaborator in
//!   trusted headers and is materialized by [`extractors::ActorContext`].

pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use state::AppState;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Assemble the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::evidence::router())
        .merge(routes::access::router())
        .merge(routes::cases::router())
        .route("/health/live", get(|| async { "ok" }))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ─── Tests ───────────────────────────────────────────────────────────
