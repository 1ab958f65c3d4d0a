//! # custos-cli — Custos Command-Line Interface
//!
//! Structured clap-based CLI for operating the Custos stack.
//!
//! ## Subcommands
//!
//! - `serve` — Run the evidence custody and access admission API server
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from handlers.
//! - Handlers delegate to `custos-api` — no business logic here.

pub mod serve;
