//! Roster use-case services.
//!
//! # Responsibility
//! - Orchestrate membership changes across flights and passengers.
//! - Keep callers decoupled from storage details.

pub mod roster_service;
