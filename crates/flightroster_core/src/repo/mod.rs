//! Repository layer for roster entities.
//!
//! # Responsibility
//! - Define the storage contract used by roster services.
//! - Isolate map/keying details from the membership protocol.
//!
//! # Invariants
//! - Repositories never change relation state on their own; only flight
//!   membership operations do.

pub mod roster_repo;
