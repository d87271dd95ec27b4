//! Flight roster domain model.
//!
//! # Responsibility
//! - Define flights, passengers and their validated value objects.
//! - Keep the flight/passenger relation as ids on both sides, never as
//!   shared references.
//!
//! # Invariants
//! - A passenger points at no more than one flight.
//! - A flight's membership never exceeds its seat capacity.

pub mod country;
pub mod flight;
pub mod passenger;
