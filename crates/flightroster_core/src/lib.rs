//! Core domain logic for the flight roster.
//! Flights with bounded seating, passengers enrolled in at most one flight,
//! and the membership protocol that keeps both sides in agreement.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{
    default_log_level, init_logging, logging_status, LoggingConfig, LoggingError,
};
pub use model::country::{is_iso_country_code, CountryCode, CountryCodeError};
pub use model::flight::{Flight, FlightError, FlightNumber};
pub use model::passenger::{Passenger, PassengerError, PassengerId};
pub use repo::roster_repo::{InMemoryRosterRepository, RepoError, RepoResult, RosterRepository};
pub use service::roster_service::{
    LinkMismatch, RosterError, RosterResult, RosterService, TransferError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
