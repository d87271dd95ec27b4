//! Roster use-case service.
//!
//! # Responsibility
//! - Register flights and passengers.
//! - Expose capacity-checked add/remove membership operations.
//! - Move passengers between flights with `join_flight`.
//! - Audit both sides of the flight/passenger relation.
//!
//! # Invariants
//! - `join_flight` validates the whole transfer before mutating anything; a
//!   failed transfer leaves flights and passengers unchanged.
//! - `add_passenger`/`remove_passenger` keep the low-level flight semantics,
//!   including overwriting a back-reference without cleaning the old flight.
//! - Errors are returned to the caller, never swallowed or retried.

use crate::model::flight::{Flight, FlightError, FlightNumber};
use crate::model::passenger::{Passenger, PassengerError, PassengerId};
use crate::repo::roster_repo::{RepoError, RosterRepository};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RosterResult<T> = Result<T, RosterError>;

/// Reasons a `join_flight` transfer was aborted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// Previous flight does not list the passenger as a member.
    CannotRemove {
        passenger: PassengerId,
        flight: FlightNumber,
    },
    /// Target flight already lists the passenger as a member.
    CannotAdd {
        passenger: PassengerId,
        flight: FlightNumber,
    },
}

impl Display for TransferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CannotRemove { passenger, flight } => {
                write!(f, "cannot remove passenger {passenger} from flight {flight}")
            }
            Self::CannotAdd { passenger, flight } => {
                write!(f, "cannot add passenger {passenger} to flight {flight}")
            }
        }
    }
}

impl Error for TransferError {}

/// Service error for roster use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// Malformed flight number.
    InvalidFormat(String),
    /// Country code outside the ISO 3166-1 alpha-2 table.
    InvalidCountryCode(String),
    /// Target flight has no free seat.
    CapacityExceeded {
        flight_number: FlightNumber,
        seat_capacity: i32,
    },
    /// `join_flight` found the relation in a state it cannot transfer from.
    Transfer(TransferError),
    FlightNotFound(FlightNumber),
    PassengerNotFound(PassengerId),
    DuplicateFlight(FlightNumber),
    DuplicatePassenger(PassengerId),
}

impl Display for RosterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat(value) => write!(f, "invalid flight number: `{value}`"),
            Self::InvalidCountryCode(value) => write!(f, "invalid country code: `{value}`"),
            Self::CapacityExceeded {
                flight_number,
                seat_capacity,
            } => write!(
                f,
                "not enough seats for flight {flight_number} (capacity {seat_capacity})"
            ),
            Self::Transfer(err) => write!(f, "{err}"),
            Self::FlightNotFound(number) => write!(f, "flight not found: {number}"),
            Self::PassengerNotFound(id) => write!(f, "passenger not found: {id}"),
            Self::DuplicateFlight(number) => write!(f, "flight already registered: {number}"),
            Self::DuplicatePassenger(id) => write!(f, "passenger already registered: {id}"),
        }
    }
}

impl Error for RosterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transfer(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FlightError> for RosterError {
    fn from(value: FlightError) -> Self {
        match value {
            FlightError::InvalidFormat(raw) => Self::InvalidFormat(raw),
            FlightError::CapacityExceeded {
                flight_number,
                seat_capacity,
            } => Self::CapacityExceeded {
                flight_number,
                seat_capacity,
            },
        }
    }
}

impl From<PassengerError> for RosterError {
    fn from(value: PassengerError) -> Self {
        match value {
            PassengerError::InvalidCountryCode(raw) => Self::InvalidCountryCode(raw),
        }
    }
}

impl From<RepoError> for RosterError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::DuplicateFlight(number) => Self::DuplicateFlight(number),
            RepoError::DuplicatePassenger(id) => Self::DuplicatePassenger(id),
            RepoError::FlightNotFound(number) => Self::FlightNotFound(number),
            RepoError::PassengerNotFound(id) => Self::PassengerNotFound(id),
        }
    }
}

impl From<TransferError> for RosterError {
    fn from(value: TransferError) -> Self {
        Self::Transfer(value)
    }
}

/// One disagreement between a passenger back-reference and flight membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkMismatch {
    /// Passenger points at a flight that does not list it (or is unknown).
    DanglingBackReference {
        passenger: PassengerId,
        flight: FlightNumber,
    },
    /// Flight lists a passenger whose back-reference points elsewhere (or
    /// who is unknown).
    StaleMembership {
        flight: FlightNumber,
        passenger: PassengerId,
    },
}

/// Roster facade over a repository implementation.
pub struct RosterService<R: RosterRepository> {
    repo: R,
}

impl<R: RosterRepository> RosterService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Read-only access to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Validates and stores a new, empty flight.
    pub fn register_flight(
        &mut self,
        flight_number: &str,
        seat_capacity: i32,
    ) -> RosterResult<FlightNumber> {
        let flight = Flight::new(flight_number, seat_capacity)?;
        let number = flight.flight_number().clone();
        self.repo.insert_flight(flight)?;
        debug!("event=flight_registered module=roster status=ok flight={number} seats={seat_capacity}");
        Ok(number)
    }

    /// Validates and stores a new, unassigned passenger.
    pub fn register_passenger(
        &mut self,
        identifier: impl Into<PassengerId>,
        name: impl Into<String>,
        country_code: &str,
    ) -> RosterResult<PassengerId> {
        let passenger = Passenger::new(identifier, name, country_code)?;
        let id = passenger.identifier().clone();
        self.repo.insert_passenger(passenger)?;
        debug!("event=passenger_registered module=roster status=ok passenger={id}");
        Ok(id)
    }

    /// Looks up a registered flight.
    pub fn flight(&self, flight_number: &FlightNumber) -> RosterResult<&Flight> {
        self.repo
            .get_flight(flight_number)
            .ok_or_else(|| RosterError::FlightNotFound(flight_number.clone()))
    }

    /// Looks up a registered passenger.
    pub fn passenger(&self, passenger: &PassengerId) -> RosterResult<&Passenger> {
        self.repo
            .get_passenger(passenger)
            .ok_or_else(|| RosterError::PassengerNotFound(passenger.clone()))
    }

    /// Enrolls a passenger with `Flight::add_passenger` semantics.
    ///
    /// Returns `false` when the passenger was already a member.
    pub fn add_passenger(
        &mut self,
        flight_number: &FlightNumber,
        passenger: &PassengerId,
    ) -> RosterResult<bool> {
        let (flight, traveller) = self
            .repo
            .flight_and_passenger_mut(flight_number, passenger)?;
        let added = flight.add_passenger(traveller).map_err(|err| {
            warn!("event=add_passenger module=roster status=error flight={flight_number} passenger={passenger} error={err}");
            RosterError::from(err)
        })?;
        debug!("event=add_passenger module=roster status=ok flight={flight_number} passenger={passenger} added={added}");
        Ok(added)
    }

    /// Drops a passenger with `Flight::remove_passenger` semantics.
    ///
    /// The passenger's back-reference is cleared even when it was not a member.
    pub fn remove_passenger(
        &mut self,
        flight_number: &FlightNumber,
        passenger: &PassengerId,
    ) -> RosterResult<bool> {
        let (flight, traveller) = self
            .repo
            .flight_and_passenger_mut(flight_number, passenger)?;
        let removed = flight.remove_passenger(traveller);
        debug!("event=remove_passenger module=roster status=ok flight={flight_number} passenger={passenger} removed={removed}");
        Ok(removed)
    }

    /// Moves a passenger from its current flight (if any) to `target`.
    ///
    /// `target = None` leaves the passenger unassigned.
    ///
    /// # Errors
    /// - `PassengerNotFound` / `FlightNotFound` for unknown ids.
    /// - `Transfer(CannotRemove)` when the current flight does not list the
    ///   passenger.
    /// - `CapacityExceeded` when `target` has no free seat.
    /// - `Transfer(CannotAdd)` when `target` already lists the passenger
    ///   but is not its current flight.
    ///
    /// Nothing is mutated when an error is returned.
    pub fn join_flight(
        &mut self,
        passenger: &PassengerId,
        target: Option<&FlightNumber>,
    ) -> RosterResult<()> {
        let outcome = self
            .check_transfer(passenger, target)
            .and_then(|previous| self.apply_transfer(passenger, previous.as_ref(), target));

        let to = target.map_or("none", FlightNumber::as_str);
        match &outcome {
            Ok(()) => {
                debug!("event=join_flight module=roster status=ok passenger={passenger} to={to}")
            }
            Err(err) => warn!(
                "event=join_flight module=roster status=error passenger={passenger} to={to} error={err}"
            ),
        }
        outcome
    }

    /// Returns every place where the two sides of the relation disagree.
    ///
    /// Empty for a roster only ever changed through `join_flight`.
    pub fn audit_links(&self) -> Vec<LinkMismatch> {
        let mut mismatches = Vec::new();

        for passenger in self.repo.list_passengers() {
            let Some(number) = passenger.flight() else {
                continue;
            };
            let listed = self
                .repo
                .get_flight(number)
                .is_some_and(|flight| flight.has_passenger(passenger.identifier()));
            if !listed {
                mismatches.push(LinkMismatch::DanglingBackReference {
                    passenger: passenger.identifier().clone(),
                    flight: number.clone(),
                });
            }
        }

        for flight in self.repo.list_flights() {
            for id in flight.passenger_ids() {
                let linked = self
                    .repo
                    .get_passenger(id)
                    .is_some_and(|passenger| passenger.flight() == Some(flight.flight_number()));
                if !linked {
                    mismatches.push(LinkMismatch::StaleMembership {
                        flight: flight.flight_number().clone(),
                        passenger: id.clone(),
                    });
                }
            }
        }

        if !mismatches.is_empty() {
            warn!(
                "event=audit_links module=roster status=inconsistent mismatches={}",
                mismatches.len()
            );
        }
        mismatches
    }

    /// Validates a transfer and returns the passenger's current flight.
    fn check_transfer(
        &self,
        passenger: &PassengerId,
        target: Option<&FlightNumber>,
    ) -> RosterResult<Option<FlightNumber>> {
        let previous = self.passenger(passenger)?.flight().cloned();
        let target_flight = target.map(|number| self.flight(number)).transpose()?;

        if let Some(previous) = previous.as_ref() {
            let listed = self
                .repo
                .get_flight(previous)
                .is_some_and(|flight| flight.has_passenger(passenger));
            if !listed {
                return Err(TransferError::CannotRemove {
                    passenger: passenger.clone(),
                    flight: previous.clone(),
                }
                .into());
            }
        }

        if let Some(flight) = target_flight {
            let rejoining = previous.as_ref() == Some(flight.flight_number());
            let occupied = flight
                .number_of_passengers()
                .saturating_sub(usize::from(rejoining));
            if flight.seats_reached(occupied) {
                return Err(RosterError::CapacityExceeded {
                    flight_number: flight.flight_number().clone(),
                    seat_capacity: flight.seat_capacity(),
                });
            }
            if !rejoining && flight.has_passenger(passenger) {
                return Err(TransferError::CannotAdd {
                    passenger: passenger.clone(),
                    flight: flight.flight_number().clone(),
                }
                .into());
            }
        }

        Ok(previous)
    }

    fn apply_transfer(
        &mut self,
        passenger: &PassengerId,
        previous: Option<&FlightNumber>,
        target: Option<&FlightNumber>,
    ) -> RosterResult<()> {
        if let Some(previous) = previous {
            let (flight, traveller) = self.repo.flight_and_passenger_mut(previous, passenger)?;
            if !flight.remove_passenger(traveller) {
                return Err(TransferError::CannotRemove {
                    passenger: passenger.clone(),
                    flight: previous.clone(),
                }
                .into());
            }
        }

        if let Some(target) = target {
            let (flight, traveller) = self.repo.flight_and_passenger_mut(target, passenger)?;
            if !flight.add_passenger(traveller)? {
                return Err(TransferError::CannotAdd {
                    passenger: passenger.clone(),
                    flight: target.clone(),
                }
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{RosterError, RosterService, TransferError};
    use crate::model::flight::FlightNumber;
    use crate::model::passenger::PassengerId;
    use crate::repo::roster_repo::InMemoryRosterRepository;

    fn service() -> RosterService<InMemoryRosterRepository> {
        RosterService::new(InMemoryRosterRepository::new())
    }

    #[test]
    fn rejoining_the_same_full_flight_succeeds() {
        let mut roster = service();
        let flight = roster.register_flight("AA1234", 1).unwrap();
        let id = roster.register_passenger("P1", "Ann", "US").unwrap();

        roster.join_flight(&id, Some(&flight)).unwrap();
        roster.join_flight(&id, Some(&flight)).unwrap();

        assert_eq!(roster.flight(&flight).unwrap().number_of_passengers(), 1);
        assert_eq!(roster.passenger(&id).unwrap().flight(), Some(&flight));
    }

    #[test]
    fn join_checks_unknown_ids_before_mutating() {
        let mut roster = service();
        let flight = roster.register_flight("AA1234", 2).unwrap();
        let id = roster.register_passenger("P1", "Ann", "US").unwrap();
        roster.join_flight(&id, Some(&flight)).unwrap();

        let missing = FlightNumber::parse("ZZ999").unwrap();
        let err = roster.join_flight(&id, Some(&missing)).unwrap_err();
        assert_eq!(err, RosterError::FlightNotFound(missing));
        assert!(roster.flight(&flight).unwrap().has_passenger(&id));

        let ghost = PassengerId::new("ghost");
        let err = roster.join_flight(&ghost, Some(&flight)).unwrap_err();
        assert_eq!(err, RosterError::PassengerNotFound(ghost));
    }

    #[test]
    fn transfer_error_is_exposed_as_source() {
        use std::error::Error;

        let err = RosterError::from(TransferError::CannotAdd {
            passenger: PassengerId::new("P1"),
            flight: FlightNumber::parse("AA1234").unwrap(),
        });
        assert_eq!(err.to_string(), "cannot add passenger P1 to flight AA1234");
        assert!(err.source().is_some());
    }
}
