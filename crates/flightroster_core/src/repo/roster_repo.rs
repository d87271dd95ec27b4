//! Roster repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Store flights and passengers keyed by their stable ids.
//! - Hand out disjoint mutable access to one flight and one passenger so
//!   membership operations can update both sides of the relation.
//!
//! # Invariants
//! - Ids are unique per entity kind; inserts never overwrite.
//! - Listing order is deterministic (ascending id).

use crate::model::flight::{Flight, FlightNumber};
use crate::model::passenger::{Passenger, PassengerId};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Lookup and registration errors raised by roster storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    DuplicateFlight(FlightNumber),
    DuplicatePassenger(PassengerId),
    FlightNotFound(FlightNumber),
    PassengerNotFound(PassengerId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateFlight(number) => write!(f, "flight already registered: {number}"),
            Self::DuplicatePassenger(id) => write!(f, "passenger already registered: {id}"),
            Self::FlightNotFound(number) => write!(f, "flight not found: {number}"),
            Self::PassengerNotFound(id) => write!(f, "passenger not found: {id}"),
        }
    }
}

impl Error for RepoError {}

/// Storage contract for roster entities.
pub trait RosterRepository {
    fn insert_flight(&mut self, flight: Flight) -> RepoResult<()>;
    fn insert_passenger(&mut self, passenger: Passenger) -> RepoResult<()>;
    fn get_flight(&self, number: &FlightNumber) -> Option<&Flight>;
    fn get_passenger(&self, id: &PassengerId) -> Option<&Passenger>;
    /// Borrows one flight and one passenger mutably at the same time.
    fn flight_and_passenger_mut(
        &mut self,
        number: &FlightNumber,
        id: &PassengerId,
    ) -> RepoResult<(&mut Flight, &mut Passenger)>;
    fn list_flights(&self) -> Vec<&Flight>;
    fn list_passengers(&self) -> Vec<&Passenger>;
}

/// Map-backed roster storage. Nothing is persisted.
#[derive(Debug, Default)]
pub struct InMemoryRosterRepository {
    flights: BTreeMap<FlightNumber, Flight>,
    passengers: BTreeMap<PassengerId, Passenger>,
}

impl InMemoryRosterRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RosterRepository for InMemoryRosterRepository {
    fn insert_flight(&mut self, flight: Flight) -> RepoResult<()> {
        if self.flights.contains_key(flight.flight_number()) {
            return Err(RepoError::DuplicateFlight(flight.flight_number().clone()));
        }
        self.flights.insert(flight.flight_number().clone(), flight);
        Ok(())
    }

    fn insert_passenger(&mut self, passenger: Passenger) -> RepoResult<()> {
        if self.passengers.contains_key(passenger.identifier()) {
            return Err(RepoError::DuplicatePassenger(
                passenger.identifier().clone(),
            ));
        }
        self.passengers
            .insert(passenger.identifier().clone(), passenger);
        Ok(())
    }

    fn get_flight(&self, number: &FlightNumber) -> Option<&Flight> {
        self.flights.get(number)
    }

    fn get_passenger(&self, id: &PassengerId) -> Option<&Passenger> {
        self.passengers.get(id)
    }

    fn flight_and_passenger_mut(
        &mut self,
        number: &FlightNumber,
        id: &PassengerId,
    ) -> RepoResult<(&mut Flight, &mut Passenger)> {
        let flight = self
            .flights
            .get_mut(number)
            .ok_or_else(|| RepoError::FlightNotFound(number.clone()))?;
        let passenger = self
            .passengers
            .get_mut(id)
            .ok_or_else(|| RepoError::PassengerNotFound(id.clone()))?;
        Ok((flight, passenger))
    }

    fn list_flights(&self) -> Vec<&Flight> {
        self.flights.values().collect()
    }

    fn list_passengers(&self) -> Vec<&Passenger> {
        self.passengers.values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryRosterRepository, RepoError, RosterRepository};
    use crate::model::flight::{Flight, FlightNumber};
    use crate::model::passenger::{Passenger, PassengerId};

    #[test]
    fn rejects_duplicate_ids() {
        let mut repo = InMemoryRosterRepository::new();
        repo.insert_flight(Flight::new("AA1234", 5).unwrap()).unwrap();
        repo.insert_passenger(Passenger::new("P1", "Ann", "US").unwrap())
            .unwrap();

        let err = repo
            .insert_flight(Flight::new("AA1234", 9).unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            RepoError::DuplicateFlight(FlightNumber::parse("AA1234").unwrap())
        );
        assert_eq!(
            repo.get_flight(&FlightNumber::parse("AA1234").unwrap())
                .unwrap()
                .seat_capacity(),
            5
        );

        let err = repo
            .insert_passenger(Passenger::new("P1", "Other", "GB").unwrap())
            .unwrap_err();
        assert_eq!(err, RepoError::DuplicatePassenger(PassengerId::new("P1")));
    }

    #[test]
    fn disjoint_borrow_reports_missing_side() {
        let mut repo = InMemoryRosterRepository::new();
        repo.insert_flight(Flight::new("AA1234", 5).unwrap()).unwrap();
        let number = FlightNumber::parse("AA1234").unwrap();
        let missing_flight = FlightNumber::parse("ZZ999").unwrap();
        let id = PassengerId::new("P9");

        assert_eq!(
            repo.flight_and_passenger_mut(&number, &id).unwrap_err(),
            RepoError::PassengerNotFound(id.clone())
        );
        assert_eq!(
            repo.flight_and_passenger_mut(&missing_flight, &id)
                .unwrap_err(),
            RepoError::FlightNotFound(missing_flight)
        );
    }

    #[test]
    fn lists_in_id_order() {
        let mut repo = InMemoryRosterRepository::new();
        repo.insert_flight(Flight::new("ZZ100", 1).unwrap()).unwrap();
        repo.insert_flight(Flight::new("AA100", 1).unwrap()).unwrap();

        let numbers: Vec<&str> = repo
            .list_flights()
            .into_iter()
            .map(|flight| flight.flight_number().as_str())
            .collect();
        assert_eq!(numbers, vec!["AA100", "ZZ100"]);
    }
}
