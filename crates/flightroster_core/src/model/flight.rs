//! Flight domain model.
//!
//! # Responsibility
//! - Validate flight numbers (`^[A-Z]{2}[0-9]{3,4}$`).
//! - Own the capacity-bounded membership set of passenger ids.
//! - Provide the low-level add/remove operations that also update the
//!   passenger back-reference.
//!
//! # Invariants
//! - `flight_number` and `seat_capacity` never change after construction.
//! - Membership never grows past `seat_capacity`; zero or negative capacity
//!   means every add is rejected.
//! - Membership is keyed by `PassengerId`.

use crate::model::passenger::{Passenger, PassengerId};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

// `[0-9]` rather than `\d`: the latter matches non-ASCII digits in `regex`.
static FLIGHT_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}[0-9]{3,4}$").expect("valid flight number regex"));

/// Flight-level errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlightError {
    /// Flight number does not match two uppercase letters + 3-4 digits.
    InvalidFormat(String),
    /// Flight already holds `seat_capacity` passengers.
    CapacityExceeded {
        flight_number: FlightNumber,
        seat_capacity: i32,
    },
}

impl Display for FlightError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat(value) => write!(f, "invalid flight number: `{value}`"),
            Self::CapacityExceeded {
                flight_number,
                seat_capacity,
            } => write!(
                f,
                "not enough seats for flight {flight_number} (capacity {seat_capacity})"
            ),
        }
    }
}

impl Error for FlightError {}

/// Validated flight number, e.g. `AA1234`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FlightNumber(String);

impl FlightNumber {
    /// Parses a flight number without trimming or case folding.
    pub fn parse(value: &str) -> Result<Self, FlightError> {
        Self::try_from(value.to_string())
    }

    /// Flight number as parsed.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FlightNumber {
    type Error = FlightError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if !FLIGHT_NUMBER_RE.is_match(&value) {
            return Err(FlightError::InvalidFormat(value));
        }
        Ok(Self(value))
    }
}

impl From<FlightNumber> for String {
    fn from(value: FlightNumber) -> Self {
        value.0
    }
}

impl Display for FlightNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A flight with bounded seating and an unordered set of enrolled passengers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FlightRecord")]
pub struct Flight {
    flight_number: FlightNumber,
    seat_capacity: i32,
    passengers: BTreeSet<PassengerId>,
}

/// Unchecked wire shape; converted through `Flight::try_from`.
#[derive(Deserialize)]
struct FlightRecord {
    flight_number: FlightNumber,
    seat_capacity: i32,
    #[serde(default)]
    passengers: BTreeSet<PassengerId>,
}

impl TryFrom<FlightRecord> for Flight {
    type Error = FlightError;

    fn try_from(record: FlightRecord) -> Result<Self, Self::Error> {
        if exceeds_capacity(record.seat_capacity, record.passengers.len()) {
            return Err(FlightError::CapacityExceeded {
                flight_number: record.flight_number,
                seat_capacity: record.seat_capacity,
            });
        }
        Ok(Self {
            flight_number: record.flight_number,
            seat_capacity: record.seat_capacity,
            passengers: record.passengers,
        })
    }
}

impl Flight {
    /// Creates an empty flight.
    ///
    /// `seat_capacity` is not validated.
    ///
    /// # Errors
    /// - `FlightError::InvalidFormat` when `flight_number` is malformed.
    pub fn new(flight_number: &str, seat_capacity: i32) -> Result<Self, FlightError> {
        Ok(Self {
            flight_number: FlightNumber::parse(flight_number)?,
            seat_capacity,
            passengers: BTreeSet::new(),
        })
    }

    /// Immutable flight identity.
    pub fn flight_number(&self) -> &FlightNumber {
        &self.flight_number
    }

    /// Seat limit given at construction; may be zero or negative.
    pub fn seat_capacity(&self) -> i32 {
        self.seat_capacity
    }

    /// Current membership size.
    pub fn number_of_passengers(&self) -> usize {
        self.passengers.len()
    }

    /// Seats still free; zero for full or non-positive-capacity flights.
    pub fn available_seats(&self) -> usize {
        usize::try_from(self.seat_capacity)
            .unwrap_or(0)
            .saturating_sub(self.passengers.len())
    }

    /// True when no further passenger can be added.
    pub fn is_full(&self) -> bool {
        self.seats_reached(self.passengers.len())
    }

    /// Whether `occupied` passengers would leave no free seat.
    pub(crate) fn seats_reached(&self, occupied: usize) -> bool {
        usize::try_from(self.seat_capacity).map_or(true, |capacity| occupied >= capacity)
    }

    /// Membership test by identifier.
    pub fn has_passenger(&self, passenger: &PassengerId) -> bool {
        self.passengers.contains(passenger)
    }

    /// Member ids in ascending order.
    pub fn passenger_ids(&self) -> impl Iterator<Item = &PassengerId> {
        self.passengers.iter()
    }

    /// Enrolls `passenger` and points its back-reference at this flight.
    ///
    /// Returns `Ok(false)` when the passenger is already a member. The
    /// back-reference is overwritten even if it pointed at another flight;
    /// that flight's membership is not cleaned up. Use
    /// `RosterService::join_flight` to move a passenger between flights.
    ///
    /// # Errors
    /// - `FlightError::CapacityExceeded` when the flight is already full.
    pub fn add_passenger(&mut self, passenger: &mut Passenger) -> Result<bool, FlightError> {
        if self.is_full() {
            return Err(FlightError::CapacityExceeded {
                flight_number: self.flight_number.clone(),
                seat_capacity: self.seat_capacity,
            });
        }
        passenger.set_flight(Some(self.flight_number.clone()));
        Ok(self.passengers.insert(passenger.identifier().clone()))
    }

    /// Drops `passenger` from the membership set.
    ///
    /// The back-reference is cleared whether or not the passenger was a
    /// member. Returns whether it was present.
    pub fn remove_passenger(&mut self, passenger: &mut Passenger) -> bool {
        passenger.set_flight(None);
        self.passengers.remove(passenger.identifier())
    }
}

fn exceeds_capacity(seat_capacity: i32, occupied: usize) -> bool {
    match usize::try_from(seat_capacity) {
        Ok(capacity) => occupied > capacity,
        Err(_) => occupied > 0,
    }
}
