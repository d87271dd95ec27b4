//! Passenger domain model.
//!
//! # Responsibility
//! - Hold caller-supplied passenger identity and a validated country code.
//! - Carry the back-reference to at most one flight.
//!
//! # Invariants
//! - `country_code` is always an assigned ISO 3166-1 alpha-2 code.
//! - `flight` is only mutated by flight membership operations inside this crate.
//! - Flight membership is keyed by `PassengerId`; two records with the same
//!   identifier are the same member. `PartialEq` compares whole records,
//!   back-reference included.

use crate::model::country::{CountryCode, CountryCodeError};
use crate::model::flight::FlightNumber;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Caller-supplied passenger identifier. No format is imposed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PassengerId(String);

impl PassengerId {
    /// Wraps any string as an identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Raw identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PassengerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PassengerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PassengerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Passenger construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassengerError {
    /// Country code is not an assigned ISO 3166-1 alpha-2 code.
    InvalidCountryCode(String),
}

impl Display for PassengerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCountryCode(value) => write!(f, "invalid country code: `{value}`"),
        }
    }
}

impl Error for PassengerError {}

impl From<CountryCodeError> for PassengerError {
    fn from(value: CountryCodeError) -> Self {
        Self::InvalidCountryCode(value.0)
    }
}

/// A traveller that may be enrolled in at most one flight.
///
/// Equality is structural over all fields, including the back-reference.
/// Use `identifier()` to compare identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    identifier: PassengerId,
    name: String,
    country_code: CountryCode,
    /// Back-reference to the flight whose membership set should list this passenger.
    flight: Option<FlightNumber>,
}

impl Passenger {
    /// Creates an unassigned passenger.
    ///
    /// Identifier and name are accepted as-is, including empty strings.
    ///
    /// # Errors
    /// - `PassengerError::InvalidCountryCode` when `country_code` is not in
    ///   the ISO 3166-1 alpha-2 table.
    pub fn new(
        identifier: impl Into<PassengerId>,
        name: impl Into<String>,
        country_code: &str,
    ) -> Result<Self, PassengerError> {
        let country_code = CountryCode::parse(country_code)?;
        Ok(Self {
            identifier: identifier.into(),
            name: name.into(),
            country_code,
            flight: None,
        })
    }

    /// Caller-supplied identity.
    pub fn identifier(&self) -> &PassengerId {
        &self.identifier
    }

    /// Display name, unvalidated.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validated ISO 3166-1 alpha-2 code.
    pub fn country_code(&self) -> &CountryCode {
        &self.country_code
    }

    /// Flight this passenger believes it is enrolled in.
    pub fn flight(&self) -> Option<&FlightNumber> {
        self.flight.as_ref()
    }

    /// Overwrites the back-reference without touching any membership set.
    pub(crate) fn set_flight(&mut self, flight: Option<FlightNumber>) {
        self.flight = flight;
    }
}

impl Display for Passenger {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Passenger {} with identifier: {} from {}",
            self.name, self.identifier, self.country_code
        )
    }
}
