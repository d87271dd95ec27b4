use flightroster_core::{Flight, FlightError, Passenger};

#[test]
fn flight_initialization_exposes_number_and_empty_roster() {
    let flight = Flight::new("AA1234", 5).unwrap();

    assert_eq!(flight.flight_number().as_str(), "AA1234");
    assert_eq!(flight.number_of_passengers(), 0);
    assert_eq!(flight.seat_capacity(), 5);
    assert_eq!(flight.available_seats(), 5);
}

#[test]
fn invalid_flight_number_is_rejected() {
    let err = Flight::new("INVALID123", 5).unwrap_err();
    assert_eq!(err, FlightError::InvalidFormat("INVALID123".to_string()));
}

#[test]
fn add_passenger_increments_count() {
    let mut flight = Flight::new("AA1234", 5).unwrap();
    let mut passenger = Passenger::new("P123", "John Doe", "US").unwrap();

    assert!(flight.add_passenger(&mut passenger).unwrap());
    assert_eq!(flight.number_of_passengers(), 1);
    assert_eq!(passenger.flight(), Some(flight.flight_number()));
}

#[test]
fn adding_past_capacity_fails() {
    let mut flight = Flight::new("AA1234", 1).unwrap();
    let mut first = Passenger::new("P123", "John Doe", "US").unwrap();
    let mut second = Passenger::new("P124", "Jane Doe", "US").unwrap();

    flight.add_passenger(&mut first).unwrap();
    let err = flight.add_passenger(&mut second).unwrap_err();

    assert!(matches!(
        err,
        FlightError::CapacityExceeded { ref flight_number, seat_capacity: 1 }
            if flight_number.as_str() == "AA1234"
    ));
    assert_eq!(flight.number_of_passengers(), 1);
    assert!(second.flight().is_none());
}

#[test]
fn adding_same_passenger_twice_counts_once() {
    let mut flight = Flight::new("AA1234", 5).unwrap();
    let mut passenger = Passenger::new("P123", "John Doe", "US").unwrap();

    assert!(flight.add_passenger(&mut passenger).unwrap());
    assert!(!flight.add_passenger(&mut passenger).unwrap());
    assert_eq!(flight.number_of_passengers(), 1);
}

#[test]
fn membership_is_keyed_by_identifier() {
    let mut flight = Flight::new("AA1234", 5).unwrap();
    let mut original = Passenger::new("P123", "John Doe", "US").unwrap();
    let mut same_id = Passenger::new("P123", "Johnny Doe", "CA").unwrap();

    assert!(flight.add_passenger(&mut original).unwrap());
    assert!(!flight.add_passenger(&mut same_id).unwrap());
    assert_eq!(flight.number_of_passengers(), 1);
}

#[test]
fn remove_passenger_decrements_count() {
    let mut flight = Flight::new("AA1234", 5).unwrap();
    let mut passenger = Passenger::new("P123", "John Doe", "US").unwrap();

    flight.add_passenger(&mut passenger).unwrap();
    assert!(flight.remove_passenger(&mut passenger));
    assert_eq!(flight.number_of_passengers(), 0);
    assert!(passenger.flight().is_none());
}

#[test]
fn removing_absent_passenger_returns_false() {
    let mut flight = Flight::new("AA1234", 5).unwrap();
    let mut member = Passenger::new("P1", "Ann", "US").unwrap();
    let mut stranger = Passenger::new("P123", "John Doe", "US").unwrap();
    flight.add_passenger(&mut member).unwrap();

    assert!(!flight.remove_passenger(&mut stranger));
    assert_eq!(flight.number_of_passengers(), 1);
}

#[test]
fn direct_add_overwrites_back_reference_without_cleanup() {
    let mut first = Flight::new("AA1234", 5).unwrap();
    let mut second = Flight::new("BB5678", 5).unwrap();
    let mut passenger = Passenger::new("P123", "John Doe", "US").unwrap();

    first.add_passenger(&mut passenger).unwrap();
    second.add_passenger(&mut passenger).unwrap();

    assert_eq!(passenger.flight(), Some(second.flight_number()));
    assert!(first.has_passenger(passenger.identifier()));
    assert!(second.has_passenger(passenger.identifier()));
}

#[test]
fn serialization_round_trips_and_validates() {
    let mut flight = Flight::new("AA1234", 2).unwrap();
    let mut passenger = Passenger::new("P1", "Ann", "US").unwrap();
    flight.add_passenger(&mut passenger).unwrap();

    let json = serde_json::to_value(&flight).unwrap();
    assert_eq!(json["flight_number"], "AA1234");
    assert_eq!(json["seat_capacity"], 2);
    assert_eq!(json["passengers"], serde_json::json!(["P1"]));
    let decoded: Flight = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, flight);

    let bad_number = serde_json::json!({
        "flight_number": "aa1234",
        "seat_capacity": 2,
        "passengers": []
    });
    let err = serde_json::from_value::<Flight>(bad_number).unwrap_err();
    assert!(err.to_string().contains("invalid flight number"), "unexpected error: {err}");

    let overbooked = serde_json::json!({
        "flight_number": "AA1234",
        "seat_capacity": 1,
        "passengers": ["P1", "P2"]
    });
    let err = serde_json::from_value::<Flight>(overbooked).unwrap_err();
    assert!(err.to_string().contains("not enough seats"), "unexpected error: {err}");
}
