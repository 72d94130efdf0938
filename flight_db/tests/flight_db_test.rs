use test_case::test_case;

use flight_db::{FlightDb, FlightRecord, WeekTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn flight(number: &str, from: &str, to: &str, day: u8, hour: u8, minute: u8) -> FlightRecord {
    FlightRecord::new(number, from, to, day, hour, minute, 90).unwrap()
}

fn at(day: u8, hour: u8, minute: u8) -> WeekTime {
    WeekTime::new(day, hour, minute).unwrap()
}

fn summary(records: &[&FlightRecord]) -> Vec<(String, String, u8, u8, u8)> {
    records
        .iter()
        .map(|r| {
            (
                r.flight_number().to_string(),
                r.departure_airport().to_string(),
                r.day(),
                r.hour(),
                r.minute(),
            )
        })
        .collect()
}

fn sample_db() -> FlightDb {
    let mut db = FlightDb::new();
    let flights = [
        flight("QF1", "SYD", "LHR", 2, 10, 0),
        flight("QF1", "SYD", "LHR", 5, 8, 0),
        flight("QF2", "LHR", "SYD", 2, 10, 0),
        flight("QF409", "SYD", "MEL", 2, 7, 40),
        flight("VA812", "SYD", "MEL", 2, 7, 40),
        flight("JQ501", "MEL", "SYD", 0, 6, 15),
        flight("NZ102", "SYD", "AKL", 6, 23, 59),
    ];
    for record in flights {
        assert!(db.insert(record));
    }
    db
}

#[test]
fn test_duplicate_insert_succeeds_once() {
    let mut db = FlightDb::new();
    assert!(db.insert(flight("QF1", "SYD", "LHR", 2, 10, 0)));
    assert!(!db.insert(flight("QF1", "SYD", "LHR", 2, 10, 0)));
    // Destination and duration are not part of the identity.
    assert!(!db.insert(FlightRecord::new("QF1", "SYD", "SIN", 2, 10, 0, 480).unwrap()));

    let stats = db.index_stats();
    assert_eq!(db.len(), 1);
    assert_eq!(stats.by_flight_number, 1);
    assert_eq!(stats.by_departure_airport_day, 1);
    assert_eq!(stats.by_time, 1);
}

#[test]
fn test_find_by_flight_number_orders_by_time() {
    let db = sample_db();
    let found = db.find_by_flight_number("QF1");
    assert_eq!(
        summary(&found),
        vec![
            ("QF1".to_string(), "SYD".to_string(), 2, 10, 0),
            ("QF1".to_string(), "SYD".to_string(), 5, 8, 0),
        ]
    );
}

#[test_case("QF" ; "prefix of real flight numbers")]
#[test_case("QF10" ; "extension of a real flight number")]
#[test_case("ZZ999" ; "unknown flight number")]
fn test_find_by_flight_number_no_matches(flight_number: &str) {
    let db = sample_db();
    assert!(db.find_by_flight_number(flight_number).is_empty());
}

#[test]
fn test_find_by_departure_airport_day_orders_by_time_then_number() {
    let db = sample_db();
    let found = db.find_by_departure_airport_day("SYD", 2);
    let numbers: Vec<&str> = found.iter().map(|r| r.flight_number()).collect();
    assert_eq!(numbers, vec!["QF409", "VA812", "QF1"]);
    assert!(found.iter().all(|r| r.departure_airport() == "SYD" && r.day() == 2));
}

#[test]
fn test_find_by_departure_airport_day_includes_last_minute() {
    let db = sample_db();
    let found = db.find_by_departure_airport_day("SYD", 6);
    assert_eq!(summary(&found), vec![("NZ102".to_string(), "SYD".to_string(), 6, 23, 59)]);
}

#[test_case("SYD", 1 ; "airport with no flights that day")]
#[test_case("SY", 2 ; "airport prefix")]
#[test_case("PER", 2 ; "unknown airport")]
fn test_find_by_departure_airport_day_no_matches(airport: &str, day: u8) {
    let db = sample_db();
    assert!(db.find_by_departure_airport_day(airport, day).is_empty());
}

#[test]
fn test_find_between_times_whole_week() {
    let db = sample_db();
    let found = db.find_between_times(at(0, 0, 0), at(6, 23, 59));
    let keys: Vec<(u8, u8, u8, &str)> = found
        .iter()
        .map(|r| (r.day(), r.hour(), r.minute(), r.flight_number()))
        .collect();
    assert_eq!(
        keys,
        vec![
            (0, 6, 15, "JQ501"),
            (2, 7, 40, "QF409"),
            (2, 7, 40, "VA812"),
            (2, 10, 0, "QF1"),
            (2, 10, 0, "QF2"),
            (5, 8, 0, "QF1"),
            (6, 23, 59, "NZ102"),
        ]
    );
}

#[test]
fn test_find_between_times_bounds_are_inclusive() {
    let db = sample_db();
    let found = db.find_between_times(at(2, 7, 40), at(2, 10, 0));
    assert_eq!(found.len(), 4);

    assert!(db.find_between_times(at(2, 7, 41), at(2, 9, 59)).is_empty());
    assert!(db.find_between_times(at(5, 0, 0), at(1, 0, 0)).is_empty());
}

#[test]
fn test_find_next_flight_same_day() {
    let db = sample_db();
    let next = db.find_next_flight("SYD", at(2, 8, 0)).unwrap();
    assert_eq!(next.flight_number(), "QF1");
    assert_eq!(next.departure(), at(2, 10, 0));

    let exact = db.find_next_flight("SYD", at(2, 7, 40)).unwrap();
    assert_eq!(exact.flight_number(), "QF409");
}

#[test]
fn test_find_next_flight_wraps_to_next_week() {
    let mut db = FlightDb::new();
    db.insert(flight("QF1", "SYD", "LHR", 1, 6, 0));
    db.insert(flight("JQ1", "MEL", "SYD", 4, 9, 0));

    let next = db.find_next_flight("SYD", at(3, 23, 0)).unwrap();
    assert_eq!(next.flight_number(), "QF1");
    assert_eq!(next.departure(), at(1, 6, 0));
}

#[test]
fn test_find_next_flight_unknown_airport() {
    let mut db = FlightDb::new();
    db.insert(flight("JQ1", "MEL", "SYD", 4, 9, 0));
    db.insert(flight("NZ1", "WLG", "SYD", 4, 9, 0));

    assert!(db.find_next_flight("SYD", at(3, 23, 0)).is_none());
    assert!(FlightDb::new().find_next_flight("SYD", at(0, 0, 0)).is_none());
}

#[test]
fn test_find_next_flight_does_not_cross_into_other_airport() {
    let db = sample_db();
    // MEL only has a Monday departure; from Sunday it wraps rather than returning NZ102 or SYD flights.
    let next = db.find_next_flight("MEL", at(6, 0, 0)).unwrap();
    assert_eq!(next.flight_number(), "JQ501");
    assert_eq!(next.departure_airport(), "MEL");
}

#[test]
fn test_iter_and_insert_all() {
    let mut db = FlightDb::new();
    let accepted = db.insert_all(vec![
        flight("B2", "AAA", "BBB", 3, 0, 0),
        flight("A1", "AAA", "BBB", 1, 0, 0),
        flight("A1", "AAA", "BBB", 1, 0, 0),
    ]);
    assert_eq!(accepted, 2);
    let numbers: Vec<&str> = db.iter().map(|r| r.flight_number()).collect();
    assert_eq!(numbers, vec!["A1", "B2"]);
}

#[test]
fn test_random_schedule_indexes_agree() {
    let mut rng = StdRng::seed_from_u64(2024);
    let airports = ["SYD", "MEL", "BNE", "PER", "ADL"];
    let mut db = FlightDb::new();
    let mut accepted = Vec::new();

    for _ in 0..3000 {
        let number = format!("QF{}", rng.gen_range(1..200));
        let airport = airports[rng.gen_range(0..airports.len())];
        let record = flight(
            &number,
            airport,
            "XXX",
            rng.gen_range(0..7),
            rng.gen_range(0..24),
            rng.gen_range(0..4) * 15,
        );
        if db.insert(record.clone()) {
            accepted.push(record);
        }
    }

    let stats = db.index_stats();
    assert_eq!(stats.by_departure_airport_day, accepted.len());
    assert_eq!(stats.by_flight_number, accepted.len());
    assert_eq!(stats.by_time, accepted.len());

    for record in &accepted {
        assert!(db.contains(record));
    }

    // Each query returns exactly the matching records, in index order.
    for number in 1..200 {
        let number = format!("QF{}", number);
        let mut expected: Vec<&FlightRecord> =
            accepted.iter().filter(|r| r.flight_number() == number).collect();
        expected.sort_by_key(|r| r.departure());
        assert_eq!(summary(&db.find_by_flight_number(&number)), summary(&expected));
    }

    for airport in airports {
        for day in 0..7 {
            let mut expected: Vec<&FlightRecord> = accepted
                .iter()
                .filter(|r| r.departure_airport() == airport && r.day() == day)
                .collect();
            expected.sort_by_key(|r| (r.departure(), r.flight_number().to_string()));
            assert_eq!(
                summary(&db.find_by_departure_airport_day(airport, day)),
                summary(&expected)
            );
        }
    }

    for _ in 0..200 {
        // Bounds are drawn independently, so some ranges are inverted.
        let from = at(rng.gen_range(0..7), rng.gen_range(0..24), rng.gen_range(0..60));
        let to = at(rng.gen_range(0..7), rng.gen_range(0..24), rng.gen_range(0..60));
        let mut expected: Vec<&FlightRecord> = accepted
            .iter()
            .filter(|r| from <= r.departure() && r.departure() <= to)
            .collect();
        expected.sort_by_key(|r| (r.departure(), r.flight_number().to_string()));

        let found = db.find_between_times(from, to);
        if from > to {
            assert!(found.is_empty());
        }
        assert_eq!(summary(&found), summary(&expected));
    }

    // Next flight agrees with a linear scan.
    for _ in 0..200 {
        let airport = airports[rng.gen_range(0..airports.len())];
        let query = at(rng.gen_range(0..7), rng.gen_range(0..24), rng.gen_range(0..60));
        let from_airport = accepted.iter().filter(|r| r.departure_airport() == airport);
        let expected = from_airport
            .clone()
            .filter(|r| r.departure() >= query)
            .min_by_key(|r| r.departure())
            .or_else(|| from_airport.min_by_key(|r| r.departure()));
        let found = db.find_next_flight(airport, query);
        assert_eq!(found.map(|r| r.departure()), expected.map(|r| r.departure()));
    }
}
