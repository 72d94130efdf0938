//! Record orderings for the three flight indexes.
//!
//! A comparator returning `Equal` marks two records as duplicates for the
//! tree that uses it, so the fields each one compares also define record
//! identity in that tree.

use std::cmp::Ordering;

use common::FlightRecord;

/// A three-way ordering over flight records.
pub type RecordComparator = fn(&FlightRecord, &FlightRecord) -> Ordering;

/// Orders by day, hour, minute, then flight number.
pub fn by_time(a: &FlightRecord, b: &FlightRecord) -> Ordering {
    a.departure()
        .cmp(&b.departure())
        .then_with(|| a.flight_number().cmp(b.flight_number()))
}

/// Orders by departure airport, then as [`by_time`].
///
/// All departures from one airport are contiguous and sorted by weekly time.
pub fn by_departure_airport_day(a: &FlightRecord, b: &FlightRecord) -> Ordering {
    a.departure_airport()
        .cmp(b.departure_airport())
        .then_with(|| by_time(a, b))
}

/// Orders by flight number, then day, hour, minute.
pub fn by_flight_number(a: &FlightRecord, b: &FlightRecord) -> Ordering {
    a.flight_number()
        .cmp(b.flight_number())
        .then_with(|| a.departure().cmp(&b.departure()))
}
