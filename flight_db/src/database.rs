//! FlightDb - three ordered indexes over one set of flight records.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use avl_tree::AvlTree;
use common::{FlightRecord, WeekTime, MAX_SENTINEL, MIN_SENTINEL};
use log::{debug, trace};

use crate::comparator::{self, RecordComparator};
use crate::{FlightDbError, Result};

type SharedRecord = Arc<FlightRecord>;
type IndexComparator = Box<dyn Fn(&SharedRecord, &SharedRecord) -> Ordering>;
type RecordIndex = AvlTree<SharedRecord, IndexComparator>;

fn new_index(compare: RecordComparator) -> RecordIndex {
    let compare: IndexComparator = Box::new(move |a: &SharedRecord, b: &SharedRecord| compare(a, b));
    AvlTree::new(compare)
}

/// Builds a probe for a range or successor query. Probes are never stored.
fn probe(flight_number: &str, departure_airport: &str, departure: WeekTime) -> SharedRecord {
    Arc::new(FlightRecord::probe(flight_number, departure_airport, departure))
}

fn unshare<'a>(records: Vec<&'a SharedRecord>) -> Vec<&'a FlightRecord> {
    records.into_iter().map(|record| record.as_ref()).collect()
}

/// Record counts and heights of the three indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    pub by_flight_number: usize,
    pub by_departure_airport_day: usize,
    pub by_time: usize,
    pub max_height: i32,
}

/// The flight database.
///
/// Every stored record is indexed three times: by departure airport and time
/// (the primary index, which decides admission), by flight number and time,
/// and by weekly time alone. The indexes share each record through an `Arc`,
/// so its storage is released once, when the database is dropped.
pub struct FlightDb {
    by_flight_number: RecordIndex,
    by_departure_airport_day: RecordIndex,
    by_time: RecordIndex,
}

impl FlightDb {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self {
            by_flight_number: new_index(comparator::by_flight_number),
            by_departure_airport_day: new_index(comparator::by_departure_airport_day),
            by_time: new_index(comparator::by_time),
        }
    }

    /// Returns the number of stored records.
    pub fn len(&self) -> usize {
        self.by_departure_airport_day.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_departure_airport_day.is_empty()
    }

    /// Returns the size and height of each index.
    pub fn index_stats(&self) -> IndexStats {
        IndexStats {
            by_flight_number: self.by_flight_number.len(),
            by_departure_airport_day: self.by_departure_airport_day.len(),
            by_time: self.by_time.len(),
            max_height: self
                .by_flight_number
                .height()
                .max(self.by_departure_airport_day.height())
                .max(self.by_time.height()),
        }
    }

    // ===== INSERT =====

    /// Inserts a record unless one with the same flight number, departure
    /// airport, day, hour and minute is already stored.
    ///
    /// Returns `true` if the record was indexed. On `false` no index changes.
    pub fn insert(&mut self, record: FlightRecord) -> bool {
        match self.try_insert(record) {
            Ok(()) => true,
            Err(err) => {
                debug!("Rejected flight: {}", err);
                false
            }
        }
    }

    /// Inserts a record, reporting why it was rejected.
    ///
    /// The record is indexed in all three trees or in none.
    pub fn try_insert(&mut self, record: FlightRecord) -> Result<()> {
        let record = Arc::new(record);

        // The secondary indexes do not compare airports. A flight number that
        // already departs at this time from another airport would be rejected
        // there after the primary index accepted it.
        if let Some(existing) = self.by_flight_number.search(&record) {
            if existing.departure_airport() != record.departure_airport() {
                return Err(FlightDbError::ConflictingDeparture {
                    flight_number: record.flight_number().to_string(),
                    departure: record.departure(),
                    airport: existing.departure_airport().to_string(),
                });
            }
        }

        if !self.by_departure_airport_day.insert(Arc::clone(&record)) {
            return Err(FlightDbError::DuplicateFlight(record.to_string()));
        }

        let by_flight_number = self.by_flight_number.insert(Arc::clone(&record));
        let by_time = self.by_time.insert(record);
        debug_assert!(by_flight_number && by_time, "secondary indexes out of step");
        Ok(())
    }

    /// Inserts every record, returning how many were accepted.
    pub fn insert_all<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = FlightRecord>,
    {
        let mut accepted = 0;
        for record in records {
            if self.insert(record) {
                accepted += 1;
            }
        }
        accepted
    }

    /// Returns true if a record with the same flight number, departure
    /// airport and time is stored. Destination and duration are ignored.
    pub fn contains(&self, record: &FlightRecord) -> bool {
        let key = probe(record.flight_number(), record.departure_airport(), record.departure());
        self.by_departure_airport_day.search(&key).is_some()
    }

    // ===== QUERIES =====

    /// Returns every record with the given flight number, ordered by day,
    /// hour and minute.
    pub fn find_by_flight_number(&self, flight_number: &str) -> Vec<&FlightRecord> {
        let lower = probe(flight_number, MIN_SENTINEL, WeekTime::START);
        let upper = probe(flight_number, MAX_SENTINEL, WeekTime::END);

        let found = unshare(self.by_flight_number.search_between(&lower, &upper));
        trace!("Flight {}: {} records", flight_number, found.len());
        found
    }

    /// Returns every record departing `departure_airport` on `day`, ordered by
    /// hour, minute and flight number.
    pub fn find_by_departure_airport_day(
        &self,
        departure_airport: &str,
        day: u8,
    ) -> Vec<&FlightRecord> {
        let lower = probe(MIN_SENTINEL, departure_airport, WeekTime::start_of_day(day));
        let upper = probe(MAX_SENTINEL, departure_airport, WeekTime::end_of_day(day));

        let found = unshare(self.by_departure_airport_day.search_between(&lower, &upper));
        trace!("Airport {} day {}: {} records", departure_airport, day, found.len());
        found
    }

    /// Returns every record departing between `from` and `to` inclusive,
    /// ordered by day, hour, minute and flight number.
    pub fn find_between_times(&self, from: WeekTime, to: WeekTime) -> Vec<&FlightRecord> {
        let lower = probe(MIN_SENTINEL, MIN_SENTINEL, from);
        let upper = probe(MAX_SENTINEL, MAX_SENTINEL, to);

        let found = unshare(self.by_time.search_between(&lower, &upper));
        trace!("Between {} and {}: {} records", from, to, found.len());
        found
    }

    /// Returns the earliest flight from `departure_airport` at or after `at`.
    ///
    /// Wraps to the start of the week when nothing departs later in the week.
    /// Returns `None` only if the airport has no departures at all.
    pub fn find_next_flight(&self, departure_airport: &str, at: WeekTime) -> Option<&FlightRecord> {
        let from_airport = |record: &&SharedRecord| record.departure_airport() == departure_airport;

        let this_week = probe(MIN_SENTINEL, departure_airport, at);
        self.by_departure_airport_day
            .next(&this_week)
            .filter(from_airport)
            .or_else(|| {
                let next_week = probe(MIN_SENTINEL, departure_airport, WeekTime::START);
                self.by_departure_airport_day.next(&next_week).filter(from_airport)
            })
            .map(|record| record.as_ref())
    }

    /// Returns all records ordered by day, hour, minute and flight number.
    pub fn iter(&self) -> impl Iterator<Item = &FlightRecord> + '_ {
        self.by_time.iter().map(|record| record.as_ref())
    }
}

impl Default for FlightDb {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FlightDb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlightDb")
            .field("records", &self.len())
            .field("stats", &self.index_stats())
            .finish()
    }
}
