//! In-memory flight schedule database with multi-key ordered lookup.
//!
//! Records are indexed by three AVL trees, one per query shape:
//! - flight number, then weekly time
//! - departure airport, then weekly time
//! - weekly time alone
//!
//! # Example
//!
//! ```
//! use flight_db::{FlightDb, FlightRecord, WeekTime};
//!
//! let mut db = FlightDb::new();
//! db.insert(FlightRecord::new("QF1", "SYD", "LHR", 1, 6, 0, 1400).unwrap());
//!
//! let next = db.find_next_flight("SYD", WeekTime::new(3, 23, 0).unwrap());
//! assert_eq!(next.map(|r| r.flight_number()), Some("QF1"));
//! ```

pub mod comparator;
mod database;

pub use database::{FlightDb, IndexStats};

// Re-export the record types callers build queries from
pub use common::{FlightRecord, RecordError, WeekTime};

/// A specialized error type for flight database operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlightDbError {
    /// A record with the same flight number, departure airport and time is stored.
    DuplicateFlight(String),
    /// The flight number already departs at the same time from another airport.
    ConflictingDeparture {
        flight_number: String,
        departure: WeekTime,
        airport: String,
    },
}

impl std::fmt::Display for FlightDbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlightDbError::DuplicateFlight(flight) => write!(f, "Duplicate flight: {}", flight),
            FlightDbError::ConflictingDeparture {
                flight_number,
                departure,
                airport,
            } => write!(
                f,
                "Flight {} already departs from {} at {}",
                flight_number, airport, departure
            ),
        }
    }
}

impl std::error::Error for FlightDbError {}

pub type Result<T> = std::result::Result<T, FlightDbError>;
