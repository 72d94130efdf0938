//! Shared record types for the flight database.

pub mod record;

pub use record::{FlightRecord, RecordError, WeekTime, DAYS_PER_WEEK, MAX_SENTINEL, MIN_SENTINEL};
