//! Loads a weekly flight schedule from CSV.
//!
//! Expected header:
//! `flight_number,departure_airport,destination_airport,day,hour,minute,duration`
//! where `day` is `0`-`6` or a day name (`Mon` ... `Sun`).

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use common::{FlightRecord, RecordError, WeekTime};
use serde::Deserialize;

/// A specialized error type for loading schedules and parsing arguments.
#[derive(Debug)]
pub enum LoadError {
    /// The schedule file could not be opened.
    Io(std::io::Error),
    /// The schedule is not well-formed CSV or a column has the wrong type.
    Csv(csv::Error),
    /// A row parsed but does not describe a valid flight.
    InvalidRow { line: u64, source: RecordError },
    /// A day or time given on the command line is invalid.
    InvalidArgument(RecordError),
    /// The command needs a schedule but none was given.
    MissingSchedule,
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::Csv(err)
    }
}

impl From<RecordError> for LoadError {
    fn from(err: RecordError) -> Self {
        LoadError::InvalidArgument(err)
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "I/O error: {}", err),
            LoadError::Csv(err) => write!(f, "CSV error: {}", err),
            LoadError::InvalidRow { line, source } => write!(f, "Line {}: {}", line, source),
            LoadError::InvalidArgument(err) => write!(f, "Invalid argument: {}", err),
            LoadError::MissingSchedule => write!(f, "No schedule given (use --schedule <CSV>)"),
        }
    }
}

impl std::error::Error for LoadError {}

pub type Result<T> = std::result::Result<T, LoadError>;

#[derive(Debug, Deserialize)]
struct ScheduleRow {
    flight_number: String,
    departure_airport: String,
    destination_airport: String,
    day: String,
    hour: u8,
    minute: u8,
    duration: u32,
}

impl ScheduleRow {
    fn into_record(self) -> std::result::Result<FlightRecord, RecordError> {
        let day = WeekTime::parse_day(&self.day)?;
        FlightRecord::new(
            &self.flight_number,
            &self.departure_airport,
            &self.destination_airport,
            day,
            self.hour,
            self.minute,
            self.duration,
        )
    }
}

/// Reads every flight from a CSV schedule file.
pub fn load_schedule(path: &Path) -> Result<Vec<FlightRecord>> {
    let file = File::open(path)?;
    read_schedule(file)
}

/// Reads every flight from CSV data. Stops at the first invalid row.
pub fn read_schedule<R: Read>(reader: R) -> Result<Vec<FlightRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map_or(0, |position| position.line());
        let parsed: ScheduleRow = row.deserialize(Some(&headers))?;
        let record = parsed
            .into_record()
            .map_err(|source| LoadError::InvalidRow { line, source })?;
        records.push(record);
    }
    Ok(records)
}
