//! Flight records stored by the flight database.
//!
//! A `FlightRecord` is a weekly scheduled departure. Records built with
//! [`FlightRecord::new`] are validated; records built with
//! [`FlightRecord::probe`] are query bounds and are never stored.

use std::fmt;

/// Number of days in the weekly schedule. Days are numbered from 0 (Monday).
pub const DAYS_PER_WEEK: u8 = 7;

/// Text that sorts before every valid flight number or airport code.
pub const MIN_SENTINEL: &str = "";

/// Text that sorts after every valid flight number or airport code.
///
/// Valid text fields are ASCII alphanumeric, and `'~'` (0x7E) is greater than
/// every ASCII letter and digit.
pub const MAX_SENTINEL: &str = "~";

const DAY_NAMES: [&str; DAYS_PER_WEEK as usize] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const FULL_DAY_NAMES: [&str; DAYS_PER_WEEK as usize] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// A specialized error type for record construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Day of week outside 0..=6.
    InvalidDay(u8),
    /// Hour outside 0..=23.
    InvalidHour(u8),
    /// Minute outside 0..=59.
    InvalidMinute(u8),
    /// A text field that is empty or not ASCII alphanumeric.
    InvalidField { field: &'static str, value: String },
    /// A day name or number that could not be parsed.
    UnknownDay(String),
    /// A time of day that is not in `HH:MM` form.
    MalformedTime(String),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::InvalidDay(day) => write!(f, "Invalid day of week: {} (expected 0-6)", day),
            RecordError::InvalidHour(hour) => write!(f, "Invalid hour: {} (expected 0-23)", hour),
            RecordError::InvalidMinute(minute) => {
                write!(f, "Invalid minute: {} (expected 0-59)", minute)
            }
            RecordError::InvalidField { field, value } => {
                write!(f, "Invalid {}: '{}' (expected non-empty ASCII alphanumeric)", field, value)
            }
            RecordError::UnknownDay(day) => write!(f, "Unknown day: '{}'", day),
            RecordError::MalformedTime(time) => write!(f, "Malformed time: '{}' (expected HH:MM)", time),
        }
    }
}

impl std::error::Error for RecordError {}

pub type Result<T> = std::result::Result<T, RecordError>;

/// A point in the weekly schedule.
///
/// Ordering is chronological: by day, then hour, then minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekTime {
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

impl WeekTime {
    /// The first minute of the week (Monday 00:00).
    pub const START: WeekTime = WeekTime { day: 0, hour: 0, minute: 0 };

    /// The last minute of the week (Sunday 23:59).
    pub const END: WeekTime = WeekTime { day: DAYS_PER_WEEK - 1, hour: 23, minute: 59 };

    /// Creates a validated week time.
    pub fn new(day: u8, hour: u8, minute: u8) -> Result<Self> {
        if day >= DAYS_PER_WEEK {
            return Err(RecordError::InvalidDay(day));
        }
        if hour > 23 {
            return Err(RecordError::InvalidHour(hour));
        }
        if minute > 59 {
            return Err(RecordError::InvalidMinute(minute));
        }
        Ok(Self { day, hour, minute })
    }

    /// Returns the first minute of the given day.
    pub fn start_of_day(day: u8) -> Self {
        Self { day, hour: 0, minute: 0 }
    }

    /// Returns the last minute of the given day.
    pub fn end_of_day(day: u8) -> Self {
        Self { day, hour: 23, minute: 59 }
    }

    /// Parses a day given either as a number (`0`-`6`) or a name.
    ///
    /// A name is any prefix of at least three letters of the full day name,
    /// ignoring case: `Mon`, `mond`, `Monday`.
    pub fn parse_day(text: &str) -> Result<u8> {
        let trimmed = text.trim();
        if let Ok(day) = trimmed.parse::<u8>() {
            return if day < DAYS_PER_WEEK {
                Ok(day)
            } else {
                Err(RecordError::InvalidDay(day))
            };
        }
        let lower = trimmed.to_ascii_lowercase();
        FULL_DAY_NAMES
            .iter()
            .position(|name| lower.len() >= 3 && name.starts_with(lower.as_str()))
            .map(|day| day as u8)
            .ok_or_else(|| RecordError::UnknownDay(text.to_string()))
    }

    /// Parses `day` together with an `HH:MM` time of day.
    pub fn parse(day: &str, time_of_day: &str) -> Result<Self> {
        let day = Self::parse_day(day)?;
        let malformed = || RecordError::MalformedTime(time_of_day.to_string());
        let (hour, minute) = time_of_day.trim().split_once(':').ok_or_else(malformed)?;
        let hour = hour.parse::<u8>().map_err(|_| malformed())?;
        let minute = minute.parse::<u8>().map_err(|_| malformed())?;
        Self::new(day, hour, minute)
    }

    /// Three-letter name of the day.
    pub fn day_name(&self) -> &'static str {
        DAY_NAMES.get(self.day as usize).copied().unwrap_or("???")
    }
}

impl fmt::Display for WeekTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:02}:{:02}", self.day_name(), self.hour, self.minute)
    }
}

/// A weekly scheduled flight departure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlightRecord {
    flight_number: String,
    departure_airport: String,
    destination_airport: String,
    departure: WeekTime,
    duration_minutes: u32,
}

impl FlightRecord {
    /// Creates a validated flight record.
    ///
    /// Text fields must be non-empty ASCII alphanumeric, and the departure
    /// time must fall within the week.
    pub fn new(
        flight_number: &str,
        departure_airport: &str,
        destination_airport: &str,
        day: u8,
        hour: u8,
        minute: u8,
        duration_minutes: u32,
    ) -> Result<Self> {
        validate_text("flight number", flight_number)?;
        validate_text("departure airport", departure_airport)?;
        validate_text("destination airport", destination_airport)?;
        let departure = WeekTime::new(day, hour, minute)?;

        Ok(Self {
            flight_number: flight_number.to_string(),
            departure_airport: departure_airport.to_string(),
            destination_airport: destination_airport.to_string(),
            departure,
            duration_minutes,
        })
    }

    /// Builds an unvalidated record used only to bound a range or successor query.
    ///
    /// Text fields may be [`MIN_SENTINEL`] or [`MAX_SENTINEL`].
    pub fn probe(flight_number: &str, departure_airport: &str, departure: WeekTime) -> Self {
        Self {
            flight_number: flight_number.to_string(),
            departure_airport: departure_airport.to_string(),
            destination_airport: String::new(),
            departure,
            duration_minutes: 0,
        }
    }

    pub fn flight_number(&self) -> &str {
        &self.flight_number
    }

    pub fn departure_airport(&self) -> &str {
        &self.departure_airport
    }

    pub fn destination_airport(&self) -> &str {
        &self.destination_airport
    }

    pub fn departure(&self) -> WeekTime {
        self.departure
    }

    pub fn day(&self) -> u8 {
        self.departure.day
    }

    pub fn hour(&self) -> u8 {
        self.departure.hour
    }

    pub fn minute(&self) -> u8 {
        self.departure.minute
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }
}

impl fmt::Display for FlightRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<8} {:<4} -> {:<4} {} ({} min)",
            self.flight_number,
            self.departure_airport,
            self.destination_airport,
            self.departure,
            self.duration_minutes
        )
    }
}

fn validate_text(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(RecordError::InvalidField {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
