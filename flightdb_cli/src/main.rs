use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use flight_db::{FlightDb, FlightRecord, WeekTime};
use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

mod loader;
mod logger;

use loader::{LoadError, Result};

#[derive(Parser, Debug)]
#[command(version, about = "Query a weekly flight schedule", long_about = None)]
struct Args {
    /// CSV schedule to load
    #[arg(short, long)]
    schedule: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all departures of a flight number
    ByFlight { flight_number: String },
    /// List departures from an airport on one day (0-6 or Mon..Sun)
    ByAirport { airport: String, day: String },
    /// List departures between two weekly times, inclusive
    Between {
        day1: String,
        time1: String,
        day2: String,
        time2: String,
    },
    /// Show the next departure from an airport at or after a weekly time
    Next {
        airport: String,
        day: String,
        time: String,
    },
    /// List every flight in weekly order
    List,
    /// Time inserts and queries over a generated schedule
    Bench {
        /// Number of flights to generate
        #[arg(short, long, default_value_t = 100_000)]
        records: usize,
        /// Seed for the generated schedule
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() -> ExitCode {
    logger::initialize_logger();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    if let Command::Bench { records, seed } = args.command {
        run_benchmark(records, seed);
        return Ok(());
    }

    let path = args.schedule.ok_or(LoadError::MissingSchedule)?;
    let records = loader::load_schedule(&path)?;
    let total = records.len();

    let mut db = FlightDb::new();
    let accepted = db.insert_all(records);
    info!("Loaded {} flights from {}", accepted, path.display());
    if accepted < total {
        warn!("Skipped {} duplicate or conflicting flights", total - accepted);
    }

    match args.command {
        Command::ByFlight { flight_number } => {
            print_records(&db.find_by_flight_number(&flight_number));
        }
        Command::ByAirport { airport, day } => {
            let day = WeekTime::parse_day(&day)?;
            print_records(&db.find_by_departure_airport_day(&airport, day));
        }
        Command::Between {
            day1,
            time1,
            day2,
            time2,
        } => {
            let from = WeekTime::parse(&day1, &time1)?;
            let to = WeekTime::parse(&day2, &time2)?;
            print_records(&db.find_between_times(from, to));
        }
        Command::Next { airport, day, time } => {
            let at = WeekTime::parse(&day, &time)?;
            match db.find_next_flight(&airport, at) {
                Some(record) => println!("{}", record),
                None => println!("No flights from {}", airport),
            }
        }
        Command::List => {
            let all: Vec<&FlightRecord> = db.iter().collect();
            print_records(&all);
        }
        Command::Bench { .. } => {}
    }
    Ok(())
}

fn print_records(records: &[&FlightRecord]) {
    if records.is_empty() {
        println!("No matching flights");
        return;
    }
    for record in records {
        println!("{}", record);
    }
}

const AIRPORTS: [&str; 8] = ["SYD", "MEL", "BNE", "PER", "ADL", "AKL", "SIN", "LHR"];

fn generate_schedule(count: usize, seed: u64) -> Vec<FlightRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut schedule = Vec::with_capacity(count);

    while schedule.len() < count {
        let from = AIRPORTS[rng.gen_range(0..AIRPORTS.len())];
        let to = AIRPORTS[rng.gen_range(0..AIRPORTS.len())];
        let number = format!("QF{}", rng.gen_range(1..10_000));
        let generated = FlightRecord::new(
            &number,
            from,
            to,
            rng.gen_range(0..7),
            rng.gen_range(0..24),
            rng.gen_range(0..60),
            rng.gen_range(45..1500),
        );
        match generated {
            Ok(record) => schedule.push(record),
            Err(err) => warn!("Skipping generated flight: {}", err),
        }
    }
    schedule
}

/// Flight number, departure airport and departure time of a stored flight.
type Probe = (String, String, WeekTime);

/// Runs `query` once per probe; returns the elapsed time and the summed result.
fn time_queries<F>(probes: &[Probe], query: F) -> (Duration, usize)
where
    F: Fn(&Probe) -> usize,
{
    let start = Instant::now();
    let total = probes.iter().map(query).sum();
    (start.elapsed(), total)
}

struct BenchmarkResult {
    insert: Duration,
    by_flight_number: Duration,
    by_airport_day: Duration,
    between_times: Duration,
    next_flight: Duration,
}

fn run_benchmark(count: usize, seed: u64) {
    println!("Generating {} flights (seed {}).", count, seed);
    let schedule = generate_schedule(count, seed);
    let probes: Vec<Probe> = schedule
        .iter()
        .step_by((count / 1000).max(1))
        .map(|r| {
            (
                r.flight_number().to_string(),
                r.departure_airport().to_string(),
                r.departure(),
            )
        })
        .collect();

    let mut db = FlightDb::new();
    let start = Instant::now();
    let accepted = db.insert_all(schedule);
    let insert = start.elapsed();

    let (by_flight_number, _) =
        time_queries(&probes, |(number, _, _)| db.find_by_flight_number(number).len());
    let (by_airport_day, _) = time_queries(&probes, |(_, airport, at)| {
        db.find_by_departure_airport_day(airport, at.day).len()
    });
    let (between_times, _) = time_queries(&probes, |(_, _, at)| {
        db.find_between_times(*at, WeekTime::end_of_day(at.day)).len()
    });
    let (next_flight, found) = time_queries(&probes, |(_, airport, at)| {
        usize::from(db.find_next_flight(airport, *at).is_some())
    });

    let result = BenchmarkResult {
        insert,
        by_flight_number,
        by_airport_day,
        between_times,
        next_flight,
    };
    let stats = db.index_stats();

    println!("Accepted {} flights, max index height {}.", accepted, stats.max_height);
    println!("Next-flight queries answered: {}/{}.", found, probes.len());
    println!("\n--- Benchmark Results ({} queries each) ---", probes.len());
    println!("| Operation                    | Time            |");
    println!("|------------------------------|-----------------|");
    println!("| insert (all)                 | {:<15?} |", result.insert);
    println!("| find_by_flight_number        | {:<15?} |", result.by_flight_number);
    println!("| find_by_departure_airport_day| {:<15?} |", result.by_airport_day);
    println!("| find_between_times           | {:<15?} |", result.between_times);
    println!("| find_next_flight             | {:<15?} |", result.next_flight);
}
