#![warn(clippy::pedantic)]

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Context;
use chrono::{Local, NaiveDateTime, Timelike};
use clap::Parser;
use log::{error, info};

use liftlog_domain::{self as domain, AliasTables, ImportConfig};
use liftlog_storage::{self as storage, Emitter, IdOffsets};

mod logger;

/// Convert a free-text exercise log into workout, exercise and set records.
#[derive(Parser, Debug)]
#[command(name = "liftlog", version)]
struct Args {
    /// Exercise log to parse
    input: PathBuf,

    /// File to write the records to [default: stdout]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Year of all dates in the log [default: current year]
    #[arg(long)]
    year: Option<i32>,

    /// JSON file replacing the built-in alias tables
    #[arg(long)]
    aliases: Option<PathBuf>,

    /// First workout log id
    #[arg(long, default_value_t = 1000)]
    workout_id_start: u32,

    /// First logged exercise id
    #[arg(long, default_value_t = 1000)]
    exercise_id_start: u32,

    /// First logged set id
    #[arg(long, default_value_t = 1000)]
    set_id_start: u32,

    /// Increase log verbosity (-v: skipped lines, -vv: everything)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn config(&self) -> ImportConfig {
        self.year.map(ImportConfig::new).unwrap_or_default()
    }

    fn offsets(&self) -> IdOffsets {
        IdOffsets {
            workout: self.workout_id_start,
            exercise: self.exercise_id_start,
            set: self.set_id_start,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(err) = logger::init(args.verbose) {
        eprintln!("failed to initialize logger: {err}");
    }

    let now = Local::now().naive_local();
    match run(&args, now.with_nanosecond(0).unwrap_or(now)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, timestamp: NaiveDateTime) -> anyhow::Result<()> {
    let tables = match &args.aliases {
        Some(path) => storage::file::read_aliases(path)
            .with_context(|| format!("failed to read aliases from {}", path.display()))?,
        None => AliasTables::default(),
    };
    let text = storage::file::read_log(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    info!("parsing {}", args.input.display());
    let import = domain::parse_log(&text, &tables, &args.config());
    info!(
        "found {} workouts, {} exercises, {} sets, volume load {:.1}",
        import.workouts.len(),
        import.num_exercises(),
        import.num_sets(),
        import.volume_load()
    );
    for (reason, count) in import.skip_counts() {
        info!("skipped {count} ({reason})");
    }

    let records = Emitter::new(args.offsets(), timestamp)
        .emit(&import.workouts)
        .context("failed to assign record identifiers")?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            storage::file::write_records(&mut writer, &records)?;
            writer.flush()?;
            info!("records written to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            storage::file::write_records(&mut stdout, &records)?;
            writeln!(stdout)?;
        }
    }

    Ok(())
}
