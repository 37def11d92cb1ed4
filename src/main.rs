// Hijri Anniversaries - CLI
// CSV table + correlation point → .ics (or JSON) calendar

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hijri_anniversaries::config::MAX_SPAN_YEARS;
use hijri_anniversaries::{
    load_anniversaries, project, render_calendar, CorrelationPoint, EventDescriptor, EventTime,
    LunarDate, ProjectionConfig, SolarDate,
};

/// Project lunar (schematic Hijri) anniversaries onto Gregorian dates.
#[derive(Parser)]
#[command(name = "hijri-anniversaries", version, about)]
struct Cli {
    /// CSV table of anniversaries (name, day, month[, year][, uid]).
    #[arg(short, long)]
    file: PathBuf,

    /// Gregorian reference date, YYYY-MM-DD.
    #[arg(long = "greg-ref")]
    greg_ref: String,

    /// Lunar date on the same day as --greg-ref, YYYY-MM-DD.
    #[arg(long = "hijri-ref")]
    hijri_ref: String,

    /// Years to project after the reference date (inclusive, at most 1000).
    #[arg(
        short,
        long,
        default_value_t = 1,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i32).range(-MAX_SPAN_YEARS..=MAX_SPAN_YEARS)
    )]
    years: i32,

    /// Event start time on the evening before, HH:MM.
    #[arg(long = "start-time", default_value = "18:00")]
    start_time: EventTime,

    /// Event end time on the anniversary day, HH:MM.
    #[arg(long = "end-time", default_value = "18:00")]
    end_time: EventTime,

    /// Reminder minutes before the event starts.
    #[arg(long, default_value_t = 10)]
    alarm: u32,

    /// Output file. Stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Ics)]
    format: Format,

    /// DTSTAMP for every event (RFC 3339). Defaults to now.
    #[arg(long)]
    stamp: Option<DateTime<Utc>>,

    /// Fail if any table row is rejected.
    #[arg(long)]
    strict: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Ics,
    Json,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    correlation: &'a CorrelationPoint,
    config: &'a ProjectionConfig,
    events: &'a [EventDescriptor],
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

/// `RUST_LOG` overrides the -v flags. Logs go to stderr.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let default_filter = format!("hijri_anniversaries={level}");
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let solar = NaiveDate::parse_from_str(&cli.greg_ref, "%Y-%m-%d")
        .with_context(|| format!("Invalid --greg-ref {:?} (expected YYYY-MM-DD)", cli.greg_ref))?;
    let lunar = LunarDate::parse(&cli.hijri_ref).context("Invalid --hijri-ref")?;
    let correlation = CorrelationPoint::new(SolarDate::from(solar), lunar);

    let config = ProjectionConfig::new()
        .with_span_years(cli.years)
        .with_times(cli.start_time, cli.end_time)
        .with_alarm_minutes(cli.alarm);

    // 1. Load table
    let report = load_anniversaries(&cli.file)?;
    if !report.is_clean() {
        for rejected in &report.rejected {
            eprintln!("skipped {}", rejected);
        }
        if cli.strict {
            bail!(
                "{} of {} rows in {} were rejected",
                report.rejected.len(),
                report.total_rows(),
                cli.file.display()
            );
        }
    }

    // 2. Project
    let events = project(&correlation, &report.anniversaries, &config);
    info!(
        reference = %correlation.solar,
        lunar = %correlation.lunar,
        events = events.len(),
        "projection complete"
    );

    // 3. Serialize
    let rendered = match cli.format {
        Format::Ics => render_calendar(&events, cli.stamp.unwrap_or_else(Utc::now)),
        Format::Json => {
            let output = JsonOutput {
                correlation: &correlation,
                config: &config,
                events: &events,
            };
            let mut json = serde_json::to_string_pretty(&output)?;
            json.push('\n');
            json
        }
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "calendar written");
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
