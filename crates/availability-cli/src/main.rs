//! `availability` CLI — sync the calendar snapshot and inspect processed days.
//!
//! ## Usage
//!
//! ```sh
//! # Pull every row from Airtable into static/availability.json
//! AIRTABLE_TOKEN=... AIRTABLE_BASE_ID=app... availability sync
//!
//! # Write somewhere else, from another table
//! availability sync --table tblXXXX -o public/availability.json
//!
//! # Show the processed blocks of one date
//! availability day -s static/availability.json --date 2026-03-16
//!
//! # Show a week (0 = this week, up to 4 weeks ahead) as JSON
//! availability week -s static/availability.json --week 1 --json
//! ```

mod airtable;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use availability_engine::{
    load_snapshot, schedule_for_date, BlockDisplay, CalendarView, DaySchedule, EventRecord,
};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::airtable::{AirtableClient, DEFAULT_BASE_URL, DEFAULT_TABLE_ID};

#[derive(Parser)]
#[command(
    name = "availability",
    version,
    about = "Availability calendar snapshot sync and inspection"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level (otherwise RUST_LOG, or info)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch all records from Airtable and write the JSON snapshot
    Sync {
        /// Airtable personal access token
        #[arg(long, env = "AIRTABLE_TOKEN", hide_env_values = true)]
        token: Option<String>,
        /// Airtable base id
        #[arg(long, env = "AIRTABLE_BASE_ID")]
        base_id: Option<String>,
        /// Table id (or name) to read
        #[arg(long, default_value = DEFAULT_TABLE_ID)]
        table: String,
        /// Snapshot file to write
        #[arg(short, long, default_value = "static/availability.json")]
        output: PathBuf,
        /// API host
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,
    },
    /// Print the processed schedule of one date
    Day {
        /// Snapshot file to read
        #[arg(short, long)]
        snapshot: PathBuf,
        /// Date to show (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print one week of the calendar
    Week {
        /// Snapshot file to read
        #[arg(short, long)]
        snapshot: PathBuf,
        /// Anchor date for week 0 (defaults to the local date)
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Week index, 0 for the current week
        #[arg(short, long, default_value_t = 0)]
        week: usize,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Sync {
            token,
            base_id,
            table,
            output,
            base_url,
        } => {
            let token = token
                .filter(|t| !t.is_empty())
                .context("Missing Airtable token: set AIRTABLE_TOKEN or pass --token")?;
            let base_id = base_id
                .filter(|b| !b.is_empty())
                .context("Missing Airtable base id: set AIRTABLE_BASE_ID or pass --base-id")?;

            info!(%base_id, %table, "fetching availability records");
            let client = AirtableClient::with_base_url(token, base_id, base_url);
            let records = client
                .fetch_all(&table)
                .await
                .context("Failed to fetch records from Airtable")?;

            airtable::check_records(&records);
            airtable::write_snapshot(&output, &records)
                .with_context(|| format!("Failed to write snapshot: {}", output.display()))?;

            info!(
                count = records.len(),
                path = %output.display(),
                "exported availability records"
            );
        }
        Commands::Day {
            snapshot,
            date,
            json,
        } => {
            let events = read_snapshot(&snapshot)?;
            let day = schedule_for_date(&events, date);

            if json {
                println!("{}", serde_json::to_string_pretty(&day)?);
            } else {
                print!("{}", format_day(&day));
            }
        }
        Commands::Week {
            snapshot,
            today,
            week,
            json,
        } => {
            let events = read_snapshot(&snapshot)?;
            let mut view = CalendarView::new(today.unwrap_or_else(|| Local::now().date_naive()));
            if !view.go_to(week) {
                anyhow::bail!(
                    "Week {} is out of range: choose 0 to {}",
                    week,
                    view.weeks_to_show() - 1
                );
            }

            let rendered = view.render_week(&events);
            if json {
                println!("{}", serde_json::to_string_pretty(&rendered)?);
            } else {
                println!("{}", rendered.heading);
                for day in &rendered.days {
                    print!("{}", format_day(day));
                }
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays clean for `--json`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_snapshot(path: &Path) -> Result<Vec<EventRecord>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    load_snapshot(&json).with_context(|| format!("Failed to parse snapshot: {}", path.display()))
}

/// One header line per day, then one indented line per block (or `Free`).
fn format_day(day: &DaySchedule) -> String {
    let mut out = format!("{}\n", day.date.format("%a %b %-d"));

    if day.is_free() {
        out.push_str("  Free\n");
        return out;
    }

    for block in &day.blocks {
        let display = BlockDisplay::for_block(block);
        out.push_str(&format!("  {}  {}\n", display.time_label, display.label));
    }
    out
}
