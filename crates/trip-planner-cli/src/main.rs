//! `tripplan` CLI — rank a trip's candidate dates from submitted availability.
//!
//! ## Usage
//!
//! ```sh
//! # Every day of the trip, best first
//! tripplan suggest -i trip.json
//!
//! # Only the recommendation tiers, as JSON
//! tripplan summary -i trip.json --format json
//!
//! # Loosen the good-option threshold
//! cat trip.json | tripplan summary --good-threshold 60
//!
//! # Report dates that will be ignored
//! tripplan validate -i trip.json
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` (e.g. `RUST_LOG=trip_planner=trace`) or
//! pass `--verbose` to see which dates were skipped.

mod input;

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::debug;
use trip_planner::date_range::format_iso_date;
use trip_planner::{parse_iso_date, DateSuggestion, RankedSuggestions, SuggestionPolicy};

use crate::input::PlanDocument;

#[derive(Parser)]
#[command(
    name = "tripplan",
    version,
    about = "Rank group trip dates by participant availability"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug output to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List every day of the trip, ranked by availability
    Suggest {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Show perfect matches and good options
    Summary {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Minimum percentage of responders for a good option
        #[arg(long, default_value_t = SuggestionPolicy::DEFAULT_GOOD_THRESHOLD)]
        good_threshold: f64,
    },
    /// Report submitted dates that are malformed or outside the trip range
    Validate {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryOutput<'a> {
    total_responses: usize,
    perfect_matches: Vec<&'a DateSuggestion>,
    good_options: Vec<&'a DateSuggestion>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Suggest {
            input,
            output,
            format,
        } => {
            let doc = PlanDocument::parse(&read_input(input.as_deref())?)?;
            let records = doc.records();
            let ranked = RankedSuggestions::compute(&doc.trip.date_range, &records);
            debug!(
                days = ranked.suggestions.len(),
                responses = ranked.total_responses,
                "aggregated availability"
            );

            let rendered = match format {
                Format::Json => serde_json::to_string_pretty(&ranked.suggestions)?,
                Format::Text => render_suggestions(&doc, &ranked),
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Summary {
            input,
            output,
            format,
            good_threshold,
        } => {
            let policy = SuggestionPolicy::new(good_threshold)?;
            let doc = PlanDocument::parse(&read_input(input.as_deref())?)?;
            let records = doc.records();
            let ranked = RankedSuggestions::compute(&doc.trip.date_range, &records);

            let rendered = match format {
                Format::Json => serde_json::to_string_pretty(&SummaryOutput {
                    total_responses: ranked.total_responses,
                    perfect_matches: ranked.perfect_matches(),
                    good_options: ranked.good_options(&policy),
                })?,
                Format::Text => render_summary(&ranked, &policy),
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Validate { input } => {
            let doc = PlanDocument::parse(&read_input(input.as_deref())?)?;
            let problems = find_problems(&doc);
            if problems.is_empty() {
                println!(
                    "OK: {} response(s), trip range {}",
                    doc.availabilities.len(),
                    doc.trip.date_range
                );
            } else {
                for problem in &problems {
                    println!("{}", problem);
                }
                println!("{} date(s) will be ignored", problems.len());
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let default = if verbose { "debug" } else { "warn" };
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(io::stderr);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default.into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

fn render_suggestions(doc: &PlanDocument, ranked: &RankedSuggestions) -> String {
    let mut out = format!(
        "{} ({}), {} response(s)\n",
        doc.trip_label(),
        doc.trip.date_range,
        ranked.total_responses
    );
    for s in &ranked.suggestions {
        out.push_str(&format!(
            "{}  {}/{}  {:>5.1}%",
            format_iso_date(s.date),
            s.available_count,
            ranked.total_responses,
            s.percentage
        ));
        if !s.available_people.is_empty() {
            out.push_str("  ");
            out.push_str(&s.available_people.join(", "));
        }
        out.push('\n');
    }
    out
}

fn render_summary(ranked: &RankedSuggestions, policy: &SuggestionPolicy) -> String {
    let perfect = ranked.perfect_matches();
    let good = ranked.good_options(policy);
    if perfect.is_empty() && good.is_empty() {
        return "No dates meet the recommendation thresholds yet.\n".to_string();
    }

    let mut out = String::new();
    if !perfect.is_empty() {
        out.push_str("Perfect matches (everyone available):\n");
        for s in perfect {
            out.push_str(&format!(
                "  {}  all {} available\n",
                format_iso_date(s.date),
                s.available_count
            ));
        }
    }
    if !good.is_empty() {
        out.push_str(&format!(
            "Good options ({}%+ available):\n",
            policy.good_threshold
        ));
        for s in good {
            out.push_str(&format!(
                "  {}  {} of {} available: {}\n",
                format_iso_date(s.date),
                s.available_count,
                ranked.total_responses,
                s.available_people.join(", ")
            ));
        }
    }
    out
}

/// One line per submitted date the aggregator will not count.
fn find_problems(doc: &PlanDocument) -> Vec<String> {
    let range = doc.trip.date_range;
    let mut problems = Vec::new();
    for (i, record) in doc.availabilities.iter().enumerate() {
        for raw in &record.dates {
            match parse_iso_date(raw) {
                None => problems.push(format!(
                    "response {} ({}): '{}' is not a YYYY-MM-DD date",
                    i + 1,
                    record.user_name,
                    raw
                )),
                Some(day) if !range.contains(day) => problems.push(format!(
                    "response {} ({}): {} is outside {}",
                    i + 1,
                    record.user_name,
                    raw,
                    range
                )),
                Some(_) => {}
            }
        }
    }
    problems
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
