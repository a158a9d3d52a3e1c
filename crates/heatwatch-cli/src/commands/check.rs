use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Args;
use heatwatch_core::{Config, Diagnostics, HeatNeededIndicator, MemoryCalendar, WrappedWriter};

use super::{EXIT_NO_HEAT, EXIT_OK};

#[derive(Args)]
pub struct CheckArgs {
    /// JSON file with an array of events
    #[arg(long)]
    events: PathBuf,
    /// Evaluation instant (RFC 3339), defaults to the current time
    #[arg(long, value_parser = parse_instant)]
    now: Option<DateTime<Utc>>,
    /// Preheat minutes (overrides config)
    #[arg(long)]
    preheat: Option<u32>,
    /// Cooloff minutes (overrides config)
    #[arg(long)]
    cooloff: Option<u32>,
    /// No-heat tag (overrides config; empty disables)
    #[arg(long)]
    no_heat_tag: Option<String>,
    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print qualifying events as JSON
    #[arg(long)]
    json: bool,
    /// Suppress diagnostics
    #[arg(short, long)]
    quiet: bool,
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 timestamp '{raw}': {e}"))
}

fn resolve_config(args: &CheckArgs) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.apply_env()?;

    if let Some(minutes) = args.preheat {
        config.heating.preheat_minutes = minutes;
    }
    if let Some(minutes) = args.cooloff {
        config.heating.cooloff_minutes = minutes;
    }
    if let Some(tag) = &args.no_heat_tag {
        config.heating.no_heat_tag = (!tag.is_empty()).then(|| tag.clone());
    }
    Ok(config)
}

pub fn run(args: CheckArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = resolve_config(&args)?;
    let calendar = MemoryCalendar::from_json_file(&args.events)?;
    let now = args.now.unwrap_or_else(Utc::now);
    let indicator = HeatNeededIndicator::new(config.heating.clone());
    tracing::debug!(%indicator, events = calendar.len(), %now, "evaluating");

    let show_diagnostics = !args.quiet && config.diagnostics.enabled;
    let wrapper = config.diagnostics.wrapper();

    // Stdout carries the JSON document in --json mode.
    let events = if !show_diagnostics {
        indicator.evaluate_all(&calendar, now, None)?
    } else if args.json {
        let sink = WrappedWriter::stderr(wrapper);
        sink.emit(&format!("Checking at {now} with {indicator}"));
        indicator.evaluate_all(&calendar, now, Some(&sink))?
    } else {
        let sink = WrappedWriter::stdout(wrapper);
        sink.emit(&format!("Checking at {now} with {indicator}"));
        indicator.evaluate_all(&calendar, now, Some(&sink))?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&events)?);
    }

    Ok(if events.is_empty() { EXIT_NO_HEAT } else { EXIT_OK })
}
