use chrono::{Local, Utc};
use clap::Args;
use orbit_core::{find_next_slot, find_next_slot_at, ScheduleItem, SleepWindow};
use std::path::{Path, PathBuf};

use super::{load_config, parse_now, Snapshot};

#[derive(Args)]
pub struct SlotArgs {
    /// Slot length in minutes
    #[arg(long, short, value_parser = clap::value_parser!(u32).range(1..))]
    duration: u32,
    /// Snapshot JSON whose items count as busy
    #[arg(long)]
    snapshot: Option<PathBuf>,
    /// Override the configured sleep start (HH:MM)
    #[arg(long, requires = "sleep_end")]
    sleep_start: Option<String>,
    /// Override the configured sleep end (HH:MM)
    #[arg(long, requires = "sleep_start")]
    sleep_end: Option<String>,
    /// Search from this RFC 3339 instant instead of the current time
    #[arg(long)]
    now: Option<String>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: SlotArgs, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let sleep = match (&args.sleep_start, &args.sleep_end) {
        (Some(start), Some(end)) => SleepWindow::parse(start, end)?,
        _ => config.sleep,
    };
    let now = parse_now(args.now.as_deref())?;
    // adapter fallbacks (undated tasks, bad timestamps) use the search clock
    let clock = now.map(|n| n.with_timezone(&Utc)).unwrap_or_else(Utc::now);

    let busy: Vec<ScheduleItem> = match &args.snapshot {
        Some(path) => {
            let mapped = Snapshot::read(path)?
                .map(&config.agenda.owner_id, clock)
                .without_skipped();
            orbit_core::merge_sources(&mapped.local, &mapped.calendar, &mapped.tasks)
        }
        None => Vec::new(),
    };

    let slot = match now {
        Some(now) => find_next_slot_at(now, args.duration, &busy, &sleep),
        None => find_next_slot(args.duration, &busy, &sleep),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&slot)?);
    } else {
        println!(
            "Next slot: {} - {}",
            slot.start.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            slot.end.with_timezone(&Local).format("%H:%M")
        );
    }
    Ok(())
}
