use chrono::{Local, Utc};
use clap::Args;
use orbit_core::{build_agenda_from_sources, ItemKind};
use std::path::{Path, PathBuf};

use super::{load_config, Snapshot};

#[derive(Args)]
pub struct AgendaArgs {
    /// Snapshot JSON with `local`, `calendar` and `tasks` arrays
    snapshot: PathBuf,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: AgendaArgs, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let snapshot = Snapshot::read(&args.snapshot)?;
    let mapped = snapshot
        .map(&config.agenda.owner_id, Utc::now())
        .without_skipped();

    let agenda = build_agenda_from_sources(&mapped.local, &mapped.calendar, &mapped.tasks);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&agenda)?);
        return Ok(());
    }

    if agenda.is_empty() {
        println!("Nothing scheduled.");
        return Ok(());
    }

    for item in &agenda {
        let start = item.start_time.with_timezone(&Local).format("%a %H:%M");
        let end = item.end_time.with_timezone(&Local).format("%H:%M");
        let marker = match item.kind {
            ItemKind::Break => "~",
            ItemKind::Task => "*",
            ItemKind::Event => "-",
        };
        println!(
            "{marker} {start}-{end}  {} [{}]",
            item.title,
            item.status.as_str()
        );
    }
    Ok(())
}
