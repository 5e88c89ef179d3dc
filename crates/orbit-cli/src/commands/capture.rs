use chrono::{Local, Utc};
use clap::Args;
use orbit_core::{build_ics, detect_dates_in_text, CapturedDate};
use std::path::PathBuf;

#[derive(Args)]
pub struct CaptureArgs {
    /// Text file to scan (e.g. saved page text)
    input: PathBuf,
    /// Title used when no context is available
    #[arg(long)]
    page_title: Option<String>,
    /// Ignore dates before this day (YYYY-MM-DD, default today)
    #[arg(long)]
    today: Option<chrono::NaiveDate>,
    /// Write an .ics file with every capture
    #[arg(long)]
    ics: Option<PathBuf>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: CaptureArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(&args.input)
        .map_err(|e| format!("cannot read {}: {e}", args.input.display()))?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    let captured: Vec<CapturedDate> =
        detect_dates_in_text(&text, args.page_title.as_deref(), today);

    if let Some(path) = &args.ics {
        std::fs::write(path, build_ics(&captured, Utc::now()))?;
        eprintln!("wrote {} event(s) to {}", captured.len(), path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&captured)?);
    } else if captured.is_empty() {
        println!("No dates found.");
    } else {
        for c in &captured {
            println!("{}  {}", c.date.format("%Y-%m-%d"), c.title);
        }
    }
    Ok(())
}
