use std::path::Path;

use anyhow::{Context, Result};
use muster_ics::config::ExportConfig;
use muster_ics::delivery::filename_for_batch;
use muster_ics::{Event, deliver_as_file};
use owo_colors::OwoColorize;
use tracing::info;

use super::{Destination, read_input};

pub fn run(config: &ExportConfig, input: &Path, name: &str, destination: Destination) -> Result<()> {
    let content = read_input(input)?;
    let events: Vec<Event> = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a valid list of events", input.display()))?;
    info!(events = events.len(), "Exporting events");

    let document = config
        .builder()
        .build_multi(&events)
        .context("Could not export events")?;

    // Zero events produce no calendar; there is nothing to deliver
    if document.is_empty() {
        eprintln!("{}", "No events to export".yellow());
        return Ok(());
    }

    let mut sink = destination.sink();
    let filename = deliver_as_file(&document, &filename_for_batch(name), sink.as_mut())?;

    if let Some(path) = destination.describe(&filename) {
        println!(
            "{} {} events to {}",
            "Exported".green(),
            events.len(),
            path
        );
    }

    Ok(())
}
