use std::path::Path;

use anyhow::{Context, Result};
use muster_ics::config::ExportConfig;
use muster_ics::delivery::filename_for_event;
use muster_ics::{Event, deliver_as_file};
use owo_colors::OwoColorize;
use tracing::info;

use super::{Destination, read_input};

pub fn run(config: &ExportConfig, input: &Path, destination: Destination) -> Result<()> {
    let content = read_input(input)?;
    let event: Event = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a valid event", input.display()))?;
    info!(event_id = %event.id, "Exporting event");

    let document = config
        .builder()
        .build_single(&event)
        .with_context(|| format!("Could not export event '{}'", event.id))?;

    let mut sink = destination.sink();
    let filename = deliver_as_file(&document, &filename_for_event(&event), sink.as_mut())?;

    if let Some(path) = destination.describe(&filename) {
        println!("{} {}", "Exported".green(), path);
    }

    Ok(())
}
