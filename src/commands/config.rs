use std::path::Path;

use anyhow::Result;
use muster_ics::config::ExportConfig;
use owo_colors::OwoColorize;

use super::load_config;

pub fn run(config_path: &Path, init: bool) -> Result<()> {
    if init {
        if config_path.exists() {
            println!("{} {}", "Config already exists:".dimmed(), config_path.display());
        } else {
            ExportConfig::create_default_config(config_path).map_err(|e| anyhow::anyhow!(e))?;
            println!("{} {}", "Created".green(), config_path.display());
        }
    }

    let config = load_config(config_path)?;

    println!("{}", "Paths".bold());
    println!("  Config:      {}", config_path.display());
    println!("  Output dir:  {}", config.output_dir.display());
    println!("{}", "Calendar".bold());
    println!("  PRODID:      {}", config.prod_id);
    println!("  UID domain:  {}", config.uid_domain);

    Ok(())
}
