pub mod batch;
pub mod config;
pub mod event;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use muster_ics::DocumentSink;
use muster_ics::config::ExportConfig;
use muster_ics::delivery::{DirectorySink, WriterSink};

/// Where an exported document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Directory(PathBuf),
    Stdout,
}

impl Destination {
    pub fn from_args(output: Option<PathBuf>, stdout: bool, config: &ExportConfig) -> Self {
        if stdout {
            return Destination::Stdout;
        }
        Destination::Directory(output.unwrap_or_else(|| config.output_dir.clone()))
    }

    pub fn sink(&self) -> Box<dyn DocumentSink> {
        match self {
            Destination::Directory(dir) => Box::new(DirectorySink::new(dir)),
            Destination::Stdout => Box::new(WriterSink::new(std::io::stdout().lock())),
        }
    }

    /// Human-readable location of a delivered file.
    pub fn describe(&self, filename: &str) -> Option<String> {
        match self {
            Destination::Directory(dir) => Some(dir.join(filename).display().to_string()),
            Destination::Stdout => None,
        }
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    ExportConfig::config_path().map_err(|e| anyhow::anyhow!(e))
}

pub fn load_config(path: &Path) -> Result<ExportConfig> {
    ExportConfig::load_from(path)
        .with_context(|| format!("Could not load config from {}", path.display()))
}

/// Read a JSON input file, or stdin for "-".
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Could not read events from stdin")?;
        return Ok(content);
    }

    std::fs::read_to_string(path).with_context(|| format!("Could not read {}", path.display()))
}
