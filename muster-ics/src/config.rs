//! Export configuration at ~/.config/muster/config.toml

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ExportError, ExportResult};
use crate::ics::{CalendarDocumentBuilder, DEFAULT_PROD_ID, DEFAULT_UID_DOMAIN, check_raw_value};

static DEFAULT_OUTPUT_DIR: &str = ".";

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_prod_id() -> String {
    DEFAULT_PROD_ID.to_string()
}

fn default_uid_domain() -> String {
    DEFAULT_UID_DOMAIN.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Where exported .ics files are written
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_prod_id")]
    pub prod_id: String,

    /// Suffix of every UID; changing it makes clients see new events
    #[serde(default = "default_uid_domain")]
    pub uid_domain: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            output_dir: default_output_dir(),
            prod_id: default_prod_id(),
            uid_domain: default_uid_domain(),
        }
    }
}

impl ExportConfig {
    pub fn config_path() -> ExportResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ExportError::Config("Could not determine config directory".into()))?
            .join("muster");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, falling back to defaults if absent.
    pub fn load() -> ExportResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> ExportResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: ExportConfig =
            toml::from_str(&content).map_err(|e| ExportError::Config(e.to_string()))?;

        if config.uid_domain.trim().is_empty() {
            return Err(ExportError::Config("uid_domain must not be empty".into()));
        }
        check_raw_value("prod_id", &config.prod_id)
            .and_then(|()| check_raw_value("uid_domain", &config.uid_domain))
            .map_err(|e| ExportError::Config(e.to_string()))?;

        Ok(config)
    }

    /// Builder using this configuration's product id and UID domain.
    pub fn builder(&self) -> CalendarDocumentBuilder {
        CalendarDocumentBuilder::new()
            .prod_id(&self.prod_id)
            .uid_domain(&self.uid_domain)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> ExportResult<()> {
        let contents = format!(
            "\
# muster export configuration

# Where exported .ics files are written:
# output_dir = \"{DEFAULT_OUTPUT_DIR}\"

# PRODID of generated calendars:
# prod_id = \"{DEFAULT_PROD_ID}\"

# Domain appended to event ids to form UIDs:
# uid_domain = \"{DEFAULT_UID_DOMAIN}\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ExportError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ExportError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, ExportConfig::default());
    }

    #[test]
    fn test_default_template_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("muster/config.toml");

        ExportConfig::create_default_config(&path).unwrap();
        let config = ExportConfig::load_from(&path).unwrap();

        assert_eq!(config, ExportConfig::default());
    }

    #[test]
    fn test_partial_file_overrides_only_given_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "uid_domain = \"station12.example\"\n").unwrap();

        let config = ExportConfig::load_from(&path).unwrap();
        assert_eq!(config.uid_domain, "station12.example");
        assert_eq!(config.prod_id, DEFAULT_PROD_ID);
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "uid_domain = [").unwrap();

        let err = ExportConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ExportError::Config(_)));
    }

    #[test]
    fn test_empty_uid_domain_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "uid_domain = \"  \"\n").unwrap();

        assert!(ExportConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_line_breaks_in_header_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        std::fs::write(&path, "prod_id = \"x\\nMETHOD:CANCEL\"\n").unwrap();
        let err = ExportConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ExportError::Config(ref msg) if msg.contains("prod_id")), "{err}");

        std::fs::write(&path, "uid_domain = \"muster.app\\r\\nX-EVIL:1\"\n").unwrap();
        let err = ExportConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ExportError::Config(ref msg) if msg.contains("uid_domain")), "{err}");
    }

    #[test]
    fn test_builder_uses_configured_uid_domain() {
        let config = ExportConfig {
            uid_domain: "station12.example".into(),
            ..ExportConfig::default()
        };
        let event = crate::Event::new(
            "evt-1",
            "Drill Day",
            "2025-07-04T14:00:00Z",
            "2025-06-01T00:00:00Z",
            "2025-06-01T00:00:00Z",
        );

        assert_eq!(config.builder().uid_for(&event), "evt-1@station12.example");
    }
}
