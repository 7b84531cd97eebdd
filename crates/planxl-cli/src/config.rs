//! Export settings from `planxl.toml`
//!
//! ```toml
//! locale = "en"
//! file_suffix = "timeline"
//! timeline_day_width = 4.0
//! freeze_headers = false
//! ```
//!
//! Every key is optional; missing keys keep the exporter defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use planxl_render::{ExcelExporter, Locale};
use serde::Deserialize;

/// Looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "planxl.toml";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    pub locale: Locale,
    pub file_suffix: Option<String>,
    pub timeline_day_width: f64,
    pub freeze_headers: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        let exporter = ExcelExporter::default();
        Self {
            locale: exporter.locale,
            file_suffix: exporter.file_suffix,
            timeline_day_width: exporter.day_column_width,
            freeze_headers: exporter.freeze_headers,
        }
    }
}

impl ExportConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("invalid export configuration")?;
        if config.timeline_day_width.is_nan() || config.timeline_day_width <= 0.0 {
            anyhow::bail!(
                "timeline_day_width must be positive, got {}",
                config.timeline_day_width
            );
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Load an explicit config file, else `planxl.toml` in `dir` if it exists,
    /// else the defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let fallback: PathBuf = dir.join(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            tracing::debug!(path = %fallback.display(), "using default config file");
            return Self::from_file(&fallback);
        }
        Ok(Self::default())
    }

    pub fn exporter(&self) -> ExcelExporter {
        let mut exporter = ExcelExporter::new()
            .locale(self.locale)
            .day_column_width(self.timeline_day_width);
        if let Some(suffix) = &self.file_suffix {
            exporter = exporter.file_suffix(suffix.clone());
        }
        if !self.freeze_headers {
            exporter = exporter.no_freeze();
        }
        exporter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_keeps_defaults() {
        let config = ExportConfig::from_toml("").unwrap();
        assert_eq!(config, ExportConfig::default());
        assert_eq!(config.locale, Locale::Zh);
        assert_eq!(config.timeline_day_width, 3.0);
        assert!(config.freeze_headers);
    }

    #[test]
    fn all_keys() {
        let config = ExportConfig::from_toml(
            r#"
            locale = "en"
            file_suffix = "timeline"
            timeline_day_width = 4.5
            freeze_headers = false
            "#,
        )
        .unwrap();

        let exporter = config.exporter();
        assert_eq!(exporter.locale, Locale::En);
        assert_eq!(exporter.file_suffix.as_deref(), Some("timeline"));
        assert_eq!(exporter.day_column_width, 4.5);
        assert!(!exporter.freeze_headers);
    }

    #[test]
    fn rejects_unknown_keys_and_bad_widths() {
        assert!(ExportConfig::from_toml("colour = \"red\"").is_err());
        assert!(ExportConfig::from_toml("locale = \"fr\"").is_err());
        assert!(ExportConfig::from_toml("timeline_day_width = 0.0").is_err());
        assert!(ExportConfig::from_toml("timeline_day_width = -2.0").is_err());
        assert!(ExportConfig::from_toml("timeline_day_width = nan").is_err());
    }

    #[test]
    fn discovers_default_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            ExportConfig::discover(None, dir.path()).unwrap(),
            ExportConfig::default()
        );

        std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "locale = \"en\"\n").unwrap();
        assert_eq!(
            ExportConfig::discover(None, dir.path()).unwrap().locale,
            Locale::En
        );
    }

    #[test]
    fn explicit_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(ExportConfig::discover(Some(&missing), dir.path()).is_err());
    }
}
