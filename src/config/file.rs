//! Configuration file management for wavscope.
//!
//! This module handles loading application configuration from a TOML file in
//! the user's config directory.

use crate::scope::view::{MAX_AMPLITUDE, MAX_NOTE, MIN_AMPLITUDE, MIN_NOTE};
use crate::scope::PlotGeometry;
use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Initial view and exported image geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Side length of the waveform area in exported images (odd)
    #[serde(default = "default_plot_size")]
    pub plot_size: u32,
    /// Margin around the waveform area in exported images
    #[serde(default = "default_border")]
    pub border: u32,
    /// Initial note index; 0 is 440 Hz
    #[serde(default)]
    pub note: i32,
    /// Initial amplitude zoom
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,
}

fn default_plot_size() -> u32 {
    969
}

fn default_border() -> u32 {
    13
}

fn default_amplitude() -> f64 {
    1.0
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            plot_size: default_plot_size(),
            border: default_border(),
            note: 0,
            amplitude: default_amplitude(),
        }
    }
}

impl ViewConfig {
    /// Geometry of exported images: the plot plus its border on every side.
    ///
    /// # Errors
    /// - If the resulting surface is not a valid odd square
    pub fn export_geometry(&self) -> anyhow::Result<PlotGeometry> {
        let size = self
            .plot_size
            .checked_add(self.border.saturating_mul(2))
            .ok_or_else(|| anyhow!("plot_size {} is too large", self.plot_size))?;
        PlotGeometry::square(size, self.border).map_err(|e| anyhow!("{e}"))
    }
}

/// Image export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Folder receiving snapshots and per-frame images
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,
}

fn default_images_dir() -> PathBuf {
    PathBuf::from("osc_images")
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            images_dir: default_images_dir(),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WavscopeConfig {
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl WavscopeConfig {
    /// Loads and validates configuration from an explicit path.
    ///
    /// # Errors
    /// - If the file cannot be read
    /// - If the TOML is malformed or a value is out of range
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let config_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::parse(&config_content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        tracing::debug!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Parses and validates TOML content.
    ///
    /// # Errors
    /// - If the TOML is malformed or a value is out of range
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: WavscopeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that serde cannot express.
    ///
    /// # Errors
    /// - If the export geometry is invalid
    /// - If the note or amplitude is out of range
    pub fn validate(&self) -> anyhow::Result<()> {
        self.view.export_geometry()?;

        if !(MIN_NOTE..=MAX_NOTE).contains(&self.view.note) {
            return Err(anyhow!(
                "view.note must be between {MIN_NOTE} and {MAX_NOTE}, got {}",
                self.view.note
            ));
        }
        if !(MIN_AMPLITUDE..=MAX_AMPLITUDE).contains(&self.view.amplitude) {
            return Err(anyhow!(
                "view.amplitude must be between {MIN_AMPLITUDE} and {MAX_AMPLITUDE}, got {}",
                self.view.amplitude
            ));
        }
        Ok(())
    }
}

/// Retrieves the path to the config file.
///
/// # Errors
/// - If the home directory cannot be determined
pub fn config_path() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home.join(".config").join("wavscope").join("wavscope.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_TEMPLATE: &str = include_str!("../../environments/wavscope.toml");

    #[test]
    fn test_default_template_matches_defaults() {
        let config = WavscopeConfig::parse(DEFAULT_TEMPLATE).unwrap();
        assert_eq!(config, WavscopeConfig::default());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = WavscopeConfig::parse("").unwrap();
        assert_eq!(config.view.plot_size, 969);
        assert_eq!(config.export.images_dir, PathBuf::from("osc_images"));
    }

    #[test]
    fn test_export_geometry_adds_border() {
        let geometry = ViewConfig::default().export_geometry().unwrap();
        assert_eq!(geometry.width(), 995);
        assert_eq!(geometry.border(), 13);
    }

    #[test]
    fn test_rejects_even_plot_size() {
        let err = WavscopeConfig::parse("[view]\nplot_size = 800\n").unwrap_err();
        assert!(err.to_string().contains("odd") || format!("{err:#}").contains("odd"));
    }

    #[test]
    fn test_rejects_out_of_range_note_and_amplitude() {
        assert!(WavscopeConfig::parse("[view]\nnote = 125\n").is_err());
        assert!(WavscopeConfig::parse("[view]\nnote = -241\n").is_err());
        assert!(WavscopeConfig::parse("[view]\namplitude = 0.0\n").is_err());
        assert!(WavscopeConfig::parse("[view]\namplitude = 20.5\n").is_err());
        assert!(WavscopeConfig::parse("[view]\nnote = -240\namplitude = 20.0\n").is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wavscope.toml");
        fs::write(&path, "[export]\nimages_dir = \"/tmp/frames\"\n").unwrap();

        let config = WavscopeConfig::load_from(&path).unwrap();
        assert_eq!(config.export.images_dir, PathBuf::from("/tmp/frames"));
        assert_eq!(config.view, ViewConfig::default());
    }
}
