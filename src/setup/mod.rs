//! First-run setup.
//!
//! Writes the embedded default configuration when the user has none yet, so
//! `wavscope config` always opens a documented file.

use std::path::Path;

/// Embedded default configuration template.
const DEFAULT_CONFIG: &str = include_str!("../../environments/wavscope.toml");

/// Creates the config file from the default template if it does not exist.
///
/// Returns `true` when a new file was written.
///
/// # Errors
/// Returns an error if the config directory or file cannot be created.
pub fn ensure_config(config_path: &Path) -> anyhow::Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }

    if let Some(config_dir) = config_path.parent() {
        std::fs::create_dir_all(config_dir)?;
    }
    std::fs::write(config_path, DEFAULT_CONFIG)?;
    tracing::info!("Default configuration written to {}", config_path.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WavscopeConfig;

    #[test]
    fn test_ensure_config_writes_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("wavscope.toml");

        assert!(ensure_config(&path).unwrap());
        assert!(path.exists());
        assert_eq!(WavscopeConfig::load_from(&path).unwrap(), WavscopeConfig::default());

        std::fs::write(&path, "[view]\nnote = 3\n").unwrap();
        assert!(!ensure_config(&path).unwrap());
        assert_eq!(WavscopeConfig::load_from(&path).unwrap().view.note, 3);
    }
}
