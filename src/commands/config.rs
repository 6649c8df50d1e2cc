//! `wavscope config`: edit the configuration file.
//!
//! The file is created from the default template first, validated after the
//! editor closes, and problems are reported without discarding the edit.

use crate::config::{config_path, WavscopeConfig};
use crate::setup::ensure_config;
use anyhow::{anyhow, Context};
use std::path::Path;
use std::process::Command;

/// Editors tried, in order, when `$EDITOR` is unset.
const FALLBACK_EDITORS: [&str; 2] = ["nano", "vi"];

/// Opens the configuration file in the user's editor.
///
/// # Errors
/// - If the config file cannot be created
/// - If no editor is available or it exits with an error
pub fn handle_config() -> anyhow::Result<()> {
    let config_path = config_path()?;
    if ensure_config(&config_path)? {
        println!("Created {}", config_path.display());
    }

    let editor = editor_command(std::env::var("EDITOR").ok().as_deref(), is_on_path)
        .ok_or_else(|| anyhow!("No editor found. Please set the $EDITOR environment variable."))?;
    run_editor(&editor, &config_path)?;

    match WavscopeConfig::load_from(&config_path) {
        Ok(_) => tracing::info!("{} saved and valid", config_path.display()),
        Err(e) => {
            tracing::warn!("Edited config does not validate: {e:#}");
            eprintln!("Warning: {e:#}");
        }
    }
    Ok(())
}

/// Program and leading arguments of the editor to run.
///
/// `$EDITOR` may carry arguments (`code --wait`); otherwise the first
/// available fallback is used.
fn editor_command(
    env_editor: Option<&str>,
    available: impl Fn(&str) -> bool,
) -> Option<Vec<String>> {
    if let Some(words) = env_editor
        .map(|value| value.split_whitespace().map(str::to_string).collect::<Vec<_>>())
        .filter(|words| !words.is_empty())
    {
        return Some(words);
    }

    FALLBACK_EDITORS
        .into_iter()
        .find(|editor| available(editor))
        .map(|editor| vec![editor.to_string()])
}

fn run_editor(editor: &[String], file: &Path) -> anyhow::Result<()> {
    let (program, args) = editor
        .split_first()
        .ok_or_else(|| anyhow!("Empty editor command"))?;
    tracing::debug!("Editing {} with {}", file.display(), editor.join(" "));

    let status = Command::new(program)
        .args(args)
        .arg(file)
        .status()
        .with_context(|| format!("Failed to start editor '{program}'"))?;

    if !status.success() {
        return Err(anyhow!(
            "Editor exited with error code: {}",
            status.code().unwrap_or(-1)
        ));
    }
    Ok(())
}

fn is_on_path(program: &str) -> bool {
    Command::new("which")
        .arg(program)
        .output()
        .is_ok_and(|output| output.status.success())
}
