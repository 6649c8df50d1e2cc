//! Clipboard utilities for wavscope.
//!
//! Copies PNG snapshots to the system clipboard using wl-copy (Wayland) or xclip (X11).

use std::io::Write;
use std::process::{Command, Stdio};

/// Copies PNG image bytes to the system clipboard.
///
/// Tries wl-copy first for Wayland sessions, then falls back to xclip for X11.
/// A missing clipboard tool is logged as a warning rather than failing the viewer.
///
/// # Errors
/// - If no clipboard tool is available (warning only, not an error)
pub fn copy_png_to_clipboard(png: &[u8]) -> anyhow::Result<()> {
    let tools: [(&str, &[&str]); 2] = [
        ("wl-copy", &["--type", "image/png"]),
        ("xclip", &["-selection", "clipboard", "-t", "image/png", "-in"]),
    ];

    for (tool, args) in tools {
        match pipe_to(tool, args, png) {
            Ok(true) => {
                tracing::debug!("Frame copied to clipboard via {tool}");
                return Ok(());
            }
            Ok(false) => tracing::debug!("{tool} exited with an error"),
            Err(e) => tracing::debug!("{tool} not usable: {e}"),
        }
    }

    tracing::warn!("No clipboard tool available (wl-copy or xclip not found)");
    Ok(())
}

/// Spawns `tool`, writes `data` to its stdin and waits for it.
///
/// Returns whether the tool exited successfully.
fn pipe_to(tool: &str, args: &[&str], data: &[u8]) -> std::io::Result<bool> {
    let mut child = Command::new(tool)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    // stdin is dropped before waiting so the tool sees EOF
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(data),
        None => Ok(()),
    };

    let status = child.wait()?;
    written?;
    Ok(status.success())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipe_to_reports_exit_status() {
        assert!(pipe_to("sh", &["-c", "cat > /dev/null"], b"png").unwrap());
        assert!(!pipe_to("sh", &["-c", "cat > /dev/null; exit 3"], b"png").unwrap());
    }

    #[test]
    fn test_pipe_to_reaps_tool_that_exits_early() {
        // the tool exits without reading, so the write fails with a broken pipe
        let data = vec![0u8; 4 * 1024 * 1024];
        let result = pipe_to("sh", &["-c", "exit 0"], &data);
        assert!(result.is_err());
    }

    #[test]
    fn test_pipe_to_missing_tool() {
        assert!(pipe_to("wavscope-no-such-clipboard-tool", &[], b"png").is_err());
    }
}
