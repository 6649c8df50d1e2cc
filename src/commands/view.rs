//! Interactive oscilloscope viewer (the default command).
//!
//! Opens a WAV file and runs the terminal UI: every navigation key applies one
//! event to the session, then the view is rendered again.

use crate::clipboard::copy_png_to_clipboard;
use crate::config::WavscopeConfig;
use crate::display::{clear_image_folder, encode_png, save_next_png, ScopeTui, ViewerCommand};
use crate::scope::{format_status_line, view_status_line, Session, ViewState};
use crate::source::{AudioSource, PcmSource};
use anyhow::Context;
use std::path::Path;

/// Whether every repaint is also written to the images folder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageCapture {
    #[default]
    Off,
    /// Save a PNG on every repaint
    EveryFrame,
    /// Empty the images folder first, then save on every repaint
    FreshEveryFrame,
}

/// Views `file` in the terminal, starting from `view`.
///
/// # Errors
/// - If the file cannot be opened or decoded
/// - If the terminal cannot be initialized or drawn to
/// - If a render pass fails
/// - If an image cannot be written
pub fn handle_view(
    file: &Path,
    view: ViewState,
    capture: ImageCapture,
    config: &WavscopeConfig,
) -> anyhow::Result<()> {
    let source =
        PcmSource::open(file).with_context(|| format!("Failed to open {}", file.display()))?;
    let export_geometry = config.view.export_geometry()?;
    let images_dir = config.export.images_dir.as_path();

    if capture == ImageCapture::FreshEveryFrame {
        clear_image_folder(images_dir)?;
    }

    let format_status = format_status_line(source.format());
    let mut session = Session::new(source, view);
    tracing::info!("Viewing {} from {}", file.display(), session.view());

    let mut tui = ScopeTui::new()?;
    let mut needs_redraw = true;

    loop {
        if needs_redraw {
            let frame = match tui.plot_geometry()? {
                Some(geometry) => Some(session.render(&geometry)?),
                None => None,
            };
            tui.draw(frame.as_ref(), &view_status_line(session.view()), &format_status)?;

            if capture != ImageCapture::Off {
                let image = session.render(&export_geometry)?;
                save_next_png(images_dir, &image)?;
            }
            needs_redraw = false;
        }

        match tui.handle_input()? {
            ViewerCommand::Continue => {}
            ViewerCommand::Redraw => needs_redraw = true,
            ViewerCommand::Navigate(event) => {
                let before = *session.view();
                needs_redraw = session.apply_navigation_event(event) != before;
            }
            ViewerCommand::CopyToClipboard => {
                let image = session.render(&export_geometry)?;
                copy_png_to_clipboard(&encode_png(&image)?)?;
            }
            ViewerCommand::SaveImage => {
                let image = session.render(&export_geometry)?;
                let path = save_next_png(images_dir, &image)?;
                tracing::info!("Snapshot saved to {}", path.display());
            }
            ViewerCommand::ToggleHelp => {
                tui.toggle_help();
                needs_redraw = true;
            }
            ViewerCommand::Quit => break,
        }
    }

    tui.cleanup()?;
    tracing::info!("Viewer closed at {}", session.view());
    Ok(())
}
