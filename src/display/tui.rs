//! Terminal user interface for the oscilloscope.
//!
//! The rendered pixel buffer is drawn with upper-half-block cells, two pixel
//! rows per terminal row, between a view status line on top and a format
//! status line at the bottom.

use crate::scope::raster::BACKGROUND_COLOR;
use crate::scope::{NavigationEvent, PixelBuffer, PlotGeometry};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::io::{stdout, Stdout};
use std::time::Duration;

/// Border margin of the plot inside the terminal, in pixels.
pub const TERMINAL_BORDER: u32 = 2;

/// Rows taken by the two status lines.
const STATUS_ROWS: u16 = 2;

const TEXT_STYLE: Style = Style::new().fg(Color::Rgb(0, 255, 0)).bg(Color::Rgb(0, 0, 0));

const HELP_TEXT: &str = "\
←/→        shift left/right in the file
↑/↓        increase/decrease amplitude
PgUp/PgDn  longer/shorter period (one half step)
Ctrl+C     copy current view to the clipboard
Ctrl+S     save current view as PNG
F1 or ?    toggle this help
q or Esc   quit

Channel 0 is white, 1 red, 2 green.
Shared values are blue. Only the first 16 channels are shown.";

/// User input command while viewing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerCommand {
    /// Nothing to do (no key, or an unbound key)
    Continue,
    /// The terminal changed size
    Redraw,
    /// Change the view
    Navigate(NavigationEvent),
    /// Copy the current view as PNG (Ctrl+C)
    CopyToClipboard,
    /// Save the current view as PNG (Ctrl+S)
    SaveImage,
    /// Show or hide the key help (F1 or '?')
    ToggleHelp,
    /// Leave the viewer (Escape or 'q')
    Quit,
}

/// Maps a key press to a viewer command.
pub fn command_for_key(key: KeyEvent) -> ViewerCommand {
    if key.kind != KeyEventKind::Press {
        return ViewerCommand::Continue;
    }

    let control = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if control => ViewerCommand::CopyToClipboard,
        KeyCode::Char('s') if control => ViewerCommand::SaveImage,
        KeyCode::Char('q') | KeyCode::Esc => ViewerCommand::Quit,
        KeyCode::Char('?') | KeyCode::F(1) => ViewerCommand::ToggleHelp,
        KeyCode::Left => ViewerCommand::Navigate(NavigationEvent::PanLeft),
        KeyCode::Right => ViewerCommand::Navigate(NavigationEvent::PanRight),
        KeyCode::Up => ViewerCommand::Navigate(NavigationEvent::AmplitudeUp),
        KeyCode::Down => ViewerCommand::Navigate(NavigationEvent::AmplitudeDown),
        // PageUp lengthens the visible period, PageDown shortens it
        KeyCode::PageUp => ViewerCommand::Navigate(NavigationEvent::ZoomIn),
        KeyCode::PageDown => ViewerCommand::Navigate(NavigationEvent::ZoomOut),
        _ => ViewerCommand::Continue,
    }
}

/// Largest odd square plot that fits a terminal of `columns` x `rows` cells.
///
/// Returns `None` when the terminal is too small to hold a plot.
pub fn terminal_plot_geometry(columns: u16, rows: u16) -> Option<PlotGeometry> {
    let pixel_rows = u32::from(rows.saturating_sub(STATUS_ROWS)) * 2;
    let mut size = u32::from(columns).min(pixel_rows);
    if size % 2 == 0 {
        size = size.saturating_sub(1);
    }
    PlotGeometry::square(size, TERMINAL_BORDER).ok()
}

fn to_color(color: u32) -> Color {
    Color::Rgb((color >> 16) as u8, (color >> 8) as u8, color as u8)
}

/// Draws a pixel buffer with half-block cells, centered horizontally in its area.
pub struct ScopeView<'a> {
    pixels: &'a PixelBuffer,
}

impl<'a> ScopeView<'a> {
    pub fn new(pixels: &'a PixelBuffer) -> Self {
        Self { pixels }
    }
}

impl Widget for ScopeView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let columns = self.pixels.width().min(u32::from(area.width));
        let rows = self.pixels.height().div_ceil(2).min(u32::from(area.height));
        let left = area.x + ((u32::from(area.width) - columns) / 2) as u16;

        for row in 0..rows {
            for x in 0..columns {
                let top = self.pixels.get(x, row * 2).unwrap_or(BACKGROUND_COLOR);
                let bottom = self.pixels.get(x, row * 2 + 1).unwrap_or(BACKGROUND_COLOR);
                buf.set_string(
                    left + x as u16,
                    area.y + row as u16,
                    "▀",
                    Style::default().fg(to_color(top)).bg(to_color(bottom)),
                );
            }
        }
    }
}

/// Terminal UI for the oscilloscope.
pub struct ScopeTui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    show_help: bool,
}

impl ScopeTui {
    /// Creates a new TUI instance and enters alternate screen mode.
    ///
    /// # Errors
    /// - If raw mode cannot be enabled
    /// - If the alternate screen cannot be entered
    /// - If the terminal cannot be initialized
    pub fn new() -> anyhow::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(ScopeTui {
            terminal,
            show_help: false,
        })
    }

    /// Plot geometry for the current terminal size, if a plot fits.
    ///
    /// # Errors
    /// - If the terminal size cannot be queried
    pub fn plot_geometry(&self) -> anyhow::Result<Option<PlotGeometry>> {
        let size = self.terminal.size()?;
        Ok(terminal_plot_geometry(size.width, size.height))
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Draws one frame: status lines and, if given, the rendered plot.
    ///
    /// # Errors
    /// - If terminal rendering fails
    pub fn draw(
        &mut self,
        pixels: Option<&PixelBuffer>,
        view_status: &str,
        format_status: &str,
    ) -> anyhow::Result<()> {
        let show_help = self.show_help;

        self.terminal.draw(|frame| {
            let area = frame.area();
            frame.render_widget(Block::default().style(TEXT_STYLE), area);

            let [top_area, plot_area, bottom_area] = Layout::vertical([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .areas(area);

            frame.render_widget(
                Paragraph::new(view_status).alignment(Alignment::Center).style(TEXT_STYLE),
                top_area,
            );
            frame.render_widget(
                Paragraph::new(format_status).alignment(Alignment::Center).style(TEXT_STYLE),
                bottom_area,
            );

            match pixels {
                Some(pixels) => frame.render_widget(ScopeView::new(pixels), plot_area),
                None => frame.render_widget(
                    Paragraph::new("Terminal too small")
                        .alignment(Alignment::Center)
                        .style(TEXT_STYLE),
                    plot_area,
                ),
            }

            if show_help {
                let width = 64.min(area.width);
                let height = 14.min(area.height);
                let help_area = Rect {
                    x: area.x + (area.width - width) / 2,
                    y: area.y + (area.height - height) / 2,
                    width,
                    height,
                };
                frame.render_widget(Clear, help_area);
                frame.render_widget(
                    Paragraph::new(HELP_TEXT).style(TEXT_STYLE).block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(" wavscope ")
                            .style(TEXT_STYLE),
                    ),
                    help_area,
                );
            }
        })?;

        Ok(())
    }

    /// Waits briefly for input and returns the resulting command.
    ///
    /// # Errors
    /// - If event polling fails
    pub fn handle_input(&mut self) -> anyhow::Result<ViewerCommand> {
        if event::poll(Duration::from_millis(100))? {
            return Ok(match event::read()? {
                Event::Key(key) => {
                    let command = command_for_key(key);
                    if command != ViewerCommand::Continue {
                        tracing::debug!("{:?} pressed: {:?}", key.code, command);
                    }
                    command
                }
                Event::Resize(columns, rows) => {
                    tracing::debug!("Terminal resized to {columns}x{rows}");
                    ViewerCommand::Redraw
                }
                _ => ViewerCommand::Continue,
            });
        }
        Ok(ViewerCommand::Continue)
    }

    /// Cleans up terminal state and exits alternate screen mode.
    ///
    /// # Errors
    /// - If terminal mode cannot be disabled
    /// - If the cursor cannot be shown
    pub fn cleanup(&mut self) -> anyhow::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for ScopeTui {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
