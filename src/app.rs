//! Application orchestration and command routing.
//!
//! Handles command-line argument parsing and delegates to appropriate command handlers.

use crate::commands::{self, ImageCapture};
use crate::config::{self, ViewConfig, WavscopeConfig};
use crate::logging;
use crate::scope::view::{MAX_AMPLITUDE, MAX_NOTE, MIN_AMPLITUDE, MIN_NOTE};
use crate::scope::ViewState;
use crate::setup;
use anyhow::anyhow;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

/// Terminal oscilloscope for WAV files
#[derive(Parser)]
#[command(name = "wavscope")]
#[command(version)]
#[command(about = "Terminal oscilloscope for uncompressed WAV files")]
#[command(long_about = "Terminal oscilloscope for uncompressed WAV files.\n\nShows one period of a chosen musical note worth of samples across the plot,\nevery channel in its own color, shared values in blue.\n\nDEFAULT COMMAND:\n    If no command is specified, FILE is opened in the viewer.\n\nKEYS:\n    ←/→          shift left/right in the file\n    ↑/↓          increase/decrease amplitude\n    PgUp/PgDn    longer/shorter period\n    Ctrl+C       copy view to clipboard\n    Ctrl+S       save view as PNG\n    F1 or ?      help\n    q or Esc     quit\n\nEXAMPLES:\n    # View a file starting 1.5 seconds in, one period of D\n    $ wavscope song.wav -o 1.5 -p d\n\n    # Render one frame without a terminal\n    $ wavscope render song.wav -O frame.png -a 2.5\n\n    # Save every repaint to an emptied images folder\n    $ wavscope song.wav -I")]
#[command(
    after_help = "CONFIGURATION:\n    Config file:        ~/.config/wavscope/wavscope.toml\n    Logs:               ~/.local/state/wavscope/wavscope.log.*"
)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// WAV file to view
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    #[command(flatten)]
    view: ViewArgs,

    /// Save a PNG of every repaint to the images folder
    #[arg(short = 'i', long)]
    images: bool,

    /// Empty the images folder first, then save a PNG of every repaint
    #[arg(short = 'I', long, conflicts_with = "images")]
    fresh_images: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Initial view overrides shared by the viewer and `render`.
#[derive(Args, Debug, Default)]
struct ViewArgs {
    /// Start offset in seconds (sign is ignored)
    #[arg(short, long, value_name = "SECONDS", allow_negative_numbers = true)]
    offset: Option<f64>,

    /// Period as a note: a letter a..g or a half-step index in [-240, 124]
    #[arg(short = 'p', long = "period", value_name = "NOTE", value_parser = parse_note, allow_negative_numbers = true)]
    note: Option<i32>,

    /// Amplitude zoom in [0.1, 20.0]
    #[arg(short, long, value_name = "AMPLITUDE", value_parser = parse_amplitude)]
    amplitude: Option<f64>,
}

impl ViewArgs {
    /// Initial view: command-line values first, then the config file.
    fn initial_view(&self, config: &ViewConfig) -> ViewState {
        ViewState::default()
            .with_note(self.note.unwrap_or(config.note))
            .with_amplitude(self.amplitude.unwrap_or(config.amplitude))
            .with_offset(self.offset.unwrap_or(0.0), f64::INFINITY)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render a single frame to a PNG file
    ///
    /// Uses the export geometry from the config file unless --size or
    /// --border are given.
    Render {
        /// WAV file to render
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// PNG file to write
        #[arg(short = 'O', long, value_name = "PNG")]
        output: PathBuf,

        #[command(flatten)]
        view: ViewArgs,

        /// Side length of the waveform area in pixels (odd)
        #[arg(long, value_name = "N")]
        size: Option<u32>,

        /// Margin around the waveform area in pixels
        #[arg(long, value_name = "B")]
        border: Option<u32>,
    },

    /// Print the format of a WAV file
    Info {
        /// WAV file to inspect
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Open configuration file in your preferred editor
    ///
    /// Uses $EDITOR environment variable or falls back to nano/vi.
    #[command(visible_alias = "c")]
    Config,

    /// Show recent log entries from the application
    ///
    /// Display the last 50 lines of the most recent log file.
    Logs,

    /// Generate shell completion script
    ///
    /// Examples:
    ///   wavscope completions bash > wavscope.bash
    ///   wavscope completions zsh > _wavscope
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Parses a note given as a letter `a`..`g` or as a signed half-step index.
fn parse_note(value: &str) -> Result<i32, String> {
    let mut chars = value.chars();
    if let (Some(letter), None) = (chars.next(), chars.next()) {
        let letter = letter.to_ascii_lowercase();
        if ('a'..='g').contains(&letter) {
            return Ok(letter as i32 - 'a' as i32);
        }
    }

    let index: i32 = value
        .parse()
        .map_err(|_| format!("'{value}' is neither a note letter a..g nor an integer"))?;
    if !(MIN_NOTE..=MAX_NOTE).contains(&index) {
        return Err(format!(
            "note index must be between {MIN_NOTE} and {MAX_NOTE}, got {index}"
        ));
    }
    Ok(index)
}

/// Parses an amplitude zoom, rejecting values the config file would reject.
fn parse_amplitude(value: &str) -> Result<f64, String> {
    let amplitude: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if !(MIN_AMPLITUDE..=MAX_AMPLITUDE).contains(&amplitude) {
        return Err(format!(
            "amplitude must be between {MIN_AMPLITUDE} and {MAX_AMPLITUDE}, got {value}"
        ));
    }
    Ok(amplitude)
}

/// Runs the main application based on command-line arguments.
///
/// # Errors
/// - If logging initialization fails
/// - If the config file cannot be created, read, or validated
/// - If command execution fails (e.g., unreadable file, terminal failure)
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Commands that don't need logging or config
    match &cli.command {
        Some(Commands::Completions { shell }) => {
            generate(*shell, &mut Cli::command(), "wavscope", &mut io::stdout());
            return Ok(());
        }
        Some(Commands::Logs) => return commands::handle_logs(),
        _ => {}
    }

    logging::init_logging()?;

    // Editing must work even when the current file does not validate
    if let Some(Commands::Config) = cli.command {
        return commands::handle_config();
    }

    let config_path = config::config_path()?;
    setup::ensure_config(&config_path)?;
    let config = WavscopeConfig::load_from(&config_path)?;

    match cli.command {
        None => {
            let file = cli
                .file
                .ok_or_else(|| anyhow!("No WAV file given. Run 'wavscope --help' for usage."))?;
            let capture = if cli.fresh_images {
                ImageCapture::FreshEveryFrame
            } else if cli.images {
                ImageCapture::EveryFrame
            } else {
                ImageCapture::Off
            };
            commands::handle_view(&file, cli.view.initial_view(&config.view), capture, &config)
        }
        Some(Commands::Render {
            file,
            output,
            view,
            size,
            border,
        }) => {
            let mut view_config = config.view.clone();
            if let Some(size) = size {
                view_config.plot_size = size;
            }
            if let Some(border) = border {
                view_config.border = border;
            }
            let geometry = view_config.export_geometry()?;
            commands::handle_render(&file, view.initial_view(&config.view), &geometry, &output)
        }
        Some(Commands::Info { file }) => commands::handle_info(&file),
        Some(Commands::Config) | Some(Commands::Completions { .. }) | Some(Commands::Logs) => {
            unreachable!("These commands are handled earlier")
        }
    }
}
