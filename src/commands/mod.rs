//! Application command handlers for wavscope.
//!
//! # Commands
//! - `view`: Interactive terminal oscilloscope (default)
//! - `render`: Headless single-frame render to PNG
//! - `info`: Print the format of an audio file
//! - `config`: Open configuration file in user's preferred editor
//! - `logs`: Display recent log entries

pub mod config;
pub mod info;
pub mod logs;
pub mod render;
pub mod view;

pub use config::handle_config;
pub use info::handle_info;
pub use logs::handle_logs;
pub use render::handle_render;
pub use view::{handle_view, ImageCapture};
