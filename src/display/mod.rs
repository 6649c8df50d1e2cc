//! Presentation of rendered frames: terminal viewer and PNG export.

pub mod export;
pub mod tui;

pub use export::{clear_image_folder, encode_png, save_next_png, save_png};
pub use tui::{ScopeTui, ViewerCommand};
