//! Oscilloscope core: view model, navigation, and waveform rasterization.
//!
//! Data flows one way: navigation events mutate the [`ViewState`] held by a
//! [`Session`], and each render pass reads that view plus the immutable audio
//! source to produce a fresh [`PixelBuffer`].

pub mod error;
pub mod overlay;
pub mod raster;
pub mod session;
pub mod transform;
pub mod view;

pub use overlay::{format_status_line, view_status_line};
pub use raster::PixelBuffer;
pub use session::Session;
pub use transform::PlotGeometry;
pub use view::{NavigationEvent, ViewState};
