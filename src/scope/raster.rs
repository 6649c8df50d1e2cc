//! Waveform rasterization.
//!
//! Every sample frame in the visible range is mapped independently: all of
//! its channels share one column, each channel gets its own row, and channels
//! that land on the same row are painted in the collision color. Frames are
//! processed in parallel on the rayon pool.
//!
//! Writes go through relaxed atomic stores. Two frames only share a pixel when
//! the window holds more frames than the plot has columns; the last store wins
//! and which one that is depends on scheduling. Adjacent frames are visually
//! alike at that zoom level, so the flicker is accepted.

use super::error::ScopeResult;
use super::transform::{column_of, in_plot_range, row_of, sample_range, PlotGeometry};
use super::view::ViewState;
use crate::source::AudioSource;
use rayon::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};

/// Channels beyond this many are not drawn.
pub const MAX_CHANNELS: usize = 16;

/// Color of a pixel shared by two or more channels of the same frame.
pub const COLLISION_COLOR: u32 = 0x0000ff;
/// Color of unpainted pixels.
pub const BACKGROUND_COLOR: u32 = 0x000000;

/// Fixed per-channel colors, `0xRRGGBB`. Channel 0 has the highest contrast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelColorTable([u32; MAX_CHANNELS]);

impl ChannelColorTable {
    pub const fn new() -> Self {
        Self([
            0xffffff, 0xff0000, 0x00ff00, 0xffff00, //
            0xcc0000, 0x00cc00, 0x0000cc, 0xcccc00, //
            0x880000, 0x008800, 0x000088, 0x888800, //
            0x440000, 0x004400, 0x000044, 0x444400,
        ])
    }

    /// Color of `channel`, or `None` past the table.
    pub fn get(&self, channel: usize) -> Option<u32> {
        self.0.get(channel).copied()
    }
}

impl Default for ChannelColorTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Row-major `0xRRGGBB` pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// A buffer filled with the background color.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![BACKGROUND_COLOR; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[cfg(test)]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Writes one pixel; coordinates outside the buffer are ignored.
    pub fn set(&mut self, x: u32, y: u32, color: u32) {
        if x < self.width && y < self.height {
            self.pixels[y as usize * self.width as usize + x as usize] = color;
        }
    }

    /// Converts to an 8-bit RGB image for encoding.
    pub fn to_rgb_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            let color = self.pixels[y as usize * self.width as usize + x as usize];
            image::Rgb([(color >> 16) as u8, (color >> 8) as u8, color as u8])
        })
    }
}

/// Rasterizes the visible window of `source` into a fresh buffer.
///
/// Only the plot area is painted. An empty window (offset at the end of the
/// source, or a period shorter than one sample) yields a background-only buffer.
///
/// # Errors
/// - If the source fails to return a sample inside the visible range
pub fn render<S>(source: &S, view: &ViewState, geometry: &PlotGeometry) -> ScopeResult<PixelBuffer>
where
    S: AudioSource + ?Sized,
{
    let format = source.format();
    let range = sample_range(view, format);
    let width = geometry.width();

    let x_factor = match range.x_factor(geometry) {
        Some(factor) if !range.is_empty() => factor,
        _ => {
            tracing::debug!("Nothing to draw for {:?}", range);
            return Ok(PixelBuffer::new(width, geometry.height()));
        }
    };

    let channel_count = (format.channels as usize).min(MAX_CHANNELS);
    if (format.channels as usize) > MAX_CHANNELS {
        tracing::debug!(
            "Source has {} channels; drawing the first {}",
            format.channels,
            MAX_CHANNELS
        );
    }

    let colors = ChannelColorTable::new();
    let amplitude_zoom = view.amplitude_zoom();
    let half_plot_height = geometry.half_plot_height();
    let plot_top = geometry.plot_top();
    let plot_bottom = geometry.plot_bottom();
    let plot_right = geometry.plot_right();

    let cells: Vec<AtomicU32> = (0..width as usize * geometry.height() as usize)
        .map(|_| AtomicU32::new(BACKGROUND_COLOR))
        .collect();

    (range.first..range.last)
        .into_par_iter()
        .try_for_each(|sample| -> ScopeResult<()> {
            let x = column_of(sample, range.first, x_factor, geometry.plot_left());
            if x >= plot_right {
                return Ok(());
            }

            let mut rows = [None::<u32>; MAX_CHANNELS];
            for (channel, row) in rows.iter_mut().enumerate().take(channel_count) {
                let value = source.sample_value(sample, channel as u16)?;
                *row = row_of(value, amplitude_zoom, half_plot_height)
                    .map(|row| row + i64::from(plot_top))
                    .filter(|&row| in_plot_range(row, plot_top, plot_bottom))
                    .map(|row| row as u32);
            }

            let rows = &rows[..channel_count];
            for (channel, row) in rows.iter().enumerate() {
                let Some(y) = *row else { continue };
                let collides = rows
                    .iter()
                    .enumerate()
                    .any(|(other, other_row)| other != channel && *other_row == Some(y));
                let color = if collides {
                    COLLISION_COLOR
                } else {
                    colors.get(channel).unwrap_or(COLLISION_COLOR)
                };
                cells[y as usize * width as usize + x as usize].store(color, Ordering::Relaxed);
            }

            Ok(())
        })?;

    Ok(PixelBuffer {
        width,
        height: geometry.height(),
        pixels: cells.into_iter().map(AtomicU32::into_inner).collect(),
    })
}
