//! Conversions between sample space and pixel space.

use super::error::ScopeError;
use super::view::ViewState;
use crate::source::AudioFormat;

/// Pixel layout of a square display surface with a constant border margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotGeometry {
    width: u32,
    height: u32,
    border: u32,
}

impl PlotGeometry {
    /// Describes a `size` x `size` surface with `border` pixels of margin on every side.
    ///
    /// # Errors
    /// - If `size` is even (the center row must be a single pixel row)
    /// - If the border leaves less than a 3 pixel plot area
    pub fn square(size: u32, border: u32) -> Result<Self, ScopeError> {
        if size % 2 == 0 {
            return Err(ScopeError::Geometry(format!("size {size} must be odd")));
        }
        if border == 0 || size < border.saturating_mul(2).saturating_add(3) {
            return Err(ScopeError::Geometry(format!(
                "border {border} does not fit a {size}x{size} surface"
            )));
        }

        Ok(Self {
            width: size,
            height: size,
            border,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn border(&self) -> u32 {
        self.border
    }

    pub fn plot_left(&self) -> u32 {
        self.border
    }

    pub fn plot_top(&self) -> u32 {
        self.border
    }

    /// First row below the plot area.
    pub fn plot_bottom(&self) -> u32 {
        self.height - self.border
    }

    /// First column right of the plot area.
    pub fn plot_right(&self) -> u32 {
        self.width - self.border
    }

    /// Horizontal distance between the first and the last plotted column.
    pub fn plot_span(&self) -> u32 {
        self.width - 2 * self.border - 1
    }

    /// Half the vertical distance between the top and bottom plotted rows.
    pub fn half_plot_height(&self) -> f64 {
        f64::from(self.height - 1 - 2 * self.border) / 2.0
    }
}

/// Half-open range of sample frames covered by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRange {
    pub first: u64,
    /// One past the last frame read; never beyond the end of the source
    pub last: u64,
    /// Frames the full window would cover, including any past the end of the source
    pub shown: u64,
}

impl SampleRange {
    pub fn is_empty(&self) -> bool {
        self.first >= self.last
    }

    /// Columns advanced per sample frame, or `None` when the window holds no frames.
    pub fn x_factor(&self, geometry: &PlotGeometry) -> Option<f64> {
        (self.shown > 0).then(|| f64::from(geometry.plot_span()) / self.shown as f64)
    }
}

/// Computes the frames visible in `view`, clamped to the source length.
pub fn sample_range(view: &ViewState, format: &AudioFormat) -> SampleRange {
    let rate = f64::from(format.sample_rate);
    let total = format.sample_count;

    let first = ((view.offset_seconds() * rate).round() as u64).min(total);
    let shown = (view.period_seconds() * rate).round() as u64;
    let last = first.saturating_add(shown).min(total);

    SampleRange { first, last, shown }
}

/// Column of frame `sample_index`. Monotonic non-decreasing in `sample_index`.
pub fn column_of(sample_index: u64, first_sample: u64, x_factor: f64, plot_left: u32) -> u32 {
    let delta = sample_index.saturating_sub(first_sample) as f64;
    plot_left + (delta * x_factor).round() as u32
}

/// Row of a normalized amplitude, relative to the plot top.
///
/// Zero maps to the middle row and positive values move up. Large zoom factors
/// push values outside the plot; the result is left unclamped so callers can
/// drop those samples with [`in_plot_range`]. Non-finite input yields `None`.
pub fn row_of(normalized_amplitude: f64, amplitude_zoom: f64, half_plot_height: f64) -> Option<i64> {
    let adjusted = 1.0 + normalized_amplitude * amplitude_zoom;
    // row 0 is the top of the display
    let flipped = 2.0 - adjusted;
    let row = (flipped * half_plot_height).round();
    row.is_finite().then_some(row as i64)
}

/// Half-open containment test `[plot_top, plot_bottom)`.
pub fn in_plot_range(row: i64, plot_top: u32, plot_bottom: u32) -> bool {
    row >= i64::from(plot_top) && row < i64::from(plot_bottom)
}
