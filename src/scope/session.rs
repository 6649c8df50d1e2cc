//! Per-file viewing session.
//!
//! Owns the loaded source and the current view. Render passes borrow the
//! session mutably, so navigation can only happen between passes.

use super::error::ScopeResult;
use super::overlay::draw_frame;
use super::raster::{render, PixelBuffer};
use super::transform::PlotGeometry;
use super::view::{NavigationEvent, ViewState};
use crate::source::AudioSource;
use std::fmt;
use std::time::{Duration, Instant};

/// Accumulated render timings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub passes: u64,
    pub rasterize: Duration,
    pub composite: Duration,
}

impl fmt::Display for RenderStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} render passes: {} ms rasterizing, {} ms compositing",
            self.passes,
            self.rasterize.as_millis(),
            self.composite.as_millis()
        )
    }
}

pub struct Session<S> {
    source: S,
    view: ViewState,
    stats: RenderStats,
}

impl<S: AudioSource> Session<S> {
    /// Starts a session; the view offset is clamped to the source duration.
    pub fn new(source: S, view: ViewState) -> Self {
        let duration = source.duration_seconds();
        let view = view.with_offset(view.offset_seconds(), duration);
        Self {
            source,
            view,
            stats: RenderStats::default(),
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Applies one navigation event and returns the resulting view.
    pub fn apply_navigation_event(&mut self, event: NavigationEvent) -> ViewState {
        self.view = self.view.apply(event, self.source.duration_seconds());
        self.view
    }

    /// Renders the current view and draws the frame around it.
    ///
    /// # Errors
    /// - If the source fails while rasterizing
    pub fn render(&mut self, geometry: &PlotGeometry) -> ScopeResult<PixelBuffer> {
        let started = Instant::now();
        let mut buffer = render(&self.source, &self.view, geometry)?;
        let rasterized = Instant::now();
        draw_frame(&mut buffer, geometry.border());

        self.stats.passes += 1;
        self.stats.rasterize += rasterized - started;
        self.stats.composite += rasterized.elapsed();
        Ok(buffer)
    }
}

impl<S> Session<S> {
    pub fn stats(&self) -> RenderStats {
        self.stats
    }
}

impl<S> Drop for Session<S> {
    fn drop(&mut self) {
        let stats = self.stats();
        if stats.passes > 0 {
            tracing::info!("{stats}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::overlay::FRAME_COLOR;
    use crate::source::PcmSource;

    fn session() -> Session<PcmSource> {
        let source = PcmSource::from_channels(8_000, vec![vec![0.0; 8_000]]).unwrap();
        Session::new(source, ViewState::default())
    }

    #[test]
    fn test_navigation_updates_view() {
        let mut session = session();
        let view = session.apply_navigation_event(NavigationEvent::PanRight);
        assert!(view.offset_seconds() > 0.0);
        assert_eq!(session.view(), &view);

        session.apply_navigation_event(NavigationEvent::ZoomIn);
        assert_eq!(session.view().note_index(), -1);
    }

    #[test]
    fn test_pan_right_stops_at_duration() {
        let mut session = session();
        for _ in 0..10_000 {
            session.apply_navigation_event(NavigationEvent::PanRight);
        }
        assert_eq!(session.view().offset_seconds(), 1.0);
    }

    #[test]
    fn test_new_clamps_offset_to_duration() {
        let source = PcmSource::from_channels(8_000, vec![vec![0.0; 800]]).unwrap();
        let session = Session::new(source, ViewState::default().with_offset(5.0, 100.0));
        assert_eq!(session.view().offset_seconds(), 0.1);
    }

    #[test]
    fn test_render_draws_frame_and_counts_passes() {
        let mut session = session();
        let geometry = PlotGeometry::square(41, 4).unwrap();
        let buffer = session.render(&geometry).unwrap();
        session.render(&geometry).unwrap();

        assert_eq!(buffer.get(3, 10), Some(FRAME_COLOR));
        assert_eq!(buffer.get(20, 20), Some(0xffffff));
        assert_eq!(session.stats().passes, 2);
    }

    #[test]
    fn test_render_stats_summary() {
        let stats = RenderStats {
            passes: 3,
            rasterize: Duration::from_millis(42),
            composite: Duration::from_micros(1_500),
        };
        assert_eq!(
            stats.to_string(),
            "3 render passes: 42 ms rasterizing, 1 ms compositing"
        );
    }
}
