//! Static decoration composited over a rendered plot.

use super::raster::PixelBuffer;
use super::view::ViewState;
use crate::source::AudioFormat;

/// Color of the frame lines and status text.
pub const FRAME_COLOR: u32 = 0x00ff00;

/// Draws the plot frame into the border margin.
///
/// Lines run along the last border pixel on every side, and short ticks mark
/// the center row in the left and right margins.
pub fn draw_frame(buffer: &mut PixelBuffer, border: u32) {
    let width = buffer.width();
    let height = buffer.height();
    if border == 0 || width < 2 * border || height < 2 * border {
        return;
    }

    let inner = border - 1;
    let right = width - 1 - inner;
    let bottom = height - 1 - inner;
    let middle = (height - 1) / 2;

    for x in 0..width {
        buffer.set(x, inner, FRAME_COLOR);
        buffer.set(x, bottom, FRAME_COLOR);
    }
    for y in 0..height {
        buffer.set(inner, y, FRAME_COLOR);
        buffer.set(right, y, FRAME_COLOR);
    }
    for x in (0..border).chain(width - border..width) {
        buffer.set(x, middle, FRAME_COLOR);
    }
}

/// Top status line describing the current view.
pub fn view_status_line(view: &ViewState) -> String {
    format!(
        "period ▲▼ {:.6} {}    amplitude ↑↓ {:.1}    offset ←→ {:.6}",
        view.period_seconds(),
        view.note_name(),
        view.amplitude_zoom(),
        view.offset_seconds()
    )
}

/// Bottom status line describing the source format.
pub fn format_status_line(format: &AudioFormat) -> String {
    format!(
        "format {}    channels {}    rate {}    bps {}    seconds {:.6}",
        format.encoding,
        format.channels,
        format.sample_rate,
        format.bits_per_sample,
        format.duration_seconds()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::raster::BACKGROUND_COLOR;
    use crate::source::SampleEncoding;

    #[test]
    fn test_frame_lines_sit_on_inner_border_edge() {
        let mut buffer = PixelBuffer::new(21, 21);
        draw_frame(&mut buffer, 3);

        // horizontal lines
        for x in 0..21 {
            assert_eq!(buffer.get(x, 2), Some(FRAME_COLOR));
            assert_eq!(buffer.get(x, 18), Some(FRAME_COLOR));
        }
        // vertical lines
        for y in 0..21 {
            assert_eq!(buffer.get(2, y), Some(FRAME_COLOR));
            assert_eq!(buffer.get(18, y), Some(FRAME_COLOR));
        }
        // center ticks in the margins only
        assert_eq!(buffer.get(0, 10), Some(FRAME_COLOR));
        assert_eq!(buffer.get(20, 10), Some(FRAME_COLOR));
        assert_eq!(buffer.get(10, 10), Some(BACKGROUND_COLOR));
        // plot interior untouched
        assert_eq!(buffer.get(3, 3), Some(BACKGROUND_COLOR));
        assert_eq!(buffer.get(17, 17), Some(BACKGROUND_COLOR));
    }

    #[test]
    fn test_frame_ignores_degenerate_border() {
        let mut buffer = PixelBuffer::new(5, 5);
        draw_frame(&mut buffer, 0);
        assert!(buffer.pixels().iter().all(|&p| p == BACKGROUND_COLOR));
    }

    #[test]
    fn test_view_status_line() {
        let view = ViewState::default().with_amplitude(2.5).with_offset(1.5, 10.0);
        assert_eq!(
            view_status_line(&view),
            "period ▲▼ 0.002273 A     amplitude ↑↓ 2.5    offset ←→ 1.500000"
        );
    }

    #[test]
    fn test_format_status_line() {
        let format = AudioFormat::new(2, 44_100, 16, 88_200, SampleEncoding::Pcm).unwrap();
        assert_eq!(
            format_status_line(&format),
            "format PCM    channels 2    rate 44100    bps 16    seconds 2.000000"
        );
    }
}
