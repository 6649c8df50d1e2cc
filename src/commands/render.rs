//! Headless single-frame render to a PNG file.

use crate::display::save_png;
use crate::scope::{PlotGeometry, Session, ViewState};
use crate::source::PcmSource;
use anyhow::Context;
use std::path::Path;

/// Renders one view of `file` into `output`.
///
/// # Errors
/// - If the file cannot be opened or decoded
/// - If the render pass fails
/// - If the PNG cannot be written
pub fn handle_render(
    file: &Path,
    view: ViewState,
    geometry: &PlotGeometry,
    output: &Path,
) -> anyhow::Result<()> {
    let source =
        PcmSource::open(file).with_context(|| format!("Failed to open {}", file.display()))?;
    let mut session = Session::new(source, view);
    tracing::info!("Rendering {} at {}", file.display(), session.view());

    let image = session.render(geometry)?;
    save_png(&image, output)?;

    println!(
        "{} ({}x{})",
        output.display(),
        image.width(),
        image.height()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::overlay::FRAME_COLOR;
    use hound::{SampleFormat, WavSpec, WavWriter};

    fn write_sine(path: &Path) {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for i in 0..8000 {
            let t = i as f64 / 8000.0;
            let value = (2.0 * std::f64::consts::PI * 440.0 * t).sin() * 0.8;
            writer.write_sample((value * 32767.0) as i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_render_writes_png_with_geometry() {
        let dir = tempfile::tempdir().unwrap();
        let wav = dir.path().join("sine.wav");
        let png = dir.path().join("sine.png");
        write_sine(&wav);

        let geometry = PlotGeometry::square(101, 5).unwrap();
        handle_render(&wav, ViewState::default(), &geometry, &png).unwrap();

        let decoded = image::open(&png).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (101, 101));
        let [r, g, b] = decoded.get_pixel(4, 4).0;
        assert_eq!(
            (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b),
            FRAME_COLOR
        );
        // the white mono trace appears somewhere inside the plot
        assert!(decoded.pixels().any(|p| p.0 == [0xff, 0xff, 0xff]));
    }

    #[test]
    fn test_render_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let geometry = PlotGeometry::square(101, 5).unwrap();
        let result = handle_render(
            &dir.path().join("missing.wav"),
            ViewState::default(),
            &geometry,
            &dir.path().join("out.png"),
        );
        assert!(result.is_err());
        assert!(!dir.path().join("out.png").exists());
    }
}
