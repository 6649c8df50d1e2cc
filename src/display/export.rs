//! PNG export of rendered frames.

use crate::scope::PixelBuffer;
use anyhow::Context;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Highest snapshot index tried before giving up.
const MAX_IMAGE_INDEX: u32 = 1_000_000;

/// Encodes a pixel buffer as PNG bytes.
///
/// # Errors
/// - If PNG encoding fails
pub fn encode_png(buffer: &PixelBuffer) -> anyhow::Result<Vec<u8>> {
    let mut png_bytes = Vec::new();
    buffer
        .to_rgb_image()
        .write_to(&mut Cursor::new(&mut png_bytes), image::ImageFormat::Png)
        .context("Failed to encode frame as PNG")?;
    Ok(png_bytes)
}

/// Writes a PNG file.
///
/// # Errors
/// - If encoding or writing fails
pub fn save_png(buffer: &PixelBuffer, path: &Path) -> anyhow::Result<()> {
    let png_bytes = encode_png(buffer)?;
    fs::write(path, png_bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!("Frame written to {}", path.display());
    Ok(())
}

/// Saves `buffer` as the first unused `osc-N.png` inside `dir`, creating `dir` if needed.
///
/// # Errors
/// - If the folder cannot be created or the file cannot be written
/// - If every index is already taken
pub fn save_next_png(dir: &Path, buffer: &PixelBuffer) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let path = (0..MAX_IMAGE_INDEX)
        .map(|i| dir.join(format!("osc-{i}.png")))
        .find(|candidate| !candidate.exists())
        .ok_or_else(|| anyhow::anyhow!("No free image name left in {}", dir.display()))?;

    save_png(buffer, &path)?;
    Ok(path)
}

/// Deletes the PNG files in `dir`, then the folder itself if it ended up empty.
///
/// A missing folder is not an error.
///
/// # Errors
/// - If the folder exists but cannot be read
pub fn clear_image_folder(dir: &Path) -> anyhow::Result<()> {
    if !dir.exists() {
        return Ok(());
    }

    let mut removed = 0usize;
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("png")) {
            match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) => tracing::warn!("Failed to delete {}: {}", path.display(), e),
            }
        }
    }

    if let Err(e) = fs::remove_dir(dir) {
        tracing::debug!("Keeping {}: {}", dir.display(), e);
    }
    tracing::info!("Removed {} images from {}", removed, dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    fn frame() -> PixelBuffer {
        let mut buffer = PixelBuffer::new(5, 5);
        buffer.set(2, 2, 0xff0000);
        buffer
    }

    #[test]
    fn test_encode_png_round_trips_pixels() {
        let bytes = encode_png(&frame()).unwrap();
        assert_eq!(&bytes[..8], &PNG_SIGNATURE);

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (5, 5));
        assert_eq!(decoded.get_pixel(2, 2).0, [0xff, 0, 0]);
    }

    #[test]
    fn test_save_next_png_picks_free_index() {
        let dir = tempfile::tempdir().unwrap();
        let images = dir.path().join("osc_images");

        let first = save_next_png(&images, &frame()).unwrap();
        let second = save_next_png(&images, &frame()).unwrap();
        assert_eq!(first, images.join("osc-0.png"));
        assert_eq!(second, images.join("osc-1.png"));

        fs::remove_file(&first).unwrap();
        assert_eq!(save_next_png(&images, &frame()).unwrap(), first);
    }

    #[test]
    fn test_clear_image_folder_removes_pngs_and_folder() {
        let dir = tempfile::tempdir().unwrap();
        let images = dir.path().join("osc_images");
        save_next_png(&images, &frame()).unwrap();
        save_next_png(&images, &frame()).unwrap();

        clear_image_folder(&images).unwrap();
        assert!(!images.exists());

        // missing folder is fine
        clear_image_folder(&images).unwrap();
    }

    #[test]
    fn test_clear_image_folder_keeps_other_files() {
        let dir = tempfile::tempdir().unwrap();
        let images = dir.path().join("osc_images");
        save_next_png(&images, &frame()).unwrap();
        fs::write(images.join("notes.txt"), "keep").unwrap();

        clear_image_folder(&images).unwrap();
        assert!(images.join("notes.txt").exists());
        assert!(!images.join("osc-0.png").exists());
    }
}
