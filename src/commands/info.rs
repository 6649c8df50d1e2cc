//! Prints the format of an audio file.

use crate::scope::format_status_line;
use crate::source::{AudioSource, PcmSource};
use anyhow::Context;
use std::path::Path;

/// Prints the format status line of `file`.
///
/// # Errors
/// - If the file cannot be opened or decoded
pub fn handle_info(file: &Path) -> anyhow::Result<()> {
    println!("{}", describe(file)?);
    Ok(())
}

fn describe(file: &Path) -> anyhow::Result<String> {
    let source =
        PcmSource::open(file).with_context(|| format!("Failed to open {}", file.display()))?;
    Ok(format_status_line(source.format()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{SampleFormat, WavSpec, WavWriter};

    #[test]
    fn test_describe_stereo_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        let spec = WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for _ in 0..44100 * 2 {
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();

        assert_eq!(
            describe(&path).unwrap(),
            "format PCM    channels 2    rate 44100    bps 16    seconds 1.000000"
        );
    }

    #[test]
    fn test_describe_rejects_non_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "not audio").unwrap();

        let error = describe(&path).unwrap_err();
        assert!(format!("{error:#}").contains("Failed to open"));
    }
}
