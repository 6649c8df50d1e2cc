//! WAV decoding into a [`PcmSource`].
//!
//! Only uncompressed integer PCM (8 to 32 bits) and 32-bit float files are
//! accepted. Integer samples are scaled by `2^(bits-1)` so every value lands in
//! `[-1, 1]` regardless of bit depth.

use super::{AudioFormat, AudioSource, PcmSource, SampleEncoding, SourceError};
use hound::{SampleFormat, WavReader};
use std::io::Read;
use std::path::Path;

impl PcmSource {
    /// Opens and fully decodes a WAV file.
    ///
    /// # Errors
    /// - If the file cannot be opened or is not a valid WAV container
    /// - If the sample layout is unsupported
    /// - If the header describes a zero sample rate or no channels
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let reader = WavReader::open(path)?;
        let source = Self::from_wav_reader(reader)?;
        let format = source.format();
        tracing::info!(
            "Loaded {}: {} channels, {} Hz, {} bits, {:.3}s",
            path.display(),
            format.channels,
            format.sample_rate,
            format.bits_per_sample,
            format.duration_seconds()
        );
        Ok(source)
    }

    /// Decodes every sample from an open hound reader.
    ///
    /// # Errors
    /// - If a sample cannot be decoded
    /// - If the sample layout is unsupported
    /// - If the header is invalid
    pub fn from_wav_reader<R: Read>(mut reader: WavReader<R>) -> Result<Self, SourceError> {
        let spec = reader.spec();

        let (encoding, samples) = match spec.sample_format {
            SampleFormat::Int => {
                if !(8..=32).contains(&spec.bits_per_sample) {
                    return Err(SourceError::UnsupportedFormat(format!(
                        "{}-bit integer PCM",
                        spec.bits_per_sample
                    )));
                }
                let scale = (1u64 << (spec.bits_per_sample - 1)) as f64;
                let samples = reader
                    .samples::<i32>()
                    .map(|sample| sample.map(|value| (value as f64 / scale) as f32))
                    .collect::<Result<Vec<f32>, hound::Error>>()?;
                (SampleEncoding::Pcm, samples)
            }
            SampleFormat::Float => {
                if spec.bits_per_sample != 32 {
                    return Err(SourceError::UnsupportedFormat(format!(
                        "{}-bit float",
                        spec.bits_per_sample
                    )));
                }
                let samples = reader
                    .samples::<f32>()
                    .collect::<Result<Vec<f32>, hound::Error>>()?;
                (SampleEncoding::IeeeFloat, samples)
            }
        };

        // hound rejects data chunks that end in a partial frame
        let frames = samples.len() / spec.channels.max(1) as usize;

        let format = AudioFormat::new(
            spec.channels,
            spec.sample_rate,
            spec.bits_per_sample,
            frames as u64,
            encoding,
        )?;

        Self::from_interleaved(format, samples)
    }
}
