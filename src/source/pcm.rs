//! In-memory, normalized sample storage.

use super::{AudioFormat, AudioSource, SourceError};

/// An immutable audio source holding interleaved samples normalized to `[-1, 1]`.
#[derive(Debug, Clone)]
pub struct PcmSource {
    format: AudioFormat,
    /// Interleaved: frame `i`, channel `c` lives at `i * channels + c`
    samples: Vec<f32>,
}

impl PcmSource {
    /// Wraps already interleaved samples.
    ///
    /// # Errors
    /// - If the sample count does not match `format.sample_count * format.channels`
    pub fn from_interleaved(format: AudioFormat, samples: Vec<f32>) -> Result<Self, SourceError> {
        let expected = format.sample_count * format.channels as u64;
        if samples.len() as u64 != expected {
            return Err(SourceError::InvalidFormat(format!(
                "expected {expected} interleaved samples, got {}",
                samples.len()
            )));
        }

        Ok(Self { format, samples })
    }

    /// Builds a 32-bit float source from one sample vector per channel.
    ///
    /// # Errors
    /// - If `sample_rate` is zero or `channels` is empty
    /// - If the channels differ in length
    #[cfg(test)]
    pub fn from_channels(sample_rate: u32, channels: Vec<Vec<f32>>) -> Result<Self, SourceError> {
        let frames = channels.first().map_or(0, Vec::len);
        if channels.iter().any(|channel| channel.len() != frames) {
            return Err(SourceError::InvalidFormat(
                "all channels must have the same length".to_string(),
            ));
        }
        let channel_count = u16::try_from(channels.len()).map_err(|_| {
            SourceError::InvalidFormat(format!("too many channels: {}", channels.len()))
        })?;

        let format = AudioFormat::new(
            channel_count,
            sample_rate,
            32,
            frames as u64,
            super::SampleEncoding::IeeeFloat,
        )?;

        let mut samples = Vec::with_capacity(frames * channels.len());
        for frame in 0..frames {
            samples.extend(channels.iter().map(|channel| channel[frame]));
        }

        Ok(Self { format, samples })
    }
}

impl AudioSource for PcmSource {
    fn format(&self) -> &AudioFormat {
        &self.format
    }

    fn sample_value(&self, index: u64, channel: u16) -> Result<f64, SourceError> {
        if index >= self.format.sample_count {
            return Err(SourceError::SampleOutOfRange {
                index,
                count: self.format.sample_count,
            });
        }
        if channel >= self.format.channels {
            return Err(SourceError::ChannelOutOfRange {
                channel,
                count: self.format.channels,
            });
        }

        let offset = index as usize * self.format.channels as usize + channel as usize;
        Ok(f64::from(self.samples[offset]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SampleEncoding;
    use approx::assert_relative_eq;

    fn stereo() -> PcmSource {
        PcmSource::from_channels(4, vec![vec![0.0, 0.25, 0.5], vec![-0.1, -0.2, -0.3]]).unwrap()
    }

    #[test]
    fn test_from_channels_interleaves() {
        let source = stereo();
        assert_eq!(source.format().sample_count, 3);
        assert_eq!(source.format().channels, 2);
        assert_eq!(source.format().sample_rate, 4);
        assert_relative_eq!(source.duration_seconds(), 0.75);
        assert_relative_eq!(source.sample_value(1, 0).unwrap(), 0.25);
        assert_relative_eq!(source.sample_value(2, 1).unwrap(), -0.3, epsilon = 1e-6);
    }

    #[test]
    fn test_sample_value_out_of_range() {
        let source = stereo();
        assert!(matches!(
            source.sample_value(3, 0),
            Err(SourceError::SampleOutOfRange { index: 3, count: 3 })
        ));
        assert!(matches!(
            source.sample_value(0, 2),
            Err(SourceError::ChannelOutOfRange { channel: 2, count: 2 })
        ));
    }

    #[test]
    fn test_from_channels_rejects_ragged_channels() {
        let result = PcmSource::from_channels(8_000, vec![vec![0.0; 4], vec![0.0; 3]]);
        assert!(matches!(result, Err(SourceError::InvalidFormat(_))));
    }

    #[test]
    fn test_from_channels_rejects_zero_rate() {
        let result = PcmSource::from_channels(0, vec![vec![0.0; 4]]);
        assert!(matches!(result, Err(SourceError::InvalidFormat(_))));
    }

    #[test]
    fn test_from_interleaved_checks_length() {
        let format = AudioFormat::new(2, 8_000, 16, 2, SampleEncoding::Pcm).unwrap();
        assert!(PcmSource::from_interleaved(format, vec![0.0; 3]).is_err());
        assert!(PcmSource::from_interleaved(format, vec![0.0; 4]).is_ok());
    }
}
