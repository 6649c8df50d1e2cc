//! Audio sources for the oscilloscope.
//!
//! A source is loaded once, validated, and then only read. Every render pass
//! shares it across rayon workers, so implementations must be `Sync`.

pub mod error;
pub mod pcm;
pub mod wav;

pub use error::SourceError;
pub use pcm::PcmSource;

use std::fmt;

/// How samples were stored in the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleEncoding {
    /// Signed (or offset 8-bit) integer PCM
    Pcm,
    /// 32-bit IEEE floating point
    IeeeFloat,
}

impl fmt::Display for SampleEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pcm => write!(f, "PCM"),
            Self::IeeeFloat => write!(f, "IEEE float"),
        }
    }
}

/// Format metadata of a loaded source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    pub channels: u16,
    /// Samples per second, per channel
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    /// Number of sample frames (one value per channel each)
    pub sample_count: u64,
    pub encoding: SampleEncoding,
}

impl AudioFormat {
    /// Builds a validated format description.
    ///
    /// # Errors
    /// - If the sample rate is zero
    /// - If there are no channels
    pub fn new(
        channels: u16,
        sample_rate: u32,
        bits_per_sample: u16,
        sample_count: u64,
        encoding: SampleEncoding,
    ) -> Result<Self, SourceError> {
        if sample_rate == 0 {
            return Err(SourceError::InvalidFormat(
                "sample rate must be greater than zero".to_string(),
            ));
        }
        if channels == 0 {
            return Err(SourceError::InvalidFormat(
                "at least one channel is required".to_string(),
            ));
        }

        Ok(Self {
            channels,
            sample_rate,
            bits_per_sample,
            sample_count,
            encoding,
        })
    }

    /// Total length of the source in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.sample_count as f64 / self.sample_rate as f64
    }
}

/// Read-only access to normalized sample values.
pub trait AudioSource: Sync {
    fn format(&self) -> &AudioFormat;

    /// Returns the value of `channel` at sample frame `index`, normalized to `[-1, 1]`.
    ///
    /// # Errors
    /// - If `index` is past the last sample frame
    /// - If `channel` is not below the channel count
    fn sample_value(&self, index: u64, channel: u16) -> Result<f64, SourceError>;

    fn duration_seconds(&self) -> f64 {
        self.format().duration_seconds()
    }
}
