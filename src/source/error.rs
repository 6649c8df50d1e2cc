//! Audio source error types

use thiserror::Error;

/// Errors raised while loading or reading an audio source
#[derive(Error, Debug)]
pub enum SourceError {
    /// The file could not be opened or read
    #[error("Failed to read audio file: {0}")]
    Io(#[from] std::io::Error),

    /// The WAV container is malformed
    #[error("Failed to parse WAV file: {0}")]
    Wav(#[from] hound::Error),

    /// Format metadata is unusable (zero sample rate, no channels, ...)
    #[error("Invalid audio format: {0}")]
    InvalidFormat(String),

    /// Sample layout the decoder does not handle
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// Sample frame index past the end of the source
    #[error("Sample index {index} out of range (source has {count} samples)")]
    SampleOutOfRange { index: u64, count: u64 },

    /// Channel index past the last channel
    #[error("Channel {channel} out of range (source has {count} channels)")]
    ChannelOutOfRange { channel: u16, count: u16 },
}
