//! Recoverable errors.
//!
//! Stream-format problems are reported as [`Error`]. Misuse of the per-frame
//! contract (wrong block lengths, out-of-range channels) is a programming
//! error and panics instead.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Sample rate outside 8, 16, 32 and 48 kHz.
    #[error("unsupported sample rate: {0} Hz")]
    UnsupportedSampleRate(u32),

    /// Frame length that does not correspond to a supported rate.
    #[error("unsupported sample rate: {0} samples per 10 ms frame")]
    UnsupportedFrameLength(usize),

    #[error("bad number of channels: {0}")]
    BadNumberChannels(usize),

    /// More processing channels than the input provides.
    #[error("{processing} processing channels requested but the input has {input}")]
    TooManyProcessingChannels { processing: usize, input: usize },

    #[error("stream has {actual} channels, expected {expected}")]
    ChannelCountMismatch { expected: usize, actual: usize },

    /// Planar channels of one stream differ in length.
    #[error("channel {channel} holds {actual} samples, expected {expected}")]
    ChannelLengthMismatch {
        channel: usize,
        expected: usize,
        actual: usize,
    },
}
