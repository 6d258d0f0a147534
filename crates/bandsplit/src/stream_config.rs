//! Stream formats: sample rate and channel count.

use crate::error::{Error, Result};

/// One of the sample rates the pipeline runs at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SampleRate {
    Hz8000,
    Hz16000,
    Hz32000,
    Hz48000,
}

impl SampleRate {
    pub const ALL: [SampleRate; 4] = [Self::Hz8000, Self::Hz16000, Self::Hz32000, Self::Hz48000];

    pub fn hz(self) -> u32 {
        match self {
            Self::Hz8000 => 8000,
            Self::Hz16000 => 16000,
            Self::Hz32000 => 32000,
            Self::Hz48000 => 48000,
        }
    }

    /// Samples per channel in a 10 ms frame.
    pub fn frames_per_10ms(self) -> usize {
        (self.hz() / 100) as usize
    }

    /// The rate whose 10 ms frame holds `num_frames` samples.
    pub fn from_frames_per_10ms(num_frames: usize) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|rate| rate.frames_per_10ms() == num_frames)
            .ok_or(Error::UnsupportedFrameLength(num_frames))
    }
}

impl TryFrom<u32> for SampleRate {
    type Error = Error;

    fn try_from(hz: u32) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|rate| rate.hz() == hz)
            .ok_or(Error::UnsupportedSampleRate(hz))
    }
}

/// Configuration describing an audio stream's properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConfig {
    sample_rate: SampleRate,
    num_channels: usize,
}

impl StreamConfig {
    /// Validate and build a stream format.
    pub fn new(sample_rate_hz: u32, num_channels: usize) -> Result<Self> {
        Self::from_rate(SampleRate::try_from(sample_rate_hz)?, num_channels)
    }

    pub fn from_rate(sample_rate: SampleRate, num_channels: usize) -> Result<Self> {
        if num_channels == 0 {
            return Err(Error::BadNumberChannels(num_channels));
        }
        Ok(Self {
            sample_rate,
            num_channels,
        })
    }

    #[inline]
    pub fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    #[inline]
    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate.hz()
    }

    #[inline]
    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    /// Samples per channel in a 10 ms frame.
    #[inline]
    pub fn num_frames(&self) -> usize {
        self.sample_rate.frames_per_10ms()
    }

    /// Total number of samples (channels × frames).
    #[inline]
    pub fn num_samples(&self) -> usize {
        self.num_channels * self.num_frames()
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            sample_rate: SampleRate::Hz48000,
            num_channels: 1,
        }
    }
}
