//! Audio frame generators for property-based testing.
//!
//! Provides both strategy functions (for use with `#[strategy(...)]`) and
//! `Arbitrary`-deriving structs for common audio test inputs, plus a
//! deterministic sine generator for signal-level assertions.

use proptest::prelude::*;
use test_strategy::Arbitrary;

/// A supported processing sample rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum SampleRate {
    #[weight(1)]
    Hz8000,
    #[weight(1)]
    Hz16000,
    #[weight(1)]
    Hz32000,
    #[weight(1)]
    Hz48000,
}

impl SampleRate {
    pub fn hz(self) -> u32 {
        match self {
            Self::Hz8000 => 8000,
            Self::Hz16000 => 16000,
            Self::Hz32000 => 32000,
            Self::Hz48000 => 48000,
        }
    }

    /// Number of samples in a 10ms frame at this rate.
    pub fn frame_size(self) -> usize {
        (self.hz() / 100) as usize
    }
}

/// A channel count between mono and 4 channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum ChannelCount {
    #[weight(2)]
    Mono,
    #[weight(2)]
    Stereo,
    #[weight(1)]
    Quad,
}

impl ChannelCount {
    pub fn count(self) -> usize {
        match self {
            Self::Mono => 1,
            Self::Stereo => 2,
            Self::Quad => 4,
        }
    }
}

/// A planar f32 frame: one `Vec` per channel, each one 10 ms long.
#[derive(Debug, Clone, Arbitrary)]
pub struct PlanarFrameF32 {
    pub sample_rate: SampleRate,
    pub channel_count: ChannelCount,
    #[strategy(planar_frame_f32(#sample_rate.hz(), #channel_count.count()))]
    pub channels: Vec<Vec<f32>>,
}

/// An interleaved i16 frame with its format.
#[derive(Debug, Clone, Arbitrary)]
pub struct InterleavedFrameI16 {
    pub sample_rate: SampleRate,
    pub channel_count: ChannelCount,
    #[strategy(interleaved_frame_i16(#sample_rate.hz(), #channel_count.count()))]
    pub samples: Vec<i16>,
}

/// Generate a mono audio frame at a given sample rate (~10ms frame).
pub fn audio_frame_f32(sample_rate: u32) -> impl Strategy<Value = Vec<f32>> {
    let frame_size = (sample_rate / 100) as usize;
    proptest::collection::vec(-1.0f32..=1.0f32, frame_size..=frame_size)
}

/// Generate a planar multi-channel frame (~10ms per channel).
pub fn planar_frame_f32(sample_rate: u32, channels: usize) -> impl Strategy<Value = Vec<Vec<f32>>> {
    proptest::collection::vec(audio_frame_f32(sample_rate), channels..=channels)
}

/// Generate interleaved i16 audio (~10ms frame).
pub fn interleaved_frame_i16(sample_rate: u32, channels: usize) -> impl Strategy<Value = Vec<i16>> {
    let len = (sample_rate / 100) as usize * channels;
    proptest::collection::vec(i16::MIN..=i16::MAX, len..=len)
}

/// `len` samples of `amplitude · sin(2π · freq · n / rate)` starting at
/// sample index `start`.
///
/// Evaluated in f64, so sample `n` has the same value whatever `start` is.
pub fn sine(freq_hz: f32, sample_rate_hz: u32, amplitude: f32, start: usize, len: usize) -> Vec<f32> {
    let step = 2.0 * std::f64::consts::PI * f64::from(freq_hz) / f64::from(sample_rate_hz);
    (start..start + len)
        .map(|n| (f64::from(amplitude) * (step * n as f64).sin()) as f32)
        .collect()
}
