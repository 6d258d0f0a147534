//! Channel-major, band-split sample storage.
//!
//! All samples live in one contiguous allocation:
//!
//! ```text
//! [ ch0: band0 | band1 | band2 ][ ch1: band0 | band1 | band2 ] ...
//! ```
//!
//! A channel's bands are therefore adjacent, so [`ChannelBuffer::bands`]
//! returns the whole channel as one slice and
//! [`ChannelBuffer::split_bands`] walks it band by band.

use std::slice::{ChunksExact, ChunksExactMut};

use derive_more::Debug;

/// Multi-channel, optionally multi-band sample buffer.
///
/// The allocated channel count is fixed at construction. The visible channel
/// count can be narrowed with [`set_num_channels`](Self::set_num_channels)
/// without touching the allocation.
#[derive(Debug)]
pub struct ChannelBuffer<T> {
    #[debug(skip)]
    data: Vec<T>,
    num_frames: usize,
    num_frames_per_band: usize,
    num_allocated_channels: usize,
    num_channels: usize,
    num_bands: usize,
}

impl<T: Copy + Default> ChannelBuffer<T> {
    /// Create a zero-initialized buffer.
    ///
    /// `num_frames` counts samples per channel across all bands and must be
    /// divisible by `num_bands`.
    pub fn new(num_frames: usize, num_channels: usize, num_bands: usize) -> Self {
        assert!(num_frames > 0, "num_frames must be > 0");
        assert!(num_bands > 0, "num_bands must be > 0");
        assert!(num_channels > 0, "num_channels must be > 0");
        assert!(
            num_frames.is_multiple_of(num_bands),
            "num_frames ({num_frames}) must be divisible by num_bands ({num_bands})"
        );
        Self {
            data: vec![T::default(); num_frames * num_channels],
            num_frames,
            num_frames_per_band: num_frames / num_bands,
            num_allocated_channels: num_channels,
            num_channels,
            num_bands,
        }
    }

    /// Copy all bands of channel `from` over channel `to`.
    pub fn copy_channel(&mut self, from: usize, to: usize) {
        assert!(from < self.num_allocated_channels && to < self.num_allocated_channels);
        if from != to {
            let start = from * self.num_frames;
            self.data
                .copy_within(start..start + self.num_frames, to * self.num_frames);
        }
    }
}

impl<T> ChannelBuffer<T> {
    /// Samples per channel, all bands included.
    #[inline]
    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    #[inline]
    pub fn num_frames_per_band(&self) -> usize {
        self.num_frames_per_band
    }

    /// Visible channel count.
    #[inline]
    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    /// Channel count fixed at construction.
    #[inline]
    pub fn num_allocated_channels(&self) -> usize {
        self.num_allocated_channels
    }

    #[inline]
    pub fn num_bands(&self) -> usize {
        self.num_bands
    }

    /// Narrow or widen the visible channel count.
    ///
    /// # Panics
    ///
    /// Panics if `num_channels` exceeds the allocated count.
    pub fn set_num_channels(&mut self, num_channels: usize) {
        assert!(
            num_channels <= self.num_allocated_channels,
            "num_channels ({num_channels}) exceeds allocated ({0})",
            self.num_allocated_channels
        );
        self.num_channels = num_channels;
    }

    #[inline]
    fn offset(&self, channel: usize, band: usize) -> usize {
        channel * self.num_frames + band * self.num_frames_per_band
    }

    /// One band of one channel.
    #[inline]
    pub fn channel(&self, band: usize, channel: usize) -> &[T] {
        assert!(band < self.num_bands, "band {band} out of range");
        assert!(channel < self.num_allocated_channels, "channel {channel} out of range");
        let start = self.offset(channel, band);
        &self.data[start..start + self.num_frames_per_band]
    }

    #[inline]
    pub fn channel_mut(&mut self, band: usize, channel: usize) -> &mut [T] {
        assert!(band < self.num_bands, "band {band} out of range");
        assert!(channel < self.num_allocated_channels, "channel {channel} out of range");
        let start = self.offset(channel, band);
        &mut self.data[start..start + self.num_frames_per_band]
    }

    /// All bands of one channel as a single `num_frames` slice.
    #[inline]
    pub fn bands(&self, channel: usize) -> &[T] {
        assert!(channel < self.num_allocated_channels, "channel {channel} out of range");
        let start = channel * self.num_frames;
        &self.data[start..start + self.num_frames]
    }

    #[inline]
    pub fn bands_mut(&mut self, channel: usize) -> &mut [T] {
        assert!(channel < self.num_allocated_channels, "channel {channel} out of range");
        let start = channel * self.num_frames;
        &mut self.data[start..start + self.num_frames]
    }

    /// Iterate one channel's bands, lowest first.
    #[inline]
    pub fn split_bands(&self, channel: usize) -> ChunksExact<'_, T> {
        let per_band = self.num_frames_per_band;
        self.bands(channel).chunks_exact(per_band)
    }

    #[inline]
    pub fn split_bands_mut(&mut self, channel: usize) -> ChunksExactMut<'_, T> {
        let per_band = self.num_frames_per_band;
        self.bands_mut(channel).chunks_exact_mut(per_band)
    }

    /// The whole allocation, visible or not.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }
}
