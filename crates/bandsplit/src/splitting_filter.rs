//! Band-splitting filter for 2-band (32 kHz) and 3-band (48 kHz) operation.
//!
//! Wraps one [`FilterBank`] with a history record per channel, so every
//! channel filters one continuous signal across frames. Analysis followed by
//! synthesis returns the input delayed by [`SplittingFilter::delay`] samples.

use bandsplit_common_audio::channel_buffer::ChannelBuffer;

use crate::filter_bank::{FilterBank, FilterBankState, SPLIT_BAND_SIZE};

/// Band-splitting filter supporting 2-band and 3-band operation.
///
/// For each block, call [`analysis`](Self::analysis) to split into bands,
/// then [`synthesis`](Self::synthesis) to merge them back.
pub(crate) struct SplittingFilter {
    bank: FilterBank,
    states: Vec<FilterBankState>,
}

impl SplittingFilter {
    /// Create a new splitting filter.
    ///
    /// - `num_channels`: number of audio channels
    /// - `num_bands`: 2 (for 32 kHz) or 3 (for 48 kHz)
    pub(crate) fn new(num_channels: usize, num_bands: usize) -> Self {
        let bank = match num_bands {
            2 => FilterBank::two_band(),
            3 => FilterBank::three_band(),
            _ => panic!("num_bands must be 2 or 3, got {num_bands}"),
        };
        let states = (0..num_channels).map(|_| bank.new_state()).collect();
        Self { bank, states }
    }

    /// Fullband samples between an input sample and its reconstruction.
    pub(crate) fn delay(&self) -> usize {
        self.bank.delay()
    }

    /// Split fullband data into sub-bands.
    pub(crate) fn analysis(&mut self, data: &ChannelBuffer<f32>, bands: &mut ChannelBuffer<f32>) {
        self.check_geometry(data, bands);
        for (i, state) in self.states.iter_mut().take(data.num_channels()).enumerate() {
            self.bank.analysis(state, data.bands(i), bands.bands_mut(i));
        }
    }

    /// Merge sub-bands back into fullband data.
    pub(crate) fn synthesis(&mut self, bands: &ChannelBuffer<f32>, data: &mut ChannelBuffer<f32>) {
        self.check_geometry(data, bands);
        for (i, state) in self.states.iter_mut().take(data.num_channels()).enumerate() {
            self.bank.synthesis(state, bands.bands(i), data.bands_mut(i));
        }
    }

    fn check_geometry(&self, data: &ChannelBuffer<f32>, bands: &ChannelBuffer<f32>) {
        assert_eq!(self.bank.num_bands(), bands.num_bands(), "band count");
        debug_assert!(data.num_channels() <= self.states.len());
        debug_assert!(data.num_channels() <= bands.num_channels());
        debug_assert_eq!(data.num_frames(), self.bank.full_band_size());
        debug_assert_eq!(bands.num_frames_per_band(), SPLIT_BAND_SIZE);
    }
}
