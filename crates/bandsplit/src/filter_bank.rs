//! Orthogonal lapped filter banks.
//!
//! An `M`-band bank splits an `M × 160`-sample fullband frame into `M`
//! sub-bands of 160 samples (band `k` covers `[8k, 8(k + 1))` kHz) and merges
//! them back. Each band is one FIR filter of length `L` followed by
//! decimation by `M`:
//!
//! ```text
//! band_k[b] = Σ_i h_k[i] · x[M·b + i - (L - M)]
//! ```
//!
//! Synthesis is the transpose: every band sample scatters its filter back
//! into an overlap-add accumulator. The filter tables in
//! [`filter_coefficients`](crate::filter_coefficients) are orthonormal under
//! shifts by `M`, so the merged output equals the input delayed by `L - M`
//! samples.
//!
//! Split bands are stored band-major in one slice:
//!
//! ```text
//! [ band0: 160 | band1: 160 | ... ]
//! ```

use crate::filter_coefficients::{THREE_BAND_FILTERS, TWO_BAND_LOWPASS};

/// Samples per band and frame.
pub(crate) const SPLIT_BAND_SIZE: usize = 160;

/// Filters of one bank, shared by every channel.
///
/// Analysis filters are scaled by `1/√M` and synthesis filters by `√M`, so
/// a tone in band 0 keeps its amplitude.
pub(crate) struct FilterBank {
    num_bands: usize,
    filter_length: usize,
    analysis: Vec<f32>,
    synthesis: Vec<f32>,
}

/// Per-channel analysis history and synthesis overlap.
pub(crate) struct FilterBankState {
    analysis_history: Vec<f32>,
    synthesis_overlap: Vec<f32>,
    scratch: Vec<f32>,
}

impl FilterBank {
    /// 32 kHz → 2 × 160 samples.
    pub(crate) fn two_band() -> Self {
        let length = TWO_BAND_LOWPASS.len();
        let highpass = TWO_BAND_LOWPASS
            .iter()
            .rev()
            .enumerate()
            .map(|(n, &tap)| if n % 2 == 0 { tap } else { -tap });
        let filters = TWO_BAND_LOWPASS.iter().copied().chain(highpass).collect();
        Self::from_filters(2, length, filters)
    }

    /// 48 kHz → 3 × 160 samples.
    pub(crate) fn three_band() -> Self {
        let filters = THREE_BAND_FILTERS.iter().flatten().copied().collect();
        Self::from_filters(3, THREE_BAND_FILTERS[0].len(), filters)
    }

    fn from_filters(num_bands: usize, filter_length: usize, filters: Vec<f32>) -> Self {
        debug_assert_eq!(filters.len(), num_bands * filter_length);
        let gain = (num_bands as f32).sqrt();
        Self {
            num_bands,
            filter_length,
            analysis: filters.iter().map(|h| h / gain).collect(),
            synthesis: filters.iter().map(|h| h * gain).collect(),
        }
    }

    pub(crate) fn num_bands(&self) -> usize {
        self.num_bands
    }

    pub(crate) fn full_band_size(&self) -> usize {
        self.num_bands * SPLIT_BAND_SIZE
    }

    fn memory_size(&self) -> usize {
        self.filter_length - self.num_bands
    }

    /// Analysis-to-synthesis latency in fullband samples.
    pub(crate) fn delay(&self) -> usize {
        self.memory_size()
    }

    /// Silent history for one channel.
    pub(crate) fn new_state(&self) -> FilterBankState {
        FilterBankState {
            analysis_history: vec![0.0; self.memory_size()],
            synthesis_overlap: vec![0.0; self.memory_size()],
            scratch: vec![0.0; self.full_band_size() + self.memory_size()],
        }
    }

    fn filters<'a>(&self, scaled: &'a [f32]) -> std::slice::ChunksExact<'a, f32> {
        scaled.chunks_exact(self.filter_length)
    }

    /// Splits one fullband frame into band-major sub-bands.
    pub(crate) fn analysis(&self, state: &mut FilterBankState, input: &[f32], bands: &mut [f32]) {
        let full = self.full_band_size();
        assert_eq!(input.len(), full, "fullband frame length");
        assert_eq!(bands.len(), full, "split band storage length");

        let memory = self.memory_size();
        let extended = &mut state.scratch;
        extended[..memory].copy_from_slice(&state.analysis_history);
        extended[memory..].copy_from_slice(input);

        for (filter, band) in self
            .filters(&self.analysis)
            .zip(bands.chunks_exact_mut(SPLIT_BAND_SIZE))
        {
            for (b, out) in band.iter_mut().enumerate() {
                let start = self.num_bands * b;
                let segment = &extended[start..start + self.filter_length];
                *out = segment.iter().zip(filter).map(|(x, h)| x * h).sum();
            }
        }

        state
            .analysis_history
            .copy_from_slice(&extended[full..]);
    }

    /// Merges band-major sub-bands into one fullband frame.
    pub(crate) fn synthesis(&self, state: &mut FilterBankState, bands: &[f32], output: &mut [f32]) {
        let full = self.full_band_size();
        assert_eq!(bands.len(), full, "split band storage length");
        assert_eq!(output.len(), full, "fullband frame length");

        let memory = self.memory_size();
        let accumulator = &mut state.scratch;
        accumulator[..memory].copy_from_slice(&state.synthesis_overlap);
        accumulator[memory..].fill(0.0);

        for (filter, band) in self
            .filters(&self.synthesis)
            .zip(bands.chunks_exact(SPLIT_BAND_SIZE))
        {
            for (b, &coefficient) in band.iter().enumerate() {
                let start = self.num_bands * b;
                let segment = &mut accumulator[start..start + self.filter_length];
                for (acc, h) in segment.iter_mut().zip(filter) {
                    *acc += h * coefficient;
                }
            }
        }

        output.copy_from_slice(&accumulator[..full]);
        state
            .synthesis_overlap
            .copy_from_slice(&accumulator[full..]);
    }
}
