//! Fixed-geometry windowed-sinc resampler.
//!
//! A [`SincResampler`] is bound to one block geometry: every call to
//! [`resample`](SincResampler::resample) consumes exactly `source_frames`
//! samples and writes exactly `destination_frames`. For the 10 ms frames used
//! here the two lengths are drawn from 80, 160, 320 and 480, so their ratio
//! reduces to a small fraction `phases / step` and every output sample lands
//! on one of `phases` fixed sub-sample positions. One Blackman-windowed sinc
//! kernel is precomputed per position, so no kernel interpolation is needed.
//!
//! The last `taps - 1` input samples are kept between calls. History starts
//! out as silence, which makes the output lag the input by
//! [`delay`](SincResampler::delay) destination samples from the first call.
//!
//! # Example
//!
//! ```
//! use bandsplit_common_audio::sinc_resampler::SincResampler;
//!
//! // 10 ms at 48 kHz → 10 ms at 16 kHz.
//! let mut resampler = SincResampler::new(480, 160);
//! let input = vec![0.0_f32; 480];
//! let mut output = vec![0.0_f32; 160];
//! resampler.resample(&input, &mut output);
//! assert_eq!(resampler.delay(), 16);
//! ```

use std::f64::consts::PI;

use derive_more::Debug;

/// Half the kernel length, in source samples, when not decimating.
const HALF_KERNEL: usize = 16;

/// Cutoff as a fraction of the lower of the two Nyquist rates.
const CUTOFF: f64 = 0.9;

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Blackman window over `[-half_width, half_width]`.
fn blackman(offset: f64, half_width: f64) -> f64 {
    let x = PI * offset / half_width;
    0.42 + 0.5 * x.cos() + 0.08 * (2.0 * x).cos()
}

/// Single-channel resampler with a fixed block geometry.
#[derive(Debug)]
pub struct SincResampler {
    source_frames: usize,
    destination_frames: usize,
    /// Output positions per `step` source samples.
    phases: usize,
    /// Source samples advanced per `phases` output samples.
    step: usize,
    taps: usize,

    /// `phases` kernels of `taps` coefficients each.
    #[debug(skip)]
    kernels: Vec<f32>,
    /// `taps - 1` samples of history followed by the current source block.
    #[debug(skip)]
    buffer: Vec<f32>,
}

impl SincResampler {
    /// Create a resampler turning `source_frames` input samples into
    /// `destination_frames` output samples per call.
    ///
    /// # Panics
    ///
    /// Panics if either length is zero.
    pub fn new(source_frames: usize, destination_frames: usize) -> Self {
        assert!(source_frames > 0, "source_frames must be > 0");
        assert!(destination_frames > 0, "destination_frames must be > 0");

        let divisor = gcd(source_frames, destination_frames);
        let phases = destination_frames / divisor;
        let step = source_frames / divisor;

        // Decimation widens the kernel so the cutoff can drop with the
        // output Nyquist rate while keeping the same number of zero crossings.
        let half_width = (HALF_KERNEL * step).div_ceil(phases).max(HALF_KERNEL);
        let taps = 2 * half_width;
        let cutoff = CUTOFF * (phases as f64 / step as f64).min(1.0);

        let mut kernels = vec![0.0_f32; phases * taps];
        for (phase, kernel) in kernels.chunks_exact_mut(taps).enumerate() {
            // Tap `i` sits this far before the interpolated position.
            let offset =
                |i: usize| phase as f64 / phases as f64 + (half_width - 1) as f64 - i as f64;
            let weights: Vec<f64> = (0..taps)
                .map(|i| {
                    let d = offset(i);
                    let x = PI * cutoff * d;
                    let sinc = if d == 0.0 { 1.0 } else { x.sin() / x };
                    sinc * blackman(d, half_width as f64)
                })
                .collect();
            // Unity gain at DC for every phase.
            let sum: f64 = weights.iter().sum();
            for (tap, w) in kernel.iter_mut().zip(&weights) {
                *tap = (w / sum) as f32;
            }
        }

        Self {
            source_frames,
            destination_frames,
            phases,
            step,
            taps,
            kernels,
            buffer: vec![0.0; taps - 1 + source_frames],
        }
    }

    /// Resample one block.
    ///
    /// # Panics
    ///
    /// Panics unless `source` holds `source_frames` samples and
    /// `destination` holds `destination_frames`.
    pub fn resample(&mut self, source: &[f32], destination: &mut [f32]) {
        assert_eq!(source.len(), self.source_frames, "source block length");
        assert_eq!(
            destination.len(),
            self.destination_frames,
            "destination block length"
        );

        let history = self.taps - 1;
        self.buffer[history..].copy_from_slice(source);

        for (j, out) in destination.iter_mut().enumerate() {
            let position = j * self.step;
            let start = position / self.phases;
            let phase = position % self.phases;
            let kernel = &self.kernels[phase * self.taps..(phase + 1) * self.taps];
            *out = self.buffer[start..start + self.taps]
                .iter()
                .zip(kernel)
                .map(|(x, h)| x * h)
                .sum();
        }

        self.buffer.copy_within(self.source_frames.., 0);
    }

    pub fn source_frames(&self) -> usize {
        self.source_frames
    }

    pub fn destination_frames(&self) -> usize {
        self.destination_frames
    }

    /// Latency in destination samples, rounded down.
    pub fn delay(&self) -> usize {
        self.taps / 2 * self.phases / self.step
    }
}
