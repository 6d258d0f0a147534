//! Sample format conversions and channel helpers.
//!
//! # Format conventions
//!
//! | Name      | Type    | Range                          |
//! |-----------|---------|--------------------------------|
//! | S16       | `i16`   | \[-32768, 32767\]              |
//! | Float     | `f32`   | \[-1.0, 1.0\]                  |
//! | FloatS16  | `f32`   | \[-32768.0, 32768.0\]          |
//!
//! Processing buffers hold FloatS16. Float enters and leaves through
//! [`float_to_float_s16`] and [`float_s16_to_float`]; the scale is a power of
//! two, so the pair is exact for in-range samples.

const FLOAT_S16_SCALE: f32 = 32768.0;
const S16_TO_FLOAT_SCALING: f32 = 1.0 / FLOAT_S16_SCALE;

// ── Scalar conversions ──────────────────────────────────────────────

/// Convert a single FloatS16 sample to S16, rounding to nearest and
/// saturating at the i16 range.
#[inline]
pub fn float_s16_to_s16(v: f32) -> i16 {
    let v = v.clamp(-32768.0, 32767.0);
    (v + f32::copysign(0.5, v)) as i16
}

/// Convert a single Float \[-1.0, 1.0\] to FloatS16, clamping first.
#[inline]
pub fn float_to_float_s16(v: f32) -> f32 {
    v.clamp(-1.0, 1.0) * FLOAT_S16_SCALE
}

/// Convert a single FloatS16 to Float \[-1.0, 1.0\].
#[inline]
pub fn float_s16_to_float(v: f32) -> f32 {
    v.clamp(-FLOAT_S16_SCALE, FLOAT_S16_SCALE) * S16_TO_FLOAT_SCALING
}

// ── Slice conversions ───────────────────────────────────────────────

/// Convert a slice of Float to FloatS16.
///
/// # Panics
///
/// Panics if `src` and `dest` have different lengths.
pub fn float_to_float_s16_slice(src: &[f32], dest: &mut [f32]) {
    assert_eq!(src.len(), dest.len(), "slice length mismatch");
    for (d, &s) in dest.iter_mut().zip(src) {
        *d = float_to_float_s16(s);
    }
}

/// Convert a slice of Float to FloatS16 in place.
pub fn float_to_float_s16_slice_inplace(data: &mut [f32]) {
    for s in data.iter_mut() {
        *s = float_to_float_s16(*s);
    }
}

/// Convert a slice of FloatS16 to Float.
///
/// # Panics
///
/// Panics if `src` and `dest` have different lengths.
pub fn float_s16_to_float_slice(src: &[f32], dest: &mut [f32]) {
    assert_eq!(src.len(), dest.len(), "slice length mismatch");
    for (d, &s) in dest.iter_mut().zip(src) {
        *d = float_s16_to_float(s);
    }
}

/// Convert a slice of FloatS16 to S16 with rounding and saturation.
///
/// # Panics
///
/// Panics if `src` and `dest` have different lengths.
pub fn float_s16_to_s16_slice(src: &[f32], dest: &mut [i16]) {
    assert_eq!(src.len(), dest.len(), "slice length mismatch");
    for (d, &s) in dest.iter_mut().zip(src) {
        *d = float_s16_to_s16(s);
    }
}

/// Widen a slice of S16 to FloatS16.
///
/// # Panics
///
/// Panics if `src` and `dest` have different lengths.
pub fn s16_to_float_s16_slice(src: &[i16], dest: &mut [f32]) {
    assert_eq!(src.len(), dest.len(), "slice length mismatch");
    for (d, &s) in dest.iter_mut().zip(src) {
        *d = f32::from(s);
    }
}

// ── Planar channels ─────────────────────────────────────────────────

/// Average planar channels into `mono`.
///
/// Every channel must be at least `mono.len()` samples long.
pub fn downmix_to_mono<S: AsRef<[f32]>>(channels: &[S], mono: &mut [f32]) {
    assert!(!channels.is_empty(), "no channels to downmix");
    let (first, rest) = channels.split_at(1);
    mono.copy_from_slice(&first[0].as_ref()[..mono.len()]);
    for channel in rest {
        for (m, &s) in mono.iter_mut().zip(channel.as_ref()) {
            *m += s;
        }
    }
    let scale = 1.0 / channels.len() as f32;
    for m in mono.iter_mut() {
        *m *= scale;
    }
}

// ── Interleaved S16 ─────────────────────────────────────────────────

/// Extract one channel of interleaved S16 audio as FloatS16.
///
/// `dest.len()` frames are read; `interleaved` must hold at least that many.
pub fn deinterleave_channel_s16(
    interleaved: &[i16],
    num_channels: usize,
    channel: usize,
    dest: &mut [f32],
) {
    assert!(channel < num_channels, "channel {channel} out of range");
    assert!(
        interleaved.len() >= dest.len() * num_channels,
        "interleaved length mismatch"
    );
    for (d, frame) in dest.iter_mut().zip(interleaved.chunks_exact(num_channels)) {
        *d = f32::from(frame[channel]);
    }
}

/// Average interleaved S16 audio into a FloatS16 mono signal.
///
/// Uses an `i32` accumulator so the sum never overflows.
pub fn downmix_interleaved_s16(interleaved: &[i16], num_channels: usize, mono: &mut [f32]) {
    assert!(num_channels > 0, "num_channels must be > 0");
    assert!(
        interleaved.len() >= mono.len() * num_channels,
        "interleaved length mismatch"
    );
    for (m, frame) in mono.iter_mut().zip(interleaved.chunks_exact(num_channels)) {
        let acc: i32 = frame.iter().map(|&s| i32::from(s)).sum();
        *m = acc as f32 / num_channels as f32;
    }
}

/// Write a FloatS16 channel into one slot of interleaved S16 audio.
pub fn interleave_channel_s16(
    src: &[f32],
    num_channels: usize,
    channel: usize,
    interleaved: &mut [i16],
) {
    assert!(channel < num_channels, "channel {channel} out of range");
    assert!(
        interleaved.len() >= src.len() * num_channels,
        "interleaved length mismatch"
    );
    for (frame, &s) in interleaved.chunks_exact_mut(num_channels).zip(src) {
        frame[channel] = float_s16_to_s16(s);
    }
}
