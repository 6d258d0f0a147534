//! Assertions for checking processed audio against a reference signal.
//!
//! Band splitting and resampling both delay the signal, so the usual check
//! lines the output up against the reference shifted by the known latency.

/// Largest absolute difference and where it occurs. NaN counts as infinite.
fn worst_difference(actual: &[f32], expected: &[f32]) -> Option<(usize, f32)> {
    actual
        .iter()
        .zip(expected)
        .map(|(a, e)| {
            let diff = (a - e).abs();
            if diff.is_nan() { f32::INFINITY } else { diff }
        })
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(&b.1))
}

/// Assert two f32 slices are equal within an absolute tolerance.
pub fn assert_f32_near(actual: &[f32], expected: &[f32], tolerance: f32) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    if let Some((i, diff)) = worst_difference(actual, expected) {
        assert!(
            diff <= tolerance,
            "sample {i} off by {diff} (tolerance {tolerance}): actual {}, expected {}",
            actual[i],
            expected[i],
        );
    }
}

/// Assert that `actual` is `expected` delayed by `delay` samples.
///
/// The first `delay` output samples come from before the reference starts,
/// so they must be silent; `actual[delay..]` must match `expected` from its
/// beginning.
pub fn assert_delayed_near(actual: &[f32], expected: &[f32], delay: usize, tolerance: f32) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    assert!(delay <= actual.len(), "delay {delay} exceeds length {}", actual.len());

    let (head, aligned) = actual.split_at(delay);
    let silence = vec![0.0f32; delay];
    if let Some((i, level)) = worst_difference(head, &silence) {
        assert!(
            level <= tolerance,
            "sample {i} inside the {delay}-sample delay is {} instead of silence",
            head[i],
        );
    }
    assert_f32_near(aligned, &expected[..expected.len() - delay], tolerance);
}

/// Assert two i16 slices are bit-exact.
pub fn assert_i16_exact(actual: &[i16], expected: &[i16]) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    if let Some(i) = actual.iter().zip(expected).position(|(a, e)| a != e) {
        panic!(
            "first mismatch at sample {i}: actual {}, expected {}",
            actual[i], expected[i]
        );
    }
}
