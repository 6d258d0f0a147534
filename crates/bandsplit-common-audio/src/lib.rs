//! Audio primitives shared by the bandsplit pipeline.
//!
//! Contains sample format conversions, multi-channel band-split storage and
//! a fixed-geometry windowed-sinc resampler.

#![deny(unsafe_code)]

pub mod audio_util;
pub mod channel_buffer;
pub mod sinc_resampler;
