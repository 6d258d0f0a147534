//! Rate, channel and sub-band adaptation for 10 ms audio processing.
//!
//! Streams arrive at 8, 16, 32 or 48 kHz with any number of channels. Each
//! 10 ms frame is loaded into an [`AudioBuffer`] at the processing rate,
//! split into 160-sample frequency bands when that rate is 32 or 48 kHz,
//! handed to a [`ProcessingCore`], merged and stored back at the output
//! format.
//!
//! ```
//! use bandsplit::{Config, FrameSequencer, PassThrough, StreamConfig};
//!
//! let config = Config::new(StreamConfig::new(48000, 1)?);
//! let mut sequencer = FrameSequencer::new(config, PassThrough)?;
//!
//! let input = vec![0.0_f32; 4800];
//! let processed = sequencer.process_stream(&[&input])?;
//! assert_eq!(processed.frames_processed, 10);
//! assert_eq!(processed.channels[0].len(), 4800);
//! # Ok::<(), bandsplit::Error>(())
//! ```

#![deny(unsafe_code)]

pub mod audio_buffer;
pub mod config;
pub mod error;
pub mod frame_sequencer;
pub mod processing_core;
pub mod stream_config;

mod filter_bank;
mod filter_coefficients;
mod splitting_filter;

pub use audio_buffer::AudioBuffer;
pub use config::{Config, DownmixMethod};
pub use error::{Error, Result};
pub use frame_sequencer::{FrameSequencer, ProcessedStream};
pub use processing_core::{PassThrough, ProcessingCore};
pub use stream_config::{SampleRate, StreamConfig};
