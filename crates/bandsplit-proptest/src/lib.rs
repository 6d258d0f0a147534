//! Property-based test support for the bandsplit crates.
//!
//! Provides audio frame generators and comparison utilities for
//! verifying signal paths that add a known delay.
//!
//! # Usage
//!
//! ```ignore
//! use bandsplit_proptest::generators::*;
//! use test_strategy::proptest;
//!
//! #[proptest]
//! fn my_test(frame: PlanarFrameF32) {
//!     assert_eq!(frame.channels[0].len(), frame.sample_rate.frame_size());
//! }
//! ```

pub mod comparison;
pub mod generators;

pub use proptest;
pub use test_strategy;
