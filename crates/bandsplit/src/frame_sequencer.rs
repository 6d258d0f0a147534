//! Drives a [`ProcessingCore`] one 10 ms frame at a time.
//!
//! Every frame runs the same cycle on the stream's [`AudioBuffer`]:
//!
//! ```text
//! copy_from_float → split → analyze → process → merge → copy_to_float
//! ```

use std::mem;

use derive_more::Debug;

use crate::audio_buffer::AudioBuffer;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::processing_core::ProcessingCore;

/// Output of [`FrameSequencer::process_stream`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedStream {
    /// One planar vector per output channel, `frames_processed × output frame length` long.
    pub channels: Vec<Vec<f32>>,
    pub frames_processed: usize,
    /// Trailing samples per channel that did not fill a frame.
    pub dropped_samples: usize,
}

/// Owns a stream's buffer and core and runs the per-frame cycle.
#[derive(Debug)]
pub struct FrameSequencer<C> {
    config: Config,
    buffer: AudioBuffer,
    #[debug(skip)]
    core: C,
    #[debug(skip)]
    output_frame: Vec<Vec<f32>>,
    frames_processed: usize,
}

impl<C: ProcessingCore> FrameSequencer<C> {
    pub fn new(config: Config, core: C) -> Result<Self> {
        let buffer = AudioBuffer::from_config(&config)?;
        tracing::debug!(
            input_rate_hz = config.input.sample_rate_hz(),
            input_channels = config.input.num_channels(),
            processing_rate_hz = config.processing.sample_rate_hz(),
            processing_channels = config.processing.num_channels(),
            output_rate_hz = config.output.sample_rate_hz(),
            output_channels = config.output.num_channels(),
            num_bands = buffer.num_bands(),
            frames_per_band = buffer.num_frames_per_band(),
            band_split_delay = buffer.band_split_delay(),
            "frame sequencer configured"
        );
        let output_frame = vec![vec![0.0; buffer.output_num_frames()]; config.output.num_channels()];
        Ok(Self {
            config,
            buffer,
            core,
            output_frame,
            frames_processed: 0,
        })
    }

    /// Run one frame through the pipeline.
    ///
    /// # Panics
    ///
    /// Panics if `input` or `output` does not match the configured channel
    /// counts and frame lengths (see [`AudioBuffer::copy_from_float`] and
    /// [`AudioBuffer::copy_to_float`]).
    pub fn process_frame<I, O>(&mut self, input: &[I], output: &mut [O])
    where
        I: AsRef<[f32]>,
        O: AsMut<[f32]>,
    {
        self.buffer.copy_from_float(input);
        self.buffer.split_into_frequency_bands();
        self.core.analyze(&self.buffer);
        self.core.process(&mut self.buffer);
        self.buffer.merge_frequency_bands();
        self.buffer.copy_to_float(output);
        self.frames_processed += 1;
    }

    /// Run a whole planar stream through the pipeline, frame by frame.
    ///
    /// Trailing samples that do not fill a frame are dropped and counted.
    pub fn process_stream<S: AsRef<[f32]>>(&mut self, stream: &[S]) -> Result<ProcessedStream> {
        let expected_channels = self.config.input.num_channels();
        if stream.len() != expected_channels {
            return Err(Error::ChannelCountMismatch {
                expected: expected_channels,
                actual: stream.len(),
            });
        }
        let len = stream[0].as_ref().len();
        for (channel, samples) in stream.iter().enumerate() {
            let actual = samples.as_ref().len();
            if actual != len {
                return Err(Error::ChannelLengthMismatch {
                    channel,
                    expected: len,
                    actual,
                });
            }
        }

        let input_frames = self.buffer.input_num_frames();
        let output_frames = self.buffer.output_num_frames();
        let num_frames = len / input_frames;
        let dropped_samples = len % input_frames;
        if dropped_samples > 0 {
            tracing::warn!(
                dropped_samples,
                frame_length = input_frames,
                "stream does not end on a frame boundary; dropping trailing samples"
            );
        }

        let mut channels: Vec<Vec<f32>> = (0..self.config.output.num_channels())
            .map(|_| Vec::with_capacity(num_frames * output_frames))
            .collect();
        let mut output_frame = mem::take(&mut self.output_frame);
        let mut input_frame: Vec<&[f32]> = Vec::with_capacity(expected_channels);

        for frame in 0..num_frames {
            let range = frame * input_frames..(frame + 1) * input_frames;
            input_frame.clear();
            input_frame.extend(stream.iter().map(|samples| &samples.as_ref()[range.clone()]));

            self.process_frame(&input_frame, &mut output_frame);

            for (channel, samples) in channels.iter_mut().zip(&output_frame) {
                channel.extend_from_slice(samples);
            }
        }

        self.output_frame = output_frame;
        Ok(ProcessedStream {
            channels,
            frames_processed: num_frames,
            dropped_samples,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn audio_buffer(&self) -> &AudioBuffer {
        &self.buffer
    }

    pub fn core(&self) -> &C {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut C {
        &mut self.core
    }

    /// Frames run since construction, across all calls.
    pub fn frames_processed(&self) -> usize {
        self.frames_processed
    }
}

#[cfg(test)]
mod tests {
    use bandsplit_proptest::comparison::{assert_delayed_near, assert_f32_near};
    use bandsplit_proptest::generators::{PlanarFrameF32, sine};
    use test_strategy::proptest;

    use super::*;
    #[allow(unused_imports)]
    use derive_more::Debug;
    use crate::config::DownmixMethod;
    use crate::processing_core::PassThrough;
    use crate::stream_config::StreamConfig;

    /// Records band energies and mutes every band above the first.
    #[derive(Default)]
    struct LowBandOnly {
        analyzed: usize,
        band_energy: Vec<f32>,
    }

    impl ProcessingCore for LowBandOnly {
        fn analyze(&mut self, audio: &AudioBuffer) {
            self.analyzed += 1;
            self.band_energy = audio
                .split_bands(0)
                .map(|band| band.iter().map(|x| x * x).sum())
                .collect();
        }

        fn process(&mut self, audio: &mut AudioBuffer) {
            for channel in 0..audio.num_channels() {
                for band in audio.split_bands_mut(channel).skip(1) {
                    band.fill(0.0);
                }
            }
        }
    }

    fn stereo_48k() -> Config {
        Config::new(StreamConfig::new(48000, 2).unwrap())
    }

    #[test]
    fn stereo_stream_reconstructs_after_band_delay() {
        let mut sequencer = FrameSequencer::new(stereo_48k(), PassThrough).unwrap();
        let left = sine(1000.0, 48000, 0.5, 0, 48000);
        let right = sine(440.0, 48000, 0.25, 0, 48000);

        let processed = sequencer.process_stream(&[&left, &right]).unwrap();
        assert_eq!(processed.frames_processed, 100);
        assert_eq!(processed.dropped_samples, 0);
        assert_eq!(processed.channels.len(), 2);
        assert_eq!(processed.channels[0].len(), 48000);

        let delay = sequencer.audio_buffer().band_split_delay();
        assert_eq!(delay, 117);
        assert_delayed_near(&processed.channels[0], &left, delay, 1e-3);
        assert_delayed_near(&processed.channels[1], &right, delay, 1e-3);
    }

    #[test]
    fn two_band_stream_reconstructs_after_band_delay() {
        let config = Config::new(StreamConfig::new(32000, 1).unwrap());
        let mut sequencer = FrameSequencer::new(config, PassThrough).unwrap();
        let input = sine(3000.0, 32000, 0.5, 0, 320 * 60);

        let processed = sequencer.process_stream(&[&input]).unwrap();
        let delay = sequencer.audio_buffer().band_split_delay();
        assert_eq!(delay, 46);
        assert_delayed_near(&processed.channels[0], &input, delay, 1e-3);
    }

    #[proptest]
    fn pass_through_returns_delayed_input(frame: PlanarFrameF32) {
        let config =
            Config::new(StreamConfig::new(frame.sample_rate.hz(), frame.channels.len()).unwrap());
        let mut sequencer = FrameSequencer::new(config, PassThrough).unwrap();
        let delay = sequencer.audio_buffer().band_split_delay();

        let mut output = vec![vec![0.0f32; frame.sample_rate.frame_size()]; frame.channels.len()];
        sequencer.process_frame(&frame.channels, &mut output);
        for (out, input) in output.iter().zip(&frame.channels) {
            if delay == 0 {
                assert_eq!(out, input);
            } else {
                assert_delayed_near(out, input, delay, 1e-4);
            }
        }
    }

    #[test]
    fn core_sees_every_frame_and_can_mute_bands() {
        let config = Config::new(StreamConfig::new(48000, 1).unwrap());
        let mut sequencer = FrameSequencer::new(config, LowBandOnly::default()).unwrap();

        let low = sine(4000.0, 48000, 0.25, 0, 480 * 20);
        let high = sine(20000.0, 48000, 0.25, 0, 480 * 20);
        let mixed: Vec<f32> = low.iter().zip(&high).map(|(a, b)| a + b).collect();

        let processed = sequencer.process_stream(&[&mixed]).unwrap();
        assert_eq!(sequencer.core().analyzed, 20);
        assert_eq!(sequencer.frames_processed(), 20);
        let energy = &sequencer.core().band_energy;
        assert!(energy[2] > 10.0 * energy[1], "{energy:?}");

        // Only the low tone survives, minus what the upper bands held of it.
        let tail = 480 * 19;
        let delay = sequencer.audio_buffer().band_split_delay();
        let output = &processed.channels[0][tail..];
        let expected = sine(4000.0, 48000, 0.25, tail - delay, 480);
        assert_f32_near(output, &expected, 2e-2);
    }

    #[test]
    fn trailing_samples_are_dropped() {
        let config = Config::new(StreamConfig::new(16000, 1).unwrap());
        let mut sequencer = FrameSequencer::new(config, PassThrough).unwrap();
        let input = vec![0.1f32; 160 * 3 + 17];

        let processed = sequencer.process_stream(&[&input]).unwrap();
        assert_eq!(processed.frames_processed, 3);
        assert_eq!(processed.dropped_samples, 17);
        assert_eq!(processed.channels[0].len(), 480);
        assert_eq!(processed.channels[0], vec![0.1f32; 480]);
    }

    #[test]
    fn stream_shorter_than_a_frame_yields_nothing() {
        let config = Config::new(StreamConfig::new(8000, 1).unwrap());
        let mut sequencer = FrameSequencer::new(config, PassThrough).unwrap();
        let processed = sequencer.process_stream(&[vec![0.0f32; 79]]).unwrap();
        assert_eq!(processed.frames_processed, 0);
        assert_eq!(processed.dropped_samples, 79);
        assert!(processed.channels[0].is_empty());
    }

    #[test]
    fn wrong_channel_count_is_rejected() {
        let mut sequencer = FrameSequencer::new(stereo_48k(), PassThrough).unwrap();
        assert_eq!(
            sequencer.process_stream(&[vec![0.0f32; 480]]),
            Err(Error::ChannelCountMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn ragged_channels_are_rejected() {
        let mut sequencer = FrameSequencer::new(stereo_48k(), PassThrough).unwrap();
        assert_eq!(
            sequencer.process_stream(&[vec![0.0f32; 480], vec![0.0f32; 470]]),
            Err(Error::ChannelLengthMismatch {
                channel: 1,
                expected: 480,
                actual: 470
            })
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = Config {
            processing: StreamConfig::new(48000, 3).unwrap(),
            ..stereo_48k()
        };
        assert!(matches!(
            FrameSequencer::new(config, PassThrough),
            Err(Error::TooManyProcessingChannels { .. })
        ));
    }

    #[test]
    fn mono_processing_broadcasts_to_stereo_output() {
        let config = Config {
            processing: StreamConfig::new(16000, 1).unwrap(),
            downmix_method: DownmixMethod::AverageChannels,
            ..Config::new(StreamConfig::new(16000, 2).unwrap())
        };
        let mut sequencer = FrameSequencer::new(config, PassThrough).unwrap();
        let processed = sequencer
            .process_stream(&[vec![0.25f32; 320], vec![0.75f32; 320]])
            .unwrap();
        assert_eq!(processed.channels.len(), 2);
        assert!(processed.channels.iter().flatten().all(|&s| s == 0.5));
    }

    #[test]
    fn rate_conversion_changes_output_length() {
        let config = Config {
            output: StreamConfig::new(16000, 1).unwrap(),
            ..Config::new(StreamConfig::new(48000, 1).unwrap())
        };
        let mut sequencer = FrameSequencer::new(config, PassThrough).unwrap();
        let input = sine(1000.0, 48000, 0.5, 0, 480 * 10);

        let processed = sequencer.process_stream(&[&input]).unwrap();
        assert_eq!(processed.channels[0].len(), 1600);
        let tail = &processed.channels[0][1440..];
        let power = tail.iter().map(|v| v * v).sum::<f32>() / tail.len() as f32;
        assert!((power - 0.125).abs() < 0.01, "power {power}");
    }

    #[test]
    fn state_carries_across_calls() {
        let config = Config::new(StreamConfig::new(48000, 1).unwrap());
        let input = sine(1000.0, 48000, 0.5, 0, 960);
        let (first, second) = input.split_at(480);

        let mut split = FrameSequencer::new(config, PassThrough).unwrap();
        let a = split.process_stream(&[first]).unwrap();
        let b = split.process_stream(&[second]).unwrap();
        assert_eq!(split.frames_processed(), 2);

        let mut whole = FrameSequencer::new(config, PassThrough).unwrap();
        let c = whole.process_stream(&[&input]).unwrap();

        let joined: Vec<f32> = a.channels[0].iter().chain(&b.channels[0]).copied().collect();
        assert_eq!(joined, c.channels[0]);
    }
}
