//! Per-stream audio buffer.
//!
//! `AudioBuffer` holds one 10 ms frame in the FloatS16 domain at the
//! processing rate. It converts from and to the caller's format on the way
//! in and out (resampling, downmixing, channel broadcast) and splits the
//! frame into 160-sample frequency bands for sub-band processing.
//!
//! All storage, including the resamplers and the splitting filter, is
//! allocated at construction; the per-frame paths never allocate.

use std::slice::{ChunksExact, ChunksExactMut};

use bandsplit_common_audio::audio_util;
use bandsplit_common_audio::channel_buffer::ChannelBuffer;
use bandsplit_common_audio::sinc_resampler::SincResampler;
use derive_more::Debug;

use crate::config::{Config, DownmixMethod};
use crate::error::{Error, Result};
use crate::splitting_filter::SplittingFilter;
use crate::stream_config::SampleRate;

/// Band count for a buffer of `num_frames` samples per channel.
pub fn num_bands_from_frames_per_channel(num_frames: usize) -> Result<usize> {
    match num_frames {
        80 | 160 => Ok(1),
        320 => Ok(2),
        480 => Ok(3),
        _ => Err(Error::UnsupportedFrameLength(num_frames)),
    }
}

/// Load one channel: resample if a resampler is given, then scale to FloatS16.
fn load_float_channel(
    source: &[f32],
    dest: &mut [f32],
    resampler: Option<&mut SincResampler>,
) {
    match resampler {
        Some(resampler) => {
            resampler.resample(source, dest);
            audio_util::float_to_float_s16_slice_inplace(dest);
        }
        None => audio_util::float_to_float_s16_slice(source, dest),
    }
}

/// Move FloatS16 samples between rates, or copy them when no resampler is given.
fn transfer_float_s16(source: &[f32], dest: &mut [f32], resampler: Option<&mut SincResampler>) {
    match resampler {
        Some(resampler) => {
            resampler.resample(source, dest);
        }
        None => dest.copy_from_slice(source),
    }
}

/// Audio buffer for the processing pipeline.
///
/// Handles resampling between input/buffer/output rates, downmixing from
/// multi-channel to mono, and frequency band splitting for sub-band processing.
#[derive(Debug)]
pub struct AudioBuffer {
    input_num_frames: usize,
    input_num_channels: usize,
    buffer_num_frames: usize,
    buffer_num_channels: usize,
    output_num_frames: usize,

    num_channels: usize,
    num_bands: usize,
    num_split_frames: usize,

    data: ChannelBuffer<f32>,
    split_data: Option<ChannelBuffer<f32>>,
    #[debug(skip)]
    splitting_filter: Option<SplittingFilter>,
    #[debug(skip)]
    input_resamplers: Vec<SincResampler>,
    #[debug(skip)]
    output_resamplers: Vec<SincResampler>,
    downmix_by_averaging: bool,
    channel_for_downmixing: usize,
    #[debug(skip)]
    scratch: Vec<f32>,
}

impl AudioBuffer {
    /// Create a new audio buffer from sample rates in Hz.
    ///
    /// - `input_rate_hz`: sample rate of incoming audio
    /// - `input_num_channels`: number of input channels
    /// - `buffer_rate_hz`: internal processing sample rate
    /// - `buffer_num_channels`: number of internal processing channels
    /// - `output_rate_hz`: sample rate of outgoing audio
    pub fn new(
        input_rate_hz: u32,
        input_num_channels: usize,
        buffer_rate_hz: u32,
        buffer_num_channels: usize,
        output_rate_hz: u32,
    ) -> Result<Self> {
        Self::from_frame_lengths(
            SampleRate::try_from(input_rate_hz)?.frames_per_10ms(),
            input_num_channels,
            SampleRate::try_from(buffer_rate_hz)?.frames_per_10ms(),
            buffer_num_channels,
            SampleRate::try_from(output_rate_hz)?.frames_per_10ms(),
        )
    }

    /// Create a new audio buffer from per-channel 10 ms frame lengths.
    pub fn from_frame_lengths(
        input_num_frames: usize,
        input_num_channels: usize,
        buffer_num_frames: usize,
        buffer_num_channels: usize,
        output_num_frames: usize,
    ) -> Result<Self> {
        for frames in [input_num_frames, buffer_num_frames, output_num_frames] {
            SampleRate::from_frames_per_10ms(frames)?;
        }
        for channels in [input_num_channels, buffer_num_channels] {
            if channels == 0 {
                return Err(Error::BadNumberChannels(channels));
            }
        }
        if buffer_num_channels > input_num_channels {
            return Err(Error::TooManyProcessingChannels {
                processing: buffer_num_channels,
                input: input_num_channels,
            });
        }

        let num_bands = num_bands_from_frames_per_channel(buffer_num_frames)?;
        let num_split_frames = buffer_num_frames / num_bands;

        let data = ChannelBuffer::new(buffer_num_frames, buffer_num_channels, 1);

        let input_resamplers = if input_num_frames != buffer_num_frames {
            (0..buffer_num_channels)
                .map(|_| SincResampler::new(input_num_frames, buffer_num_frames))
                .collect()
        } else {
            Vec::new()
        };

        let output_resamplers = if output_num_frames != buffer_num_frames {
            (0..buffer_num_channels)
                .map(|_| SincResampler::new(buffer_num_frames, output_num_frames))
                .collect()
        } else {
            Vec::new()
        };

        let (split_data, splitting_filter) = if num_bands > 1 {
            (
                Some(ChannelBuffer::new(
                    buffer_num_frames,
                    buffer_num_channels,
                    num_bands,
                )),
                Some(SplittingFilter::new(buffer_num_channels, num_bands)),
            )
        } else {
            (None, None)
        };

        let scratch_len = input_num_frames
            .max(buffer_num_frames)
            .max(output_num_frames);

        Ok(Self {
            input_num_frames,
            input_num_channels,
            buffer_num_frames,
            buffer_num_channels,
            output_num_frames,
            num_channels: buffer_num_channels,
            num_bands,
            num_split_frames,
            data,
            split_data,
            splitting_filter,
            input_resamplers,
            output_resamplers,
            downmix_by_averaging: true,
            channel_for_downmixing: 0,
            scratch: vec![0.0; scratch_len],
        })
    }

    /// Build the buffer a [`Config`] describes, with its downmix method applied.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let mut buffer = Self::new(
            config.input.sample_rate_hz(),
            config.input.num_channels(),
            config.processing.sample_rate_hz(),
            config.processing.num_channels(),
            config.output.sample_rate_hz(),
        )?;
        match config.downmix_method {
            DownmixMethod::AverageChannels => buffer.set_downmixing_by_averaging(),
            DownmixMethod::UseFirstChannel => buffer.set_downmixing_to_specific_channel(0),
        }
        Ok(buffer)
    }

    /// Number of visible channels (may be less than buffer_num_channels).
    #[inline]
    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    #[inline]
    pub fn buffer_num_channels(&self) -> usize {
        self.buffer_num_channels
    }

    /// Number of frames in the buffer (at buffer rate).
    #[inline]
    pub fn num_frames(&self) -> usize {
        self.buffer_num_frames
    }

    #[inline]
    pub fn input_num_frames(&self) -> usize {
        self.input_num_frames
    }

    #[inline]
    pub fn output_num_frames(&self) -> usize {
        self.output_num_frames
    }

    /// Number of frames per frequency band.
    #[inline]
    pub fn num_frames_per_band(&self) -> usize {
        self.num_split_frames
    }

    /// Number of frequency bands.
    #[inline]
    pub fn num_bands(&self) -> usize {
        self.num_bands
    }

    /// Samples of delay a split followed by a merge adds; zero for one band.
    pub fn band_split_delay(&self) -> usize {
        self.splitting_filter
            .as_ref()
            .map_or(0, SplittingFilter::delay)
    }

    /// Full-band samples of one channel.
    #[inline]
    pub fn channel(&self, channel: usize) -> &[f32] {
        self.data.bands(channel)
    }

    #[inline]
    pub fn channel_mut(&mut self, channel: usize) -> &mut [f32] {
        self.data.bands_mut(channel)
    }

    /// Split band data for a specific channel and band.
    ///
    /// With a single band this is the full-band channel.
    pub fn split_band(&self, channel: usize, band: usize) -> &[f32] {
        match &self.split_data {
            Some(split) => split.channel(band, channel),
            None => self.data.channel(band, channel),
        }
    }

    pub fn split_band_mut(&mut self, channel: usize, band: usize) -> &mut [f32] {
        match &mut self.split_data {
            Some(split) => split.channel_mut(band, channel),
            None => self.data.channel_mut(band, channel),
        }
    }

    /// Iterate one channel's bands, lowest first.
    pub fn split_bands(&self, channel: usize) -> ChunksExact<'_, f32> {
        match &self.split_data {
            Some(split) => split.split_bands(channel),
            None => self.data.split_bands(channel),
        }
    }

    pub fn split_bands_mut(&mut self, channel: usize) -> ChunksExactMut<'_, f32> {
        match &mut self.split_data {
            Some(split) => split.split_bands_mut(channel),
            None => self.data.split_bands_mut(channel),
        }
    }

    /// Set downmixing mode to select a specific channel.
    pub fn set_downmixing_to_specific_channel(&mut self, channel: usize) {
        self.downmix_by_averaging = false;
        self.channel_for_downmixing = channel.min(self.input_num_channels - 1);
    }

    /// Set downmixing mode to average all channels.
    pub fn set_downmixing_by_averaging(&mut self) {
        self.downmix_by_averaging = true;
    }

    /// Set the number of visible channels.
    ///
    /// # Panics
    ///
    /// Panics unless `1 <= num_channels <= buffer_num_channels`.
    pub fn set_num_channels(&mut self, num_channels: usize) {
        assert!(
            (1..=self.buffer_num_channels).contains(&num_channels),
            "num_channels {num_channels} outside 1..={}",
            self.buffer_num_channels
        );
        self.num_channels = num_channels;
        self.data.set_num_channels(num_channels);
        if let Some(split) = &mut self.split_data {
            split.set_num_channels(num_channels);
        }
    }

    /// Restore the number of channels to the buffer's allocated count.
    pub fn restore_num_channels(&mut self) {
        self.set_num_channels(self.buffer_num_channels);
    }

    /// Copy planar float data in \[-1, 1\] into the buffer.
    ///
    /// A mono buffer fed with several channels downmixes them; buffer
    /// channels beyond the source's channel count repeat source channel 0.
    ///
    /// # Panics
    ///
    /// Panics unless `source` has between 1 and `input_num_channels`
    /// channels of exactly `input_num_frames` samples.
    pub fn copy_from_float<S: AsRef<[f32]>>(&mut self, source: &[S]) {
        assert!(
            (1..=self.input_num_channels).contains(&source.len()),
            "source has {} channels, expected 1..={}",
            source.len(),
            self.input_num_channels
        );
        for (i, channel) in source.iter().enumerate() {
            assert_eq!(
                channel.as_ref().len(),
                self.input_num_frames,
                "source channel {i} length"
            );
        }
        self.restore_num_channels();

        if self.num_channels == 1 && source.len() > 1 {
            let downmixed = if self.downmix_by_averaging {
                let mono = &mut self.scratch[..self.input_num_frames];
                audio_util::downmix_to_mono(source, mono);
                &*mono
            } else {
                source[self.channel_for_downmixing.min(source.len() - 1)].as_ref()
            };
            load_float_channel(
                downmixed,
                self.data.bands_mut(0),
                self.input_resamplers.first_mut(),
            );
            return;
        }

        for i in 0..self.num_channels {
            let channel = source.get(i).unwrap_or(&source[0]).as_ref();
            load_float_channel(
                channel,
                self.data.bands_mut(i),
                self.input_resamplers.get_mut(i),
            );
        }
    }

    /// Copy the buffer out to planar float data in \[-1, 1\].
    ///
    /// Destination channels beyond the visible count receive a copy of
    /// destination channel 0.
    ///
    /// # Panics
    ///
    /// Panics if any destination channel is not `output_num_frames` long.
    pub fn copy_to_float<S: AsMut<[f32]>>(&mut self, dest: &mut [S]) {
        for (i, channel) in dest.iter_mut().enumerate() {
            assert_eq!(
                channel.as_mut().len(),
                self.output_num_frames,
                "destination channel {i} length"
            );
        }

        let active = self.num_channels.min(dest.len());
        for (i, channel) in dest.iter_mut().take(active).enumerate() {
            let channel = channel.as_mut();
            match self.output_resamplers.get_mut(i) {
                Some(resampler) => {
                    let float = &mut self.scratch[..self.buffer_num_frames];
                    audio_util::float_s16_to_float_slice(self.data.bands(i), float);
                    resampler.resample(float, channel);
                }
                None => audio_util::float_s16_to_float_slice(self.data.bands(i), channel),
            }
        }

        if let Some((first, rest)) = dest.split_first_mut() {
            let first = first.as_mut();
            for channel in rest.iter_mut().skip(active.saturating_sub(1)) {
                channel.as_mut().copy_from_slice(first);
            }
        }
    }

    /// Copy data from this buffer to another AudioBuffer (with optional resampling).
    ///
    /// # Panics
    ///
    /// Panics if `buffer` does not run at this buffer's output frame length.
    pub fn copy_to_buffer(&mut self, buffer: &mut AudioBuffer) {
        assert_eq!(
            buffer.num_frames(),
            self.output_num_frames,
            "destination buffer frame length"
        );

        let active = self.num_channels.min(buffer.num_channels());
        for i in 0..active {
            transfer_float_s16(
                self.data.bands(i),
                buffer.data.bands_mut(i),
                self.output_resamplers.get_mut(i),
            );
        }

        for i in active..buffer.num_channels() {
            buffer.data.copy_channel(0, i);
        }
    }

    /// Copy interleaved S16 data into the buffer.
    ///
    /// Follows the downmix and broadcast rules of
    /// [`copy_from_float`](Self::copy_from_float).
    ///
    /// # Panics
    ///
    /// Panics unless `num_channels` is in `1..=input_num_channels` and
    /// `interleaved` holds exactly `num_channels × input_num_frames` samples.
    pub fn copy_from_interleaved_i16(&mut self, interleaved: &[i16], num_channels: usize) {
        assert!(
            (1..=self.input_num_channels).contains(&num_channels),
            "source has {num_channels} channels, expected 1..={}",
            self.input_num_channels
        );
        assert_eq!(
            interleaved.len(),
            num_channels * self.input_num_frames,
            "interleaved length"
        );
        self.restore_num_channels();

        if self.num_channels == 1 && num_channels > 1 {
            let mono = &mut self.scratch[..self.input_num_frames];
            if self.downmix_by_averaging {
                audio_util::downmix_interleaved_s16(interleaved, num_channels, mono);
            } else {
                let channel = self.channel_for_downmixing.min(num_channels - 1);
                audio_util::deinterleave_channel_s16(interleaved, num_channels, channel, mono);
            }
            transfer_float_s16(mono, self.data.bands_mut(0), self.input_resamplers.first_mut());
            return;
        }

        for i in 0..self.num_channels {
            let channel = if i < num_channels { i } else { 0 };
            let deinterleaved = &mut self.scratch[..self.input_num_frames];
            audio_util::deinterleave_channel_s16(interleaved, num_channels, channel, deinterleaved);
            transfer_float_s16(
                deinterleaved,
                self.data.bands_mut(i),
                self.input_resamplers.get_mut(i),
            );
        }
    }

    /// Copy data from the buffer to interleaved S16 output.
    ///
    /// Output slots beyond the visible channel count repeat channel 0.
    ///
    /// # Panics
    ///
    /// Panics unless `interleaved` holds exactly
    /// `num_channels × output_num_frames` samples.
    pub fn copy_to_interleaved_i16(&mut self, interleaved: &mut [i16], num_channels: usize) {
        assert!(num_channels > 0, "num_channels must be > 0");
        assert_eq!(
            interleaved.len(),
            num_channels * self.output_num_frames,
            "interleaved length"
        );

        let active = self.num_channels.min(num_channels);
        for i in 0..active {
            let out = &mut self.scratch[..self.output_num_frames];
            transfer_float_s16(self.data.bands(i), out, self.output_resamplers.get_mut(i));
            audio_util::interleave_channel_s16(out, num_channels, i, interleaved);
        }

        if active < num_channels {
            for frame in interleaved.chunks_exact_mut(num_channels) {
                let first = frame[0];
                frame[active..].fill(first);
            }
        }
    }

    /// Write one channel's bands out as S16, rounded and saturated.
    ///
    /// # Panics
    ///
    /// Panics unless `dest` holds `num_bands` slices of
    /// `num_frames_per_band` samples.
    pub fn export_split_channel_data<S: AsMut<[i16]>>(&self, channel: usize, dest: &mut [S]) {
        assert_eq!(dest.len(), self.num_bands, "one destination slice per band");
        for (band, out) in self.split_bands(channel).zip(dest.iter_mut()) {
            audio_util::float_s16_to_s16_slice(band, out.as_mut());
        }
    }

    /// Overwrite one channel's bands from S16 data.
    ///
    /// # Panics
    ///
    /// Panics unless `source` holds `num_bands` slices of
    /// `num_frames_per_band` samples.
    pub fn import_split_channel_data<S: AsRef<[i16]>>(&mut self, channel: usize, source: &[S]) {
        assert_eq!(source.len(), self.num_bands, "one source slice per band");
        for (band, input) in self.split_bands_mut(channel).zip(source) {
            audio_util::s16_to_float_s16_slice(input.as_ref(), band);
        }
    }

    /// Split the buffer data into frequency bands.
    pub fn split_into_frequency_bands(&mut self) {
        if let (Some(filter), Some(split)) = (&mut self.splitting_filter, &mut self.split_data) {
            filter.analysis(&self.data, split);
        }
    }

    /// Recombine frequency bands into full-band signal.
    pub fn merge_frequency_bands(&mut self) {
        if let (Some(filter), Some(split)) = (&mut self.splitting_filter, &mut self.split_data) {
            filter.synthesis(split, &mut self.data);
        }
    }
}
