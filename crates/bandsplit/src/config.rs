//! Pipeline configuration.

use crate::error::{Error, Result};
use crate::stream_config::StreamConfig;

/// Ways to downmix a multi-channel input to a mono processing buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DownmixMethod {
    /// Average across channels.
    #[default]
    AverageChannels,
    /// Use the first channel.
    UseFirstChannel,
}

/// Formats at the three points of the pipeline.
///
/// `processing` is what the core sees: its rate fixes the band layout and
/// its channel count may be lower than the input's, in which case the input
/// is downmixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub input: StreamConfig,
    pub processing: StreamConfig,
    pub output: StreamConfig,
    pub downmix_method: DownmixMethod,
}

impl Config {
    /// Same format in, through and out.
    pub fn new(stream: StreamConfig) -> Self {
        Self {
            input: stream,
            processing: stream,
            output: stream,
            downmix_method: DownmixMethod::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let processing = self.processing.num_channels();
        let input = self.input.num_channels();
        if processing > input {
            return Err(Error::TooManyProcessingChannels { processing, input });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(StreamConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_uniform_and_valid() {
        let config = Config::default();
        assert_eq!(config.input, config.processing);
        assert_eq!(config.processing, config.output);
        assert_eq!(config.downmix_method, DownmixMethod::AverageChannels);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn fewer_processing_channels_is_valid() {
        let config = Config {
            processing: StreamConfig::new(16000, 1).unwrap(),
            ..Config::new(StreamConfig::new(48000, 2).unwrap())
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn more_processing_channels_is_rejected() {
        let config = Config {
            processing: StreamConfig::new(48000, 3).unwrap(),
            ..Config::new(StreamConfig::new(48000, 2).unwrap())
        };
        assert_eq!(
            config.validate(),
            Err(Error::TooManyProcessingChannels {
                processing: 3,
                input: 2
            })
        );
    }
}
