//! The hook through which sub-band processing plugs into the pipeline.

use crate::audio_buffer::AudioBuffer;

/// Per-frame processing over a band-split [`AudioBuffer`].
///
/// [`FrameSequencer`](crate::frame_sequencer::FrameSequencer) calls
/// [`analyze`](Self::analyze) and then [`process`](Self::process) once per
/// frame, after the split and before the merge.
pub trait ProcessingCore {
    /// Observe the frame without modifying it.
    fn analyze(&mut self, audio: &AudioBuffer);

    /// Modify the split bands in place.
    fn process(&mut self, audio: &mut AudioBuffer);
}

/// Leaves every frame untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThrough;

impl ProcessingCore for PassThrough {
    fn analyze(&mut self, _audio: &AudioBuffer) {}

    fn process(&mut self, _audio: &mut AudioBuffer) {}
}

impl<C: ProcessingCore + ?Sized> ProcessingCore for Box<C> {
    fn analyze(&mut self, audio: &AudioBuffer) {
        (**self).analyze(audio);
    }

    fn process(&mut self, audio: &mut AudioBuffer) {
        (**self).process(audio);
    }
}
