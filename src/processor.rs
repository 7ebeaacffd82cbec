//! The processing capability every DSP stage implements.
//!
//! Components that transform audio — the user's signal chain, but also
//! infrastructure like [`BlockAdaptor`](crate::BlockAdaptor) — implement the
//! same trait, so stages compose by nesting: an adaptor wrapping a processor
//! is itself a processor.

use crate::buffer::AudioBlock;

/// A stage that can be prepared once and then fed blocks on the audio thread.
pub trait AudioProcessor: Send {
    /// Called once before streaming begins. Must not block.
    ///
    /// `estimated_block_size` is a hint; `process` may see other lengths.
    fn prepare(&mut self, sample_rate: f64, estimated_block_size: usize);

    /// Process one block in place. Called on the audio thread; must not
    /// block or allocate.
    fn process(&mut self, block: &mut AudioBlock);
}

/// Allow boxed processors to be used as processors (for dynamic dispatch).
impl AudioProcessor for Box<dyn AudioProcessor> {
    fn prepare(&mut self, sample_rate: f64, estimated_block_size: usize) {
        (**self).prepare(sample_rate, estimated_block_size)
    }

    fn process(&mut self, block: &mut AudioBlock) {
        (**self).process(block)
    }
}

/// Identity stage: leaves the block untouched.
///
/// Useful as a placeholder while wiring a stream before the real signal
/// chain exists.
pub struct Passthrough;

impl AudioProcessor for Passthrough {
    fn prepare(&mut self, _sample_rate: f64, _estimated_block_size: usize) {}

    fn process(&mut self, _block: &mut AudioBlock) {}
}

/// Constant gain stage.
pub struct Gain {
    gain: f32,
}

impl Gain {
    pub fn new(gain: f32) -> Self {
        Self { gain }
    }
}

impl AudioProcessor for Gain {
    fn prepare(&mut self, _sample_rate: f64, _estimated_block_size: usize) {}

    fn process(&mut self, block: &mut AudioBlock) {
        for ch in 0..block.channel_count() {
            for sample in block.channel_mut(ch) {
                *sample *= self.gain;
            }
        }
    }
}
