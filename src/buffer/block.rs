/// A multichannel block of planar `f32` samples.
///
/// Every channel holds exactly [`frames`](AudioBlock::frames) samples. The
/// block is the unit handed to an [`AudioProcessor`](crate::AudioProcessor);
/// it is owned by whichever component built it and only ever lent out for the
/// duration of a single `process` call.
///
/// A block can be built with spare capacity (`with_capacity`) so a caller
/// that sees varying frame counts per callback can shrink or grow the active
/// length with [`set_frames`](AudioBlock::set_frames) without allocating.
pub struct AudioBlock {
    channels: Vec<Vec<f32>>,
    frames: usize,
}

impl AudioBlock {
    /// Create a block of silence with the given shape.
    ///
    /// # Panics
    /// Panics if `channel_count` or `frames` is zero.
    pub fn new(channel_count: usize, frames: usize) -> Self {
        Self::with_capacity(channel_count, frames)
    }

    /// Create a block whose active length can later be set anywhere in
    /// `1..=max_frames` without reallocating.
    ///
    /// # Panics
    /// Panics if `channel_count` or `max_frames` is zero.
    pub fn with_capacity(channel_count: usize, max_frames: usize) -> Self {
        assert!(channel_count >= 1, "audio block must have at least one channel");
        assert!(max_frames >= 1, "audio block length must be positive");
        Self {
            channels: vec![vec![0.0; max_frames]; channel_count],
            frames: max_frames,
        }
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Active length of every channel, in frames.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Allocated length of every channel, in frames.
    pub fn max_frames(&self) -> usize {
        self.channels[0].len()
    }

    /// Samples of channel `index`, exactly [`frames`](AudioBlock::frames) long.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index][..self.frames]
    }

    /// Mutable samples of channel `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn channel_mut(&mut self, index: usize) -> &mut [f32] {
        let frames = self.frames;
        &mut self.channels[index][..frames]
    }

    /// Change the active length. Realtime-safe: no allocation, the capacity
    /// reserved at construction is simply re-sliced.
    ///
    /// # Panics
    /// Panics if `frames` is zero or exceeds the allocated capacity.
    pub fn set_frames(&mut self, frames: usize) {
        assert!(frames >= 1, "audio block length must be positive");
        assert!(
            frames <= self.max_frames(),
            "set_frames beyond allocated capacity"
        );
        self.frames = frames;
    }

    /// Zero every channel, including any inactive tail.
    pub fn clear(&mut self) {
        for channel in &mut self.channels {
            channel.fill(0.0);
        }
    }
}
