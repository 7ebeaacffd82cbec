//! Block-rate decoupling between the device callback and the DSP stage.

/*
Block-Rate Adaptation
=====================

Device callbacks deliver whatever buffer length the driver felt like: 441
frames, then 448, then 107. Most DSP code wants the opposite deal - a
constant block size it can tune FFT sizes and lookup tables against.

The adaptor sits between the two and speaks both dialects:

    caller:  process(n frames)   n varies per call
    inner:   process(F frames)   F fixed at construction

    caller block ──→ [input rings] ──F at a time──→ inner processor
                                                         │
    caller block ←── [output rings] ←────────────────────┘

Per channel there is one input ring and one output ring, each sized to
absorb the worst-case mismatch (4x the larger of the two block lengths).
Every call drains as many full fixed blocks as the input rings hold, so a
single oversized caller block can drive several inner calls.

Latency: when the caller's length equals the fixed size, input is consumed
and reproduced within the same call - zero added latency. Otherwise output
stays silent until one fixed block has accumulated, after which the lag is
bounded by one fixed block. The silence is synthesized here, in exactly one
place, when the output rings run short.
*/

use crate::buffer::{AudioBlock, RingBuffer};
use crate::error::{StreamError, StreamResult};
use crate::processor::AudioProcessor;

/// Wraps an inner [`AudioProcessor`], feeding it fixed-length blocks no
/// matter what lengths the adaptor itself is called with.
///
/// Implements [`AudioProcessor`] too, so adaptors nest like any other stage.
pub struct BlockAdaptor<P> {
    inner: P,
    fixed_block_size: usize,
    input_rings: Vec<RingBuffer>,
    output_rings: Vec<RingBuffer>,
    scratch: Option<AudioBlock>,
}

impl<P: AudioProcessor> BlockAdaptor<P> {
    /// Wrap `inner` so it only ever sees blocks of `fixed_block_size` frames.
    pub fn new(inner: P, fixed_block_size: usize) -> StreamResult<Self> {
        if fixed_block_size == 0 {
            return Err(StreamError::ZeroBlockSize);
        }
        Ok(Self {
            inner,
            fixed_block_size,
            input_rings: Vec::new(),
            output_rings: Vec::new(),
            scratch: None,
        })
    }

    pub fn fixed_block_size(&self) -> usize {
        self.fixed_block_size
    }

    pub fn into_inner(self) -> P {
        self.inner
    }

    /// (Re)build per-channel state when the observed channel count changes.
    ///
    /// Channel count is only known once a block arrives, so the rings are
    /// created lazily on the first call. A change mid-stream throws away
    /// whatever was buffered; that loss is reported rather than silent.
    fn reset_rings(&mut self, channels: usize, incoming_len: usize) {
        let buffered: usize = self
            .input_rings
            .iter()
            .chain(self.output_rings.iter())
            .map(RingBuffer::len)
            .sum();
        if buffered > 0 {
            log::warn!(
                "channel count changed from {} to {}, discarding {} buffered samples",
                self.input_rings.len(),
                channels,
                buffered
            );
        }

        let capacity = (self.fixed_block_size * 4).max(incoming_len * 4);
        self.input_rings = (0..channels).map(|_| RingBuffer::new(capacity)).collect();
        self.output_rings = (0..channels).map(|_| RingBuffer::new(capacity)).collect();
        self.scratch = Some(AudioBlock::new(channels, self.fixed_block_size));
    }
}

impl<P: AudioProcessor> AudioProcessor for BlockAdaptor<P> {
    /// Forwards the sample rate but substitutes the fixed size for the
    /// caller's estimate: the inner processor will only ever see fixed
    /// blocks, so that is the size it should prepare for.
    fn prepare(&mut self, sample_rate: f64, _estimated_block_size: usize) {
        self.inner.prepare(sample_rate, self.fixed_block_size);
    }

    fn process(&mut self, block: &mut AudioBlock) {
        let channels = block.channel_count();
        if self.input_rings.len() != channels {
            self.reset_rings(channels, block.frames());
        }
        let Some(scratch) = self.scratch.as_mut() else {
            // reset_rings always installs a scratch block
            return;
        };

        // Stage incoming samples. A full ring drops the excess, per the
        // ring's overflow policy.
        for (ch, ring) in self.input_rings.iter_mut().enumerate() {
            ring.write(block.channel(ch));
        }

        // Drain complete fixed blocks. One caller block can span several.
        let fixed = self.fixed_block_size;
        while self.input_rings.iter().all(|ring| ring.len() >= fixed) {
            for (ch, ring) in self.input_rings.iter_mut().enumerate() {
                ring.read(scratch.channel_mut(ch));
            }

            self.inner.process(scratch);

            for (ch, ring) in self.output_rings.iter_mut().enumerate() {
                ring.write(scratch.channel(ch));
            }
        }

        // Hand back what the inner stage has produced so far; pad the rest
        // with silence (underrun - expected whenever the caller's length
        // does not divide evenly into fixed blocks).
        for (ch, ring) in self.output_rings.iter_mut().enumerate() {
            let dest = block.channel_mut(ch);
            let read = ring.read(dest);
            if read < dest.len() {
                dest[read..].fill(0.0);
            }
        }
    }
}
