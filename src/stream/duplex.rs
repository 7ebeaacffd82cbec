//! The two thread-facing halves of a duplex stream.
//!
//! The capture callback owns a [`DuplexInput`] and pushes raw interleaved
//! bytes as they arrive. The render callback owns a [`DuplexOutput`] and
//! pulls processed bytes; each pull drives the full chain synchronously:
//!
//!   jitter queue -> deinterleave -> processor -> interleave -> device
//!
//! The queue between the halves is an `rtrb` SPSC ring, so neither side
//! ever blocks on the other. Arrival jitter is absorbed by the queue depth
//! (about half a second of audio); a pull that finds less data than it
//! needs plays silence for the whole request rather than a partial fill.

use rtrb::{Consumer, Producer, RingBuffer};

use crate::buffer::AudioBlock;
use crate::processor::AudioProcessor;
use crate::stream::convert;
use crate::stream::format::StreamFormat;

/// Depth of the jitter queue, in milliseconds of audio.
const JITTER_QUEUE_MS: usize = 500;

/// Worst-case device chunk the scratch buffers are sized for, in
/// milliseconds of audio.
const MAX_CHUNK_MS: usize = 200;

/// Capture-thread half: push raw bytes as the device delivers them.
pub struct DuplexInput {
    producer: Producer<u8>,
}

impl DuplexInput {
    /// Append raw interleaved bytes to the jitter queue.
    ///
    /// Returns how many bytes were accepted. When the queue is full the
    /// newest bytes are the ones dropped; keeping the buffered backlog
    /// bounded matters more here than completeness. Fire and forget: there
    /// is no error to handle and nothing to retry.
    pub fn push(&mut self, bytes: &[u8]) -> usize {
        let writable = bytes.len().min(self.producer.slots());
        if writable == 0 {
            return 0;
        }
        let Ok(mut chunk) = self.producer.write_chunk(writable) else {
            return 0;
        };

        let (first, second) = chunk.as_mut_slices();
        let split = first.len();
        first.copy_from_slice(&bytes[..split]);
        second.copy_from_slice(&bytes[split..writable]);
        chunk.commit_all();
        writable
    }
}

/// Render-thread half: pull processed bytes, driving the processor.
pub struct DuplexOutput<P> {
    consumer: Consumer<u8>,
    processor: P,
    format: StreamFormat,
    scratch_bytes: Vec<u8>,
    scratch_block: AudioBlock,
    silent_reads: u64,
}

impl<P: AudioProcessor> DuplexOutput<P> {
    /// Bytes currently waiting in the jitter queue.
    pub fn buffered_bytes(&self) -> usize {
        self.consumer.slots()
    }

    /// Number of reads so far that produced silence for lack of input.
    pub fn silent_reads(&self) -> u64 {
        self.silent_reads
    }

    pub fn format(&self) -> &StreamFormat {
        &self.format
    }

    /// Fill `out` with processed audio and return its length.
    ///
    /// All-or-nothing: if the jitter queue holds fewer bytes than the
    /// request needs, the whole buffer is zeroed and the processor is not
    /// invoked. Otherwise exactly the requested span is consumed,
    /// converted, processed and written back. Only whole frames are
    /// processed; a trailing partial frame comes back as silence.
    pub fn read(&mut self, out: &mut [u8]) -> usize {
        let requested = out.len();
        if requested == 0 {
            return 0;
        }

        // Whole frames only, capped at the scratch size negotiated at setup.
        let usable = requested.min(self.scratch_bytes.len());
        let frames = usable / self.format.bytes_per_frame();
        let byte_count = frames * self.format.bytes_per_frame();

        if frames == 0 || self.consumer.slots() < byte_count {
            out.fill(0);
            if self.silent_reads == 0 {
                log::debug!(
                    "duplex underrun: {} bytes buffered, {} requested",
                    self.consumer.slots(),
                    byte_count
                );
            }
            self.silent_reads += 1;
            return requested;
        }

        let Ok(chunk) = self.consumer.read_chunk(byte_count) else {
            // slots() already guaranteed availability
            out.fill(0);
            return requested;
        };
        let (first, second) = chunk.as_slices();
        self.scratch_bytes[..first.len()].copy_from_slice(first);
        self.scratch_bytes[first.len()..byte_count].copy_from_slice(second);
        chunk.commit_all();

        self.scratch_block.set_frames(frames);
        convert::deinterleave(
            &self.scratch_bytes[..byte_count],
            self.format.encoding(),
            &mut self.scratch_block,
        );

        self.processor.process(&mut self.scratch_block);

        convert::interleave(
            &self.scratch_block,
            self.format.encoding(),
            &mut self.scratch_bytes[..byte_count],
        );

        out[..byte_count].copy_from_slice(&self.scratch_bytes[..byte_count]);
        out[byte_count..].fill(0);
        requested
    }
}

/// Build a duplex stream around `processor` for the given wire format.
///
/// Prepares the processor once (with a ~10 ms block-size estimate; actual
/// lengths follow the device's pulls), allocates the jitter queue and
/// scratch buffers, and hands back the two halves. The input half moves to
/// the capture thread; the output half stays with the render thread. All
/// allocation happens here - the per-callback paths reuse these buffers.
pub fn duplex_stream<P: AudioProcessor>(
    mut processor: P,
    format: StreamFormat,
) -> (DuplexInput, DuplexOutput<P>) {
    let jitter_capacity = (format.bytes_per_second() * JITTER_QUEUE_MS / 1000)
        .max(format.bytes_per_frame());
    let (producer, consumer) = RingBuffer::<u8>::new(jitter_capacity);

    let scratch_capacity =
        (format.bytes_per_second() * MAX_CHUNK_MS / 1000).max(format.bytes_per_frame());
    let max_frames = scratch_capacity / format.bytes_per_frame();

    let estimated_block_size = ((format.sample_rate() / 100.0) as usize).max(1);
    processor.prepare(format.sample_rate(), estimated_block_size);

    log::debug!(
        "duplex stream: {:?}, jitter queue {} bytes, scratch {} frames",
        format,
        jitter_capacity,
        max_frames
    );

    (
        DuplexInput { producer },
        DuplexOutput {
            consumer,
            processor,
            format,
            scratch_bytes: vec![0; max_frames * format.bytes_per_frame()],
            scratch_block: AudioBlock::with_capacity(format.channels(), max_frames),
            silent_reads: 0,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::format::SampleEncoding;

    /// Records every call; scales samples so processing is observable.
    struct Recorder {
        gain: f32,
        prepared: Option<(f64, usize)>,
        calls: Vec<usize>,
    }

    impl Recorder {
        fn new(gain: f32) -> Self {
            Self {
                gain,
                prepared: None,
                calls: Vec::new(),
            }
        }
    }

    impl AudioProcessor for Recorder {
        fn prepare(&mut self, sample_rate: f64, estimated_block_size: usize) {
            self.prepared = Some((sample_rate, estimated_block_size));
        }

        fn process(&mut self, block: &mut AudioBlock) {
            self.calls.push(block.frames());
            for ch in 0..block.channel_count() {
                for sample in block.channel_mut(ch) {
                    *sample *= self.gain;
                }
            }
        }
    }

    fn float_format() -> StreamFormat {
        StreamFormat::new(48_000.0, 2, SampleEncoding::Float32).unwrap()
    }

    fn float_bytes(samples: &[f32]) -> Vec<u8> {
        samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }

    #[test]
    fn prepares_processor_once_at_setup() {
        let (_input, output) = duplex_stream(Recorder::new(1.0), float_format());
        // ~10ms at 48kHz
        assert_eq!(output.processor.prepared, Some((48_000.0, 480)));
    }

    #[test]
    fn insufficient_input_yields_silence_without_processing() {
        let (mut input, mut output) = duplex_stream(Recorder::new(1.0), float_format());

        input.push(&[0xFFu8; 40]); // 5 frames, less than requested

        let mut out = vec![0xAAu8; 80];
        assert_eq!(output.read(&mut out), 80);

        assert!(out.iter().all(|&b| b == 0));
        assert!(output.processor.calls.is_empty());
        assert_eq!(output.silent_reads(), 1);
    }

    #[test]
    fn sufficient_input_invokes_processor_once_with_exact_frames() {
        let (mut input, mut output) = duplex_stream(Recorder::new(1.0), float_format());

        // 16 frames buffered, 10 requested.
        input.push(&float_bytes(&[0.1; 32]));

        let mut out = vec![0u8; 10 * 8];
        assert_eq!(output.read(&mut out), 80);

        assert_eq!(output.processor.calls, vec![10]);
        assert_eq!(output.buffered_bytes(), 6 * 8);
    }

    #[test]
    fn processes_audio_through_the_chain() {
        let (mut input, mut output) = duplex_stream(Recorder::new(2.0), float_format());

        // Interleaved stereo: L = 0.25, R = -0.25, four frames.
        let samples = [0.25f32, -0.25, 0.25, -0.25, 0.25, -0.25, 0.25, -0.25];
        input.push(&float_bytes(&samples));

        let mut out = vec![0u8; samples.len() * 4];
        output.read(&mut out);

        for (i, chunk) in out.chunks_exact(4).enumerate() {
            let value = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            let expected = if i % 2 == 0 { 0.5 } else { -0.5 };
            assert_eq!(value, expected, "sample {i}");
        }
    }

    #[test]
    fn overfull_queue_drops_newest_bytes() {
        let format = StreamFormat::new(1_000.0, 1, SampleEncoding::Pcm16).unwrap();
        // Queue capacity: 2000 bytes/s * 0.5s = 1000 bytes.
        let (mut input, _output) = duplex_stream(Recorder::new(1.0), format);

        assert_eq!(input.push(&vec![1u8; 900]), 900);
        // Only 100 slots left; the rest of this push is discarded.
        assert_eq!(input.push(&vec![2u8; 200]), 100);
        assert_eq!(input.push(&[3u8; 4]), 0);
    }

    #[test]
    fn trailing_partial_frame_is_silence() {
        let (mut input, mut output) = duplex_stream(Recorder::new(1.0), float_format());
        input.push(&float_bytes(&[1.0; 8])); // 4 frames

        // Request 2 frames plus 3 stray bytes.
        let mut out = vec![0xEEu8; 2 * 8 + 3];
        assert_eq!(output.read(&mut out), 19);

        assert_eq!(output.processor.calls, vec![2]);
        assert!(out[16..].iter().all(|&b| b == 0));
    }

    #[test]
    fn silence_then_signal_once_enough_arrives() {
        let (mut input, mut output) = duplex_stream(Recorder::new(1.0), float_format());
        let mut out = vec![0u8; 8 * 8];

        assert_eq!(output.read(&mut out), 64);
        assert_eq!(output.silent_reads(), 1);

        input.push(&float_bytes(&[0.5; 16])); // 8 frames
        output.read(&mut out);

        assert_eq!(output.silent_reads(), 1);
        let first = f32::from_le_bytes([out[0], out[1], out[2], out[3]]);
        assert_eq!(first, 0.5);
    }
}
