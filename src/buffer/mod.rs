//! Sample storage primitives shared by the adaptor and the stream codec.
//!
//! Both types are allocation-free after construction, making them safe to
//! touch from an audio callback. They intentionally stay dumb: policy
//! decisions (what to do on overflow or underrun) live with their callers.

/// Multichannel planar block of samples.
pub mod block;
/// Fixed-capacity single-channel FIFO.
pub mod ring;

pub use block::AudioBlock;
pub use ring::RingBuffer;
