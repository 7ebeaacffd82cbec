//! Byte-level duplex streaming: the bridge between a device's interleaved
//! wire format and the planar-float blocks the processing stages consume.
//!
//! A duplex stream splits into two halves joined by a lock-free jitter
//! queue: the capture thread pushes raw bytes in, the render thread pulls
//! processed bytes out. All conversion and processing happens on the render
//! side, synchronously inside [`DuplexOutput::read`].

/// Interleaved-byte to planar-float conversion kernels.
pub mod convert;
/// The two thread-facing halves of a duplex stream.
pub mod duplex;
/// Negotiated wire format description.
pub mod format;

pub use duplex::{duplex_stream, DuplexInput, DuplexOutput};
pub use format::{SampleEncoding, StreamFormat};
