//! Setup-time error types.
//!
//! Streaming itself never fails: underruns resolve to silence and overflow
//! drops the newest data. Everything that can go wrong is rejected up front,
//! before the audio thread ever runs.

use thiserror::Error;

/// Errors raised while configuring a stream or adaptor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StreamError {
    /// The fixed block size of a [`BlockAdaptor`](crate::BlockAdaptor) was zero.
    #[error("fixed block size must be at least one frame")]
    ZeroBlockSize,

    /// A stream format was declared with no channels.
    #[error("stream format must have at least one channel")]
    NoChannels,

    /// The sample rate was zero, negative, or not finite.
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(f64),

    /// The device's wire format has no supported conversion. Only 16-bit
    /// integer PCM and 32-bit IEEE float are handled.
    #[error("unsupported sample encoding: {bits_per_sample}-bit (ieee float: {ieee_float})")]
    UnsupportedEncoding { bits_per_sample: u16, ieee_float: bool },
}

/// Result type for stream setup operations.
pub type StreamResult<T> = Result<T, StreamError>;
