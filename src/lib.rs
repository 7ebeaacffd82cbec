pub mod adaptor; // Fixed-block decoupling between callback and DSP rates
pub mod buffer;
pub mod error;
pub mod processor;
pub mod stream; // Byte-level duplex streaming and format conversion

pub use adaptor::BlockAdaptor;
pub use buffer::{AudioBlock, RingBuffer};
pub use error::StreamError;
pub use processor::{AudioProcessor, Gain, Passthrough};
pub use stream::{duplex_stream, DuplexInput, DuplexOutput, SampleEncoding, StreamFormat};
