use crate::error::{StreamError, StreamResult};

/// Sample encoding on the wire. Only the two encodings the conversion
/// kernels support are representable; anything else is rejected at setup by
/// [`SampleEncoding::from_wire`], never mis-converted per block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SampleEncoding {
    /// 16-bit signed integer PCM, little endian.
    Pcm16,
    /// 32-bit IEEE float, little endian.
    Float32,
}

impl SampleEncoding {
    /// Map a device-reported wire format onto a supported encoding.
    pub fn from_wire(bits_per_sample: u16, ieee_float: bool) -> StreamResult<Self> {
        match (bits_per_sample, ieee_float) {
            (16, false) => Ok(Self::Pcm16),
            (32, true) => Ok(Self::Float32),
            _ => Err(StreamError::UnsupportedEncoding {
                bits_per_sample,
                ieee_float,
            }),
        }
    }

    pub fn bytes_per_sample(self) -> usize {
        match self {
            Self::Pcm16 => 2,
            Self::Float32 => 4,
        }
    }
}

/// The negotiated wire format of a duplex stream.
///
/// Construction validates everything, so a `StreamFormat` in hand is always
/// usable; the audio thread never re-checks it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreamFormat {
    sample_rate: f64,
    channels: usize,
    encoding: SampleEncoding,
}

impl StreamFormat {
    pub fn new(sample_rate: f64, channels: usize, encoding: SampleEncoding) -> StreamResult<Self> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(StreamError::InvalidSampleRate(sample_rate));
        }
        if channels == 0 {
            return Err(StreamError::NoChannels);
        }
        Ok(Self {
            sample_rate,
            channels,
            encoding,
        })
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn encoding(&self) -> SampleEncoding {
        self.encoding
    }

    /// Bytes for one frame (one sample per channel).
    pub fn bytes_per_frame(&self) -> usize {
        self.channels * self.encoding.bytes_per_sample()
    }

    /// Average byte throughput, used to size jitter and scratch buffers.
    pub fn bytes_per_second(&self) -> usize {
        (self.sample_rate as usize) * self.bytes_per_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_supported_wire_formats() {
        assert_eq!(SampleEncoding::from_wire(16, false), Ok(SampleEncoding::Pcm16));
        assert_eq!(SampleEncoding::from_wire(32, true), Ok(SampleEncoding::Float32));
    }

    #[test]
    fn rejects_unsupported_wire_formats() {
        for (bits, float) in [(24, false), (8, false), (32, false), (64, true), (16, true)] {
            assert_eq!(
                SampleEncoding::from_wire(bits, float),
                Err(StreamError::UnsupportedEncoding {
                    bits_per_sample: bits,
                    ieee_float: float
                })
            );
        }
    }

    #[test]
    fn computes_frame_and_throughput_sizes() {
        let pcm = StreamFormat::new(44_100.0, 2, SampleEncoding::Pcm16).unwrap();
        assert_eq!(pcm.bytes_per_frame(), 4);
        assert_eq!(pcm.bytes_per_second(), 176_400);

        let float = StreamFormat::new(48_000.0, 2, SampleEncoding::Float32).unwrap();
        assert_eq!(float.bytes_per_frame(), 8);
        assert_eq!(float.bytes_per_second(), 384_000);
    }

    #[test]
    fn rejects_degenerate_formats() {
        assert_eq!(
            StreamFormat::new(0.0, 2, SampleEncoding::Float32),
            Err(StreamError::InvalidSampleRate(0.0))
        );
        assert!(StreamFormat::new(f64::NAN, 2, SampleEncoding::Float32).is_err());
        assert_eq!(
            StreamFormat::new(48_000.0, 0, SampleEncoding::Float32),
            Err(StreamError::NoChannels)
        );
    }
}
