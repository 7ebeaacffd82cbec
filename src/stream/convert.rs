//! Conversion between interleaved wire bytes and planar float channels.
//!
//! Interleaved means samples cycle through channels frame by frame
//! (`[L, R, L, R, ...]`); planar means each channel is contiguous
//! (`[L, L, ...]`, `[R, R, ...]`). Float32 converts by reinterpreting the
//! little-endian bytes; Pcm16 scales by 1/32768 inbound and, outbound,
//! hard-clips to [-1, 1] then scales by 32767, rounding to the nearest
//! step, so overs saturate instead of wrapping around.

use crate::buffer::AudioBlock;
use crate::stream::format::SampleEncoding;

const PCM16_IN_SCALE: f32 = 1.0 / 32768.0;
const PCM16_OUT_SCALE: f32 = 32767.0;

/// Split interleaved `bytes` into the planar channels of `block`.
///
/// `bytes` must hold exactly `block.frames() * block.channel_count()`
/// samples in the given encoding.
pub fn deinterleave(bytes: &[u8], encoding: SampleEncoding, block: &mut AudioBlock) {
    let channels = block.channel_count();
    debug_assert_eq!(
        bytes.len(),
        block.frames() * channels * encoding.bytes_per_sample()
    );

    match encoding {
        SampleEncoding::Float32 => {
            for ch in 0..channels {
                let dest = block.channel_mut(ch);
                for (frame, sample) in dest.iter_mut().enumerate() {
                    let at = (frame * channels + ch) * 4;
                    *sample = f32::from_le_bytes([
                        bytes[at],
                        bytes[at + 1],
                        bytes[at + 2],
                        bytes[at + 3],
                    ]);
                }
            }
        }
        SampleEncoding::Pcm16 => {
            for ch in 0..channels {
                let dest = block.channel_mut(ch);
                for (frame, sample) in dest.iter_mut().enumerate() {
                    let at = (frame * channels + ch) * 2;
                    let raw = i16::from_le_bytes([bytes[at], bytes[at + 1]]);
                    *sample = raw as f32 * PCM16_IN_SCALE;
                }
            }
        }
    }
}

/// Merge the planar channels of `block` back into interleaved `bytes`.
///
/// The inverse of [`deinterleave`]; `bytes` must be sized the same way.
pub fn interleave(block: &AudioBlock, encoding: SampleEncoding, bytes: &mut [u8]) {
    let channels = block.channel_count();
    debug_assert_eq!(
        bytes.len(),
        block.frames() * channels * encoding.bytes_per_sample()
    );

    match encoding {
        SampleEncoding::Float32 => {
            for ch in 0..channels {
                for (frame, &sample) in block.channel(ch).iter().enumerate() {
                    let at = (frame * channels + ch) * 4;
                    bytes[at..at + 4].copy_from_slice(&sample.to_le_bytes());
                }
            }
        }
        SampleEncoding::Pcm16 => {
            for ch in 0..channels {
                for (frame, &sample) in block.channel(ch).iter().enumerate() {
                    let at = (frame * channels + ch) * 2;
                    let clipped = sample.clamp(-1.0, 1.0);
                    // Round to nearest; the clamp keeps the product inside
                    // i16 range, so the cast cannot wrap.
                    let raw = (clipped * PCM16_OUT_SCALE).round() as i16;
                    bytes[at..at + 2].copy_from_slice(&raw.to_le_bytes());
                }
            }
        }
    }
}
