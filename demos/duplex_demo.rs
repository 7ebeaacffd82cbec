//! Live duplex loopback: default input device -> gain stage -> default
//! output device.
//!
//! Run with: cargo run --example duplex_demo --features cpal-demo
//!
//! Careful with speakers + microphone on the same machine: this will feed
//! back. Headphones recommended.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use duplex_dsp::{duplex_stream, BlockAdaptor, Gain, SampleEncoding, StreamFormat};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let host = cpal::default_host();
    let input_device = host
        .default_input_device()
        .ok_or("no default input device available")?;
    let output_device = host
        .default_output_device()
        .ok_or("no default output device available")?;

    let in_config = input_device.default_input_config()?;
    let out_config = output_device.default_output_config()?;

    if in_config.sample_format() != cpal::SampleFormat::F32
        || out_config.sample_format() != cpal::SampleFormat::F32
    {
        return Err("demo requires f32 devices on both ends".into());
    }
    if in_config.sample_rate() != out_config.sample_rate()
        || in_config.channels() != out_config.channels()
    {
        return Err("demo requires matching input/output rate and channels".into());
    }

    let sample_rate = out_config.sample_rate().0 as f64;
    let channels = out_config.channels() as usize;
    let format = StreamFormat::new(sample_rate, channels, SampleEncoding::Float32)?;

    println!(
        "duplex loopback: {} ch @ {} Hz, fixed DSP block of 256 frames",
        channels, sample_rate
    );

    // The signal chain: a fixed-block gain stage behind the adaptor. Swap
    // Gain for any AudioProcessor to hear your own DSP.
    let adaptor = BlockAdaptor::new(Gain::new(0.8), 256)?;
    let (mut duplex_in, mut duplex_out) = duplex_stream(adaptor, format);

    // Byte scratch reused by each callback; sized generously up front so
    // the callbacks never allocate.
    let mut capture_bytes = vec![0u8; format.bytes_per_second() / 5];
    let input_stream = input_device.build_input_stream(
        &in_config.into(),
        move |data: &[f32], _: &cpal::InputCallbackInfo| {
            let needed = data.len() * 4;
            if needed > capture_bytes.len() {
                return; // chunk larger than we sized for, skip it
            }
            for (sample, slot) in data.iter().zip(capture_bytes.chunks_exact_mut(4)) {
                slot.copy_from_slice(&sample.to_le_bytes());
            }
            duplex_in.push(&capture_bytes[..needed]);
        },
        |err| eprintln!("input stream error: {err}"),
        None,
    )?;

    let mut render_bytes = vec![0u8; format.bytes_per_second() / 5];
    let output_stream = output_device.build_output_stream(
        &out_config.into(),
        move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
            let needed = data.len() * 4;
            if needed > render_bytes.len() {
                data.fill(0.0);
                return;
            }
            duplex_out.read(&mut render_bytes[..needed]);
            for (sample, slot) in data.iter_mut().zip(render_bytes.chunks_exact(4)) {
                *sample = f32::from_le_bytes([slot[0], slot[1], slot[2], slot[3]]);
            }
        },
        |err| eprintln!("output stream error: {err}"),
        None,
    )?;

    input_stream.play()?;
    output_stream.play()?;

    println!("streaming; press Enter to stop");
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;

    Ok(())
}
