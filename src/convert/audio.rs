use crate::format::audio::AudioFormat;
use crate::foundation::error::{FrameError, FrameResult};
use crate::frame::buffer::Audio;

const I32_SCALE: f64 = 2_147_483_648.0;

/// Convert `audio` into `target`.
pub(crate) fn convert(audio: &Audio, target: AudioFormat) -> FrameResult<Audio> {
    if audio.format == target {
        return Ok(audio.clone());
    }
    if audio.format == AudioFormat::None || target == AudioFormat::None {
        return Err(FrameError::unsupported_format(format!(
            "no audio conversion from {} to {}",
            audio.format, target
        )));
    }
    audio.ensure_consistent()?;

    tracing::debug!(
        from = %audio.format,
        to = %target,
        channels = audio.channels,
        samples = audio.samples,
        "converting audio"
    );

    let data = if audio.format.is_float() && target.is_float() {
        encode_f32(target, audio.samples, audio.channels, &decode_f32(audio))
    } else {
        encode_i32(target, audio.samples, audio.channels, &decode_i32(audio))
    };
    Audio::new(target, audio.frequency, audio.channels, audio.samples, data)
}

/// Scale every sample by `gain`, saturating at the encoding's range.
pub(crate) fn apply_gain(audio: &mut Audio, gain: f64) {
    if gain == 1.0 || audio.format == AudioFormat::None {
        return;
    }
    let (format, samples, channels) = (audio.format, audio.samples, audio.channels);
    let data = if format.is_float() {
        let scaled: Vec<f32> = decode_f32(audio)
            .into_iter()
            .map(|s| (f64::from(s) * gain) as f32)
            .collect();
        encode_f32(format, samples, channels, &scaled)
    } else {
        let scaled: Vec<i32> = decode_i32(audio)
            .into_iter()
            .map(|s| (f64::from(s) * gain).clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32)
            .collect();
        encode_i32(format, samples, channels, &scaled)
    };
    *audio.data_mut() = data;
}

fn sample_offset(format: AudioFormat, i: usize, c: usize, samples: usize, channels: usize) -> usize {
    let slot = if format.is_planar() {
        c * samples + i
    } else {
        i * channels + c
    };
    slot * format.bytes_per_sample()
}

/// Interleaved samples scaled to the full `i32` range.
fn decode_i32(audio: &Audio) -> Vec<i32> {
    let (samples, channels) = (audio.samples as usize, usize::from(audio.channels));
    let src = audio.data();
    let mut out = Vec::with_capacity(samples * channels);
    for i in 0..samples {
        for c in 0..channels {
            let o = sample_offset(audio.format, i, c, samples, channels);
            let v = match audio.format {
                AudioFormat::None => 0,
                AudioFormat::U8 => (i32::from(src[o]) - 128) << 24,
                AudioFormat::S16 => i32::from(i16::from_le_bytes([src[o], src[o + 1]])) << 16,
                AudioFormat::S32 | AudioFormat::S32le => {
                    i32::from_le_bytes([src[o], src[o + 1], src[o + 2], src[o + 3]])
                }
                AudioFormat::Float | AudioFormat::F32le => {
                    let f = f32::from_le_bytes([src[o], src[o + 1], src[o + 2], src[o + 3]]);
                    (f64::from(f).clamp(-1.0, 1.0) * I32_SCALE)
                        .clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
                }
            };
            out.push(v);
        }
    }
    out
}

fn encode_i32(format: AudioFormat, samples: u32, channels: u16, interleaved: &[i32]) -> Vec<u8> {
    let (samples, channels) = (samples as usize, usize::from(channels));
    let mut out = vec![0u8; samples * channels * format.bytes_per_sample()];
    for i in 0..samples {
        for c in 0..channels {
            let v = interleaved[i * channels + c];
            let o = sample_offset(format, i, c, samples, channels);
            match format {
                AudioFormat::None => {}
                AudioFormat::U8 => out[o] = ((v >> 24) + 128) as u8,
                AudioFormat::S16 => out[o..o + 2].copy_from_slice(&((v >> 16) as i16).to_le_bytes()),
                AudioFormat::S32 | AudioFormat::S32le => {
                    out[o..o + 4].copy_from_slice(&v.to_le_bytes())
                }
                AudioFormat::Float | AudioFormat::F32le => {
                    let f = (f64::from(v) / I32_SCALE) as f32;
                    out[o..o + 4].copy_from_slice(&f.to_le_bytes())
                }
            }
        }
    }
    out
}

fn decode_f32(audio: &Audio) -> Vec<f32> {
    let (samples, channels) = (audio.samples as usize, usize::from(audio.channels));
    let src = audio.data();
    let mut out = Vec::with_capacity(samples * channels);
    for i in 0..samples {
        for c in 0..channels {
            let o = sample_offset(audio.format, i, c, samples, channels);
            out.push(f32::from_le_bytes([src[o], src[o + 1], src[o + 2], src[o + 3]]));
        }
    }
    out
}

fn encode_f32(format: AudioFormat, samples: u32, channels: u16, interleaved: &[f32]) -> Vec<u8> {
    let (samples, channels) = (samples as usize, usize::from(channels));
    let mut out = vec![0u8; samples * channels * 4];
    for i in 0..samples {
        for c in 0..channels {
            let o = sample_offset(format, i, c, samples, channels);
            out[o..o + 4].copy_from_slice(&interleaved[i * channels + c].to_le_bytes());
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/convert/audio.rs"]
mod tests;
