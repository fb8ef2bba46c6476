use image::GrayImage;

/// Render interleaved signed 16-bit PCM as an 8-bit level image.
///
/// The height is split into one band per channel. Each column covers `samples / width` samples
/// (at least one); each sample draws a vertical line from the band centre, upwards for positive
/// values and downwards for negative ones, proportional to its magnitude. Overlapping lines in a
/// column accumulate brightness and line ends are drawn at full intensity.
pub fn render_waveform(pcm: &[i16], channels: u16, width: u32, height: u32) -> GrayImage {
    let mut bitmap = GrayImage::new(width, height);
    let (w, h) = (width as usize, height as usize);
    let channels = usize::from(channels);
    if w == 0 || h == 0 || channels == 0 {
        return bitmap;
    }

    let samples = pcm.len() / channels;
    let skip = (samples / w).max(1);
    let gray = (255 / skip) as u8;
    let pixels: &mut [u8] = &mut bitmap;

    for (i, frame) in pcm.chunks_exact(channels).enumerate() {
        let x = i / skip;
        if x >= w {
            break;
        }
        for (j, &sample) in frame.iter().enumerate() {
            let magnitude = i32::from(sample).unsigned_abs() as usize;
            let line = h * magnitude / channels / 2 / 32_768;
            let centre = h * (j * 2 + 1) / channels / 2;
            let top = if sample < 0 { centre } else { centre - line };

            for k in 0..=line {
                let y = top + k;
                if y >= h {
                    break;
                }
                let px = &mut pixels[y * w + x];
                let end = if sample < 0 { k == 0 } else { k == line };
                *px = if end { u8::MAX } else { px.saturating_add(gray) };
            }
        }
    }
    bitmap
}

#[cfg(test)]
#[path = "../../tests/unit/audio/waveform.rs"]
mod tests;
