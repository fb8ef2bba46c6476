use crate::format::image::ImageFormat;
use crate::foundation::error::{FrameError, FrameResult};
use crate::frame::buffer::Image;

/// Convert `image` into `target` through an 8-bit RGBA intermediate.
pub(crate) fn convert(image: &Image, target: ImageFormat) -> FrameResult<Image> {
    if image.format == target {
        return Ok(image.clone());
    }
    if image.format == ImageFormat::None || target == ImageFormat::None {
        return Err(FrameError::unsupported_format(format!(
            "no image conversion from {} to {}",
            image.format, target
        )));
    }
    image.ensure_consistent()?;

    tracing::debug!(
        from = %image.format,
        to = %target,
        width = image.width,
        height = image.height,
        "converting image"
    );

    let rgba = to_rgba(image);
    let data = from_rgba(&rgba, image.width, image.height, target);
    Image::new(target, image.width, image.height, data)
}

/// Alpha plane of an alpha-carrying image; `None` when the bytes do not cover its size.
pub(crate) fn extract_alpha(image: &Image) -> Option<Vec<u8>> {
    if !image.format.has_alpha() {
        return None;
    }
    let pixels = image.data().get(..image.pixel_count() * 4)?;
    Some(pixels.chunks_exact(4).map(|p| p[3]).collect())
}

pub(crate) fn rgb_to_yuv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));
    let y = ((263 * r + 516 * g + 100 * b) >> 10) + 16;
    let u = ((-152 * r - 298 * g + 450 * b) >> 10) + 128;
    let v = ((450 * r - 377 * g - 73 * b) >> 10) + 128;
    (clamp_u8(y), clamp_u8(u), clamp_u8(v))
}

pub(crate) fn yuv_to_rgb(y: u8, u: u8, v: u8) -> (u8, u8, u8) {
    let (y, u, v) = (i32::from(y) - 16, i32::from(u) - 128, i32::from(v) - 128);
    let r = (1192 * y + 1634 * v) >> 10;
    let g = (1192 * y - 832 * v - 400 * u) >> 10;
    let b = (1192 * y + 2066 * u) >> 10;
    (clamp_u8(r), clamp_u8(g), clamp_u8(b))
}

fn clamp_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

fn to_rgba(image: &Image) -> Vec<u8> {
    let (w, h) = (image.width as usize, image.height as usize);
    let src = image.data();
    let mut out = Vec::with_capacity(w * h * 4);

    match image.format {
        ImageFormat::None => {}
        ImageFormat::Rgb24a => out.extend_from_slice(&src[..w * h * 4]),
        ImageFormat::Rgb24 => {
            for p in src[..w * h * 3].chunks_exact(3) {
                out.extend_from_slice(&[p[0], p[1], p[2], 255]);
            }
        }
        ImageFormat::Yuv422 => {
            let stride = w.div_ceil(2) * 4;
            for row in 0..h {
                let line = &src[row * stride..(row + 1) * stride];
                for x in 0..w {
                    let quad = &line[(x / 2) * 4..(x / 2) * 4 + 4];
                    let y = if x % 2 == 0 { quad[0] } else { quad[2] };
                    let (r, g, b) = yuv_to_rgb(y, quad[1], quad[3]);
                    out.extend_from_slice(&[r, g, b, 255]);
                }
            }
        }
        ImageFormat::Yuv420p => {
            let cw = w.div_ceil(2);
            let ch = h.div_ceil(2);
            let (luma, chroma) = src.split_at(w * h);
            let (u_plane, v_plane) = chroma.split_at(cw * ch);
            for row in 0..h {
                for x in 0..w {
                    let ci = (row / 2) * cw + x / 2;
                    let (r, g, b) = yuv_to_rgb(luma[row * w + x], u_plane[ci], v_plane[ci]);
                    out.extend_from_slice(&[r, g, b, 255]);
                }
            }
        }
    }
    out
}

fn from_rgba(rgba: &[u8], width: u32, height: u32, target: ImageFormat) -> Vec<u8> {
    let (w, h) = (width as usize, height as usize);
    let px = |x: usize, y: usize| {
        let i = (y * w + x) * 4;
        (rgba[i], rgba[i + 1], rgba[i + 2])
    };

    match target {
        ImageFormat::None => Vec::new(),
        ImageFormat::Rgb24a => rgba.to_vec(),
        ImageFormat::Rgb24 => rgba
            .chunks_exact(4)
            .flat_map(|p| [p[0], p[1], p[2]])
            .collect(),
        ImageFormat::Yuv422 => {
            let mut out = Vec::with_capacity(target.buffer_size(width, height));
            for row in 0..h {
                for x in (0..w).step_by(2) {
                    let (y0, u0, v0) = {
                        let (r, g, b) = px(x, row);
                        rgb_to_yuv(r, g, b)
                    };
                    let (y1, u1, v1) = {
                        let (r, g, b) = px((x + 1).min(w - 1), row);
                        rgb_to_yuv(r, g, b)
                    };
                    out.extend_from_slice(&[y0, avg(&[u0, u1]), y1, avg(&[v0, v1])]);
                }
            }
            out
        }
        ImageFormat::Yuv420p => {
            let cw = w.div_ceil(2);
            let ch = h.div_ceil(2);
            let mut luma = Vec::with_capacity(w * h);
            let mut u_plane = Vec::with_capacity(cw * ch);
            let mut v_plane = Vec::with_capacity(cw * ch);
            for row in 0..h {
                for x in 0..w {
                    let (r, g, b) = px(x, row);
                    luma.push(rgb_to_yuv(r, g, b).0);
                }
            }
            for cy in 0..ch {
                for cx in 0..cw {
                    let mut us = Vec::with_capacity(4);
                    let mut vs = Vec::with_capacity(4);
                    for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                        let (x, y) = (cx * 2 + dx, cy * 2 + dy);
                        if x < w && y < h {
                            let (r, g, b) = px(x, y);
                            let (_, u, v) = rgb_to_yuv(r, g, b);
                            us.push(u);
                            vs.push(v);
                        }
                    }
                    u_plane.push(avg(&us));
                    v_plane.push(avg(&vs));
                }
            }
            luma.extend_from_slice(&u_plane);
            luma.extend_from_slice(&v_plane);
            luma
        }
    }
}

fn avg(values: &[u8]) -> u8 {
    if values.is_empty() {
        return 128;
    }
    let sum: u32 = values.iter().map(|&v| u32::from(v)).sum();
    let n = values.len() as u32;
    ((sum + n / 2) / n) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/convert/image.rs"]
mod tests;
