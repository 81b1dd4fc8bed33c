use anyhow::Context as _;
use fast_image_resize as fr;
use image::RgbaImage;

use crate::foundation::error::{TilesetError, TilesetResult};
use crate::params::parser::Resample;

/// Resize straight-alpha RGBA8 pixels to exactly `width` x `height`.
///
/// Convolution filters run on alpha-premultiplied pixels (the resizer's default), so
/// transparent regions do not bleed dark fringes into the result.
pub fn resize_rgba(
    src: &RgbaImage,
    width: u32,
    height: u32,
    resample: Resample,
) -> TilesetResult<RgbaImage> {
    let (src_width, src_height) = src.dimensions();
    let src_image = fr::images::Image::from_vec_u8(
        src_width,
        src_height,
        src.as_raw().clone(),
        fr::PixelType::U8x4,
    )
    .context("wrap source pixels for resizing")?;

    let mut dst_image = fr::images::Image::new(width, height, fr::PixelType::U8x4);

    let mut resizer = fr::Resizer::new();
    let options = fr::ResizeOptions::new().resize_alg(resize_alg(resample));
    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .with_context(|| {
            format!("resize {src_width}x{src_height} -> {width}x{height} ({resample})")
        })?;

    rgba_from_buffer(width, height, dst_image.into_vec())
}

fn rgba_from_buffer(width: u32, height: u32, buf: Vec<u8>) -> TilesetResult<RgbaImage> {
    let len = buf.len();
    RgbaImage::from_raw(width, height, buf).ok_or_else(|| {
        TilesetError::Io(anyhow::anyhow!(
            "resized buffer of {len} bytes does not hold {width}x{height} RGBA pixels"
        ))
    })
}

fn resize_alg(resample: Resample) -> fr::ResizeAlg {
    match resample {
        Resample::Nearest => fr::ResizeAlg::Nearest,
        Resample::Box => fr::ResizeAlg::Convolution(fr::FilterType::Box),
        Resample::Bilinear => fr::ResizeAlg::Convolution(fr::FilterType::Bilinear),
        Resample::Hamming => fr::ResizeAlg::Convolution(fr::FilterType::Hamming),
        Resample::Bicubic => fr::ResizeAlg::Convolution(fr::FilterType::CatmullRom),
        Resample::Lanczos => fr::ResizeAlg::Convolution(fr::FilterType::Lanczos3),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tile/resample.rs"]
mod tests;
