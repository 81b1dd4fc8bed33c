use std::borrow::Cow;

use image::RgbaImage;

use crate::assets::template::Template;
use crate::compose::composite::{brighten_in_place, paste_over};
use crate::foundation::error::TilesetResult;
use crate::foundation::geometry::GridGeometry;
use crate::params::parser::{ParamKey, TileParams};
use crate::tile::resample::resize_rgba;

/// A finished tile face in both of its variants, each exactly one tile in size.
#[derive(Clone, Debug, PartialEq)]
pub struct TilePair {
    /// Face as drawn normally.
    pub normal: RgbaImage,
    /// Face as drawn while selected.
    pub selected: RgbaImage,
}

/// Size the source is scaled to so it fits the content box with its aspect ratio kept.
///
/// Landscape images are first fitted by width, everything else by height; if the other
/// side then overflows, the scale is reduced by the overflow ratio. Sizes are truncated
/// and never drop below one pixel.
pub fn fit_size(width: u32, height: u32, geometry: &GridGeometry) -> (u32, u32) {
    let (w, h) = (f64::from(width.max(1)), f64::from(height.max(1)));
    let cw = f64::from(geometry.content_width);
    let ch = f64::from(geometry.content_height);

    let scale = if width > height {
        let mut scale = cw / w;
        let scaled_h = (scale * h).trunc();
        if scaled_h > ch {
            scale *= ch / scaled_h;
        }
        scale
    } else {
        let mut scale = ch / h;
        let scaled_w = (scale * w).trunc();
        if scaled_w > cw {
            scale *= cw / scaled_w;
        }
        scale
    };

    let fit = |v: f64, limit: u32| ((scale * v).trunc() as u32).clamp(1, limit);
    (fit(w, geometry.content_width), fit(h, geometry.content_height))
}

/// Scale `src` into the content box and stamp it onto the blank tiles.
///
/// Output is fully determined by the inputs.
pub fn process_tile(
    src: &RgbaImage,
    params: &TileParams,
    geometry: &GridGeometry,
    template: &Template,
) -> TilesetResult<TilePair> {
    let (w, h) = fit_size(src.width(), src.height(), geometry);
    let scaled = run_param_stages(src, params, (w, h))?;

    let x = i64::from(geometry.content_offset_x)
        + i64::from(geometry.tile_width.saturating_sub(w) / 2);
    let y = i64::from(geometry.content_offset_y)
        + i64::from(geometry.tile_height.saturating_sub(h) / 2);

    let mut normal = template.blank.clone();
    paste_over(&mut normal, &scaled, x, y);

    let mut highlighted = scaled;
    brighten_in_place(&mut highlighted, geometry.selected_brightness);
    let mut selected = template.blank_selected.clone();
    paste_over(&mut selected, &highlighted, x, y);

    Ok(TilePair { normal, selected })
}

/// Apply each parameter stage to the content, in [`ParamKey::ALL`] order.
fn run_param_stages(
    src: &RgbaImage,
    params: &TileParams,
    (width, height): (u32, u32),
) -> TilesetResult<RgbaImage> {
    let mut img = Cow::Borrowed(src);
    for key in ParamKey::ALL {
        img = match key {
            ParamKey::Resample => Cow::Owned(resize_rgba(&img, width, height, params.resample)?),
        };
    }
    Ok(img.into_owned())
}

#[cfg(test)]
#[path = "../../tests/unit/tile/processor.rs"]
mod tests;
