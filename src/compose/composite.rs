use image::RgbaImage;

/// Straight-alpha RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Source-over compositing of straight-alpha pixels.
pub fn over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    let sa = u32::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let da = u32::from(dst[3]);
    let inv = 255 - sa;

    // Both scaled by 255 so the final division rounds once.
    let a_num = sa * 255 + da * inv;
    if a_num == 0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let c_num = u32::from(src[i]) * sa * 255 + u32::from(dst[i]) * da * inv;
        out[i] = div_round(c_num, a_num).min(255) as u8;
    }
    out[3] = div_round(a_num, 255).min(255) as u8;
    out
}

/// Composite `src` onto `dst` with its top-left corner at (`x`, `y`), clipped to `dst`.
pub fn paste_over(dst: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    for_each_overlap(dst, src, x, y, |d, s| *d = over(*d, s));
}

/// Copy `src` into `dst` at (`x`, `y`), replacing every covered pixel, clipped to `dst`.
pub fn paste_replace(dst: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    for_each_overlap(dst, src, x, y, |d, s| *d = s);
}

/// `true` when every pixel is fully opaque.
pub fn is_opaque(img: &RgbaImage) -> bool {
    img.pixels().all(|p| p.0[3] == 255)
}

/// Multiply RGB by `factor` (clamped), leaving alpha untouched.
pub fn brighten_in_place(img: &mut RgbaImage, factor: f32) {
    let factor = factor.max(0.0);
    for px in img.pixels_mut() {
        for c in &mut px.0[..3] {
            *c = (f32::from(*c) * factor).round().clamp(0.0, 255.0) as u8;
        }
    }
}

fn for_each_overlap(
    dst: &mut RgbaImage,
    src: &RgbaImage,
    x: i64,
    y: i64,
    mut f: impl FnMut(&mut Rgba8, Rgba8),
) {
    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    let (sw, sh) = (i64::from(src.width()), i64::from(src.height()));

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + sw).min(dw);
    let y1 = (y + sh).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    for dy in y0..y1 {
        for dx in x0..x1 {
            let s = src.get_pixel((dx - x) as u32, (dy - y) as u32).0;
            let d = dst.get_pixel_mut(dx as u32, dy as u32);
            f(&mut d.0, s);
        }
    }
}

fn div_round(num: u32, den: u32) -> u32 {
    (num + den / 2) / den
}

#[cfg(test)]
#[path = "../../tests/unit/compose/composite.rs"]
mod tests;
