use image::{Rgba, RgbaImage};
use kurbo::{Point, Rect, RoundedRect, Shape};

/// Rounded rectangle covering the inclusive pixel box `left..=right` x `top..=bottom`.
pub fn rounded_rect_inclusive(
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
    radius: f64,
) -> RoundedRect {
    RoundedRect::new(
        f64::from(left),
        f64::from(top),
        f64::from(right) + 1.0,
        f64::from(bottom) + 1.0,
        radius,
    )
}

/// Overwrite every pixel whose centre lies inside `shape`. No anti-aliasing.
pub fn fill_shape(img: &mut RgbaImage, shape: &impl Shape, color: Rgba<u8>) {
    fill_where(img, shape.bounding_box(), color, |p| shape.contains(p));
}

/// Overwrite the pixels of a `width`-pixel outline drawn inward from `rect`'s edge.
pub fn stroke_rounded_rect(
    img: &mut RgbaImage,
    rect: RoundedRect,
    width: f64,
    color: Rgba<u8>,
) {
    let outer = rect.rect();
    let inner_box = outer.inset(-width);
    let inner = (inner_box.width() > 0.0 && inner_box.height() > 0.0).then(|| {
        let radius = (rect.radii().top_left - width).max(0.0);
        RoundedRect::from_rect(inner_box, radius)
    });

    fill_where(img, outer, color, |p| {
        rect.contains(p) && !inner.is_some_and(|inner| inner.contains(p))
    });
}

fn fill_where(
    img: &mut RgbaImage,
    bounds: Rect,
    color: Rgba<u8>,
    inside: impl Fn(Point) -> bool,
) {
    let x0 = bounds.x0.floor().max(0.0) as u32;
    let y0 = bounds.y0.floor().max(0.0) as u32;
    let x1 = (bounds.x1.ceil().max(0.0) as u32).min(img.width());
    let y1 = (bounds.y1.ceil().max(0.0) as u32).min(img.height());

    for y in y0..y1 {
        for x in x0..x1 {
            let centre = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            if inside(centre) {
                img.put_pixel(x, y, color);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/raster.rs"]
mod tests;
