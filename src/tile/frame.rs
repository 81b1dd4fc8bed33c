use crate::foundation::error::{TilesetError, TilesetResult};
use crate::foundation::geometry::GridGeometry;
use crate::foundation::raster::{rounded_rect_inclusive, stroke_rounded_rect};
use crate::tile::processor::TilePair;

/// Which of the two bonus groups a tile belongs to (0 or 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BonusGroupId(pub u8);

/// Draw the bonus outline on both variants of a tile.
///
/// The outline shape comes from `geometry.frame` and is the same for both groups; only
/// the colours differ. A group id the geometry does not define is a layout error.
pub fn apply_bonus_frame(
    pair: &mut TilePair,
    group: BonusGroupId,
    geometry: &GridGeometry,
) -> TilesetResult<()> {
    let Some(group_style) = geometry.bonus_groups.get(usize::from(group.0)) else {
        return Err(TilesetError::layout(format!(
            "bonus group {} is not defined (expected 0..{})",
            group.0,
            geometry.bonus_groups.len()
        )));
    };
    let f = &geometry.frame;
    let rect = rounded_rect_inclusive(f.left, f.top, f.right, f.bottom, f.radius);
    let width = f64::from(f.width);

    stroke_rounded_rect(&mut pair.normal, rect, width, group_style.color.to_rgba());
    stroke_rounded_rect(&mut pair.selected, rect, width, group_style.selected_color.to_rgba());
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/tile/frame.rs"]
mod tests;
