use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::color::HexColor;
use crate::foundation::error::{TilesetError, TilesetResult};

/// Number of tiles in each bonus group.
pub const BONUS_GROUP_SIZE: u32 = 4;

/// Largest tileset canvas accepted, in pixels (1 GiB of RGBA8).
pub const MAX_CANVAS_PIXELS: u64 = 1 << 28;

/// Grid and tile geometry of the target theme format.
///
/// The defaults reproduce the tile layout of GNOME Mahjongg's `smooth` theme: 96x132
/// tiles laid out in one row pair of 43 columns, normal faces on top and selected faces
/// underneath. This geometry is the contract with the game, so a deviation produces a
/// tileset the game renders incorrectly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridGeometry {
    /// Full tile width in pixels, including the 3D edge.
    pub tile_width: u32,
    /// Full tile height in pixels, including the 3D edge.
    pub tile_height: u32,
    /// Width of the box a source image is scaled to fit.
    pub content_width: u32,
    /// Height of the box a source image is scaled to fit.
    pub content_height: u32,
    /// Horizontal shift of the centred content relative to the tile centre.
    pub content_offset_x: i32,
    /// Vertical shift of the centred content relative to the tile centre.
    pub content_offset_y: i32,
    /// Pixel x of the first grid cell.
    pub origin_x: u32,
    /// Pixel y of the first grid cell.
    pub origin_y: u32,
    /// Cells per row.
    pub columns: u32,
    /// Number of source images expected.
    pub tile_count: u32,
    /// RGB gain applied to content on selected tiles.
    pub selected_brightness: f32,
    /// The two bonus groups.
    pub bonus_groups: [BonusGroupConfig; 2],
    /// Outline drawn on bonus tiles.
    pub frame: FrameStyle,
}

/// One bonus group: [`BONUS_GROUP_SIZE`] contiguous source indices sharing a frame colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BonusGroupConfig {
    /// First source index of the group.
    pub first_index: u32,
    /// Frame colour on the normal tile.
    pub color: HexColor,
    /// Frame colour on the selected tile.
    pub selected_color: HexColor,
}

impl BonusGroupConfig {
    /// `true` when `index` belongs to this group.
    pub fn contains(&self, index: u32) -> bool {
        index
            .checked_sub(self.first_index)
            .is_some_and(|d| d < BONUS_GROUP_SIZE)
    }
}

/// Rounded-rectangle outline in tile-local pixel coordinates (corners inclusive).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrameStyle {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Right edge (inclusive).
    pub right: i32,
    /// Bottom edge (inclusive).
    pub bottom: i32,
    /// Corner radius of the outer edge.
    pub radius: f64,
    /// Stroke width, drawn inward from the box.
    pub width: u32,
}

impl Default for FrameStyle {
    fn default() -> Self {
        // Sized for the default 96x132 tile with its 80x116 content box.
        Self {
            left: 14,
            top: 6,
            right: 93,
            bottom: 114,
            radius: 9.0,
            width: 5,
        }
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            tile_width: 96,
            tile_height: 132,
            content_width: 80,
            content_height: 116,
            content_offset_x: 6,
            content_offset_y: -6,
            origin_x: 0,
            origin_y: 0,
            columns: 43,
            tile_count: 41,
            selected_brightness: 1.25,
            bonus_groups: [
                BonusGroupConfig {
                    first_index: 33,
                    color: HexColor::rgb(0xd8, 0x19, 0xea),
                    selected_color: HexColor::rgb(0xf5, 0x8b, 0xff),
                },
                BonusGroupConfig {
                    first_index: 37,
                    color: HexColor::rgb(0x1d, 0xbf, 0x4e),
                    selected_color: HexColor::rgb(0x77, 0xe9, 0x98),
                },
            ],
            frame: FrameStyle::default(),
        }
    }
}

impl GridGeometry {
    /// Load geometry from a JSON file. Absent fields keep their defaults.
    pub fn from_json_file(path: &Path) -> TilesetResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read geometry '{}'", path.display()))?;
        let geometry: Self = serde_json::from_str(&text).map_err(|e| {
            TilesetError::config(format!("geometry '{}': {e}", path.display()))
        })?;
        geometry.validate()?;
        Ok(geometry)
    }

    /// Number of (normal, selected) row pairs the grid needs.
    pub fn row_pairs(&self) -> u32 {
        self.tile_count.div_ceil(self.columns.max(1))
    }

    /// Width of the full tileset canvas. Saturates for geometry that fails [`Self::validate`].
    pub fn canvas_width(&self) -> u32 {
        self.origin_x.saturating_add(self.columns.saturating_mul(self.tile_width))
    }

    /// Height of the full tileset canvas. Saturates for geometry that fails [`Self::validate`].
    pub fn canvas_height(&self) -> u32 {
        let rows = self.row_pairs().saturating_mul(2);
        self.origin_y.saturating_add(rows.saturating_mul(self.tile_height))
    }

    fn checked_canvas_size(&self) -> Option<(u32, u32)> {
        let width = u64::from(self.origin_x)
            .checked_add(u64::from(self.columns).checked_mul(u64::from(self.tile_width))?)?;
        let height = u64::from(self.origin_y).checked_add(
            u64::from(self.row_pairs())
                .checked_mul(2)?
                .checked_mul(u64::from(self.tile_height))?,
        )?;
        Some((u32::try_from(width).ok()?, u32::try_from(height).ok()?))
    }

    /// Check internal consistency.
    pub fn validate(&self) -> TilesetResult<()> {
        if self.tile_width == 0 || self.tile_height == 0 {
            return Err(TilesetError::config("tile dimensions must be > 0"));
        }
        if self.content_width == 0 || self.content_height == 0 {
            return Err(TilesetError::config("content dimensions must be > 0"));
        }
        if self.content_width > self.tile_width || self.content_height > self.tile_height {
            return Err(TilesetError::config(format!(
                "content box {}x{} exceeds tile {}x{}",
                self.content_width, self.content_height, self.tile_width, self.tile_height
            )));
        }
        if self.columns == 0 {
            return Err(TilesetError::config("columns must be > 0"));
        }
        if self.tile_count == 0 {
            return Err(TilesetError::config("tile_count must be > 0"));
        }
        if !self.selected_brightness.is_finite() || self.selected_brightness < 0.0 {
            return Err(TilesetError::config(
                "selected_brightness must be a finite value >= 0",
            ));
        }

        match self.checked_canvas_size() {
            Some((w, h)) if u64::from(w) * u64::from(h) <= MAX_CANVAS_PIXELS => {}
            _ => {
                return Err(TilesetError::config(format!(
                    "canvas for {} columns of {}x{} tiles ({} tiles) exceeds {MAX_CANVAS_PIXELS} \
                     pixels",
                    self.columns, self.tile_width, self.tile_height, self.tile_count
                )));
            }
        }

        for (i, group) in self.bonus_groups.iter().enumerate() {
            let end = group.first_index.checked_add(BONUS_GROUP_SIZE);
            if end.is_none_or(|end| end > self.tile_count) {
                return Err(TilesetError::config(format!(
                    "bonus group {i} starting at {} does not fit in tile_count {}",
                    group.first_index, self.tile_count
                )));
            }
        }
        let [a, b] = &self.bonus_groups;
        if a.contains(b.first_index) || b.contains(a.first_index) {
            return Err(TilesetError::config("bonus groups overlap"));
        }

        let f = &self.frame;
        if f.width == 0 || f.right <= f.left || f.bottom <= f.top {
            return Err(TilesetError::config("frame box is empty"));
        }
        if f.left < 0
            || f.top < 0
            || f.right >= self.tile_width as i32
            || f.bottom >= self.tile_height as i32
        {
            return Err(TilesetError::config("frame box exceeds the tile"));
        }
        if !f.radius.is_finite() || f.radius < 0.0 {
            return Err(TilesetError::config("frame radius must be a finite value >= 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/geometry.rs"]
mod tests;
