use std::path::Path;

use anyhow::Context as _;
use image::{Rgba, RgbaImage};

use crate::compose::composite::paste_replace;
use crate::foundation::error::{TilesetError, TilesetResult};
use crate::foundation::geometry::GridGeometry;
use crate::foundation::raster::{fill_shape, rounded_rect_inclusive, stroke_rounded_rect};

/// File name of the blank tile inside a template directory.
pub const BLANK_FILE: &str = "blank.png";
/// File name of the blank selected tile inside a template directory.
pub const BLANK_SELECTED_FILE: &str = "blank_selected.png";
/// File name of the blank tileset canvas inside a template directory.
pub const TILESET_BLANK_FILE: &str = "tileset_blank.png";

/// Blank tile backgrounds and the empty tileset canvas.
#[derive(Clone, Debug)]
pub struct Template {
    /// Background for normal tiles.
    pub blank: RgbaImage,
    /// Background for selected tiles.
    pub blank_selected: RgbaImage,
    /// Starting canvas for the whole tileset.
    pub tileset: RgbaImage,
}

struct TilePalette {
    edge: Rgba<u8>,
    edge_line: Rgba<u8>,
    face: Rgba<u8>,
    face_line: Rgba<u8>,
}

const NORMAL_PALETTE: TilePalette = TilePalette {
    edge: Rgba([0xc9, 0xbf, 0xa6, 0xff]),
    edge_line: Rgba([0x7d, 0x73, 0x5c, 0xff]),
    face: Rgba([0xf6, 0xf2, 0xe6, 0xff]),
    face_line: Rgba([0x8f, 0x85, 0x6d, 0xff]),
};

const SELECTED_PALETTE: TilePalette = TilePalette {
    edge: Rgba([0xd8, 0xc0, 0x6a, 0xff]),
    edge_line: Rgba([0x86, 0x70, 0x26, 0xff]),
    face: Rgba([0xff, 0xf4, 0xb8, 0xff]),
    face_line: Rgba([0xa8, 0x8e, 0x33, 0xff]),
};

impl Template {
    /// Procedurally drawn template sized to `geometry`: an ivory face raised above an
    /// edge on its lower-left side, in the style of the `smooth` theme.
    pub fn builtin(geometry: &GridGeometry) -> Self {
        let blank = draw_blank_tile(geometry, &NORMAL_PALETTE);
        let blank_selected = draw_blank_tile(geometry, &SELECTED_PALETTE);

        let mut tileset = RgbaImage::from_pixel(
            geometry.canvas_width(),
            geometry.canvas_height(),
            Rgba([0, 0, 0, 0]),
        );
        for pair in 0..geometry.row_pairs() {
            for col in 0..geometry.columns {
                let x = i64::from(geometry.origin_x + col * geometry.tile_width);
                let y = i64::from(geometry.origin_y + 2 * pair * geometry.tile_height);
                paste_replace(&mut tileset, &blank, x, y);
                paste_replace(
                    &mut tileset,
                    &blank_selected,
                    x,
                    y + i64::from(geometry.tile_height),
                );
            }
        }

        Self {
            blank,
            blank_selected,
            tileset,
        }
    }

    /// Load `blank.png`, `blank_selected.png` and `tileset_blank.png` from `dir`.
    pub fn load_dir(dir: &Path, geometry: &GridGeometry) -> TilesetResult<Self> {
        let template = Self {
            blank: load_rgba(&dir.join(BLANK_FILE))?,
            blank_selected: load_rgba(&dir.join(BLANK_SELECTED_FILE))?,
            tileset: load_rgba(&dir.join(TILESET_BLANK_FILE))?,
        };
        template.validate(geometry)?;
        Ok(template)
    }

    /// Check that the images agree with `geometry`.
    pub fn validate(&self, geometry: &GridGeometry) -> TilesetResult<()> {
        let tile = (geometry.tile_width, geometry.tile_height);
        for (name, img) in [
            (BLANK_FILE, &self.blank),
            (BLANK_SELECTED_FILE, &self.blank_selected),
        ] {
            if img.dimensions() != tile {
                return Err(TilesetError::config(format!(
                    "template {name} is {}x{}, expected {}x{}",
                    img.width(),
                    img.height(),
                    tile.0,
                    tile.1
                )));
            }
        }

        let (w, h) = self.tileset.dimensions();
        if w < geometry.canvas_width() || h < geometry.canvas_height() {
            return Err(TilesetError::config(format!(
                "template {TILESET_BLANK_FILE} is {w}x{h}, the grid needs at least {}x{}",
                geometry.canvas_width(),
                geometry.canvas_height()
            )));
        }
        Ok(())
    }
}

fn draw_blank_tile(geometry: &GridGeometry, palette: &TilePalette) -> RgbaImage {
    let w = geometry.tile_width as i32;
    let h = geometry.tile_height as i32;
    let depth = (w / 12).max(1);
    let radius = f64::from(depth) * 1.25;

    let mut tile = RgbaImage::from_pixel(
        geometry.tile_width,
        geometry.tile_height,
        Rgba([0, 0, 0, 0]),
    );

    let edge = rounded_rect_inclusive(0, depth, w - depth - 1, h - 1, radius);
    fill_shape(&mut tile, &edge, palette.edge);
    stroke_rounded_rect(&mut tile, edge, 1.0, palette.edge_line);

    let face = rounded_rect_inclusive(depth, 0, w - 1, h - depth - 1, radius);
    fill_shape(&mut tile, &face, palette.face);
    stroke_rounded_rect(&mut tile, face, 1.0, palette.face_line);

    tile
}

fn load_rgba(path: &Path) -> TilesetResult<RgbaImage> {
    let img = image::open(path).with_context(|| format!("open template '{}'", path.display()))?;
    Ok(img.to_rgba8())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/template.rs"]
mod tests;
