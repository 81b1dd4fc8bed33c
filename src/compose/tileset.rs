use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::{ImageFormat, RgbaImage};

use crate::assets::template::Template;
use crate::compose::composite::{is_opaque, paste_over, paste_replace};
use crate::foundation::error::{TilesetError, TilesetResult};
use crate::foundation::geometry::GridGeometry;
use crate::layout::grid::{GridCell, Placement};
use crate::tile::processor::TilePair;

/// Accumulates tiles onto a copy of the template canvas.
pub struct Compositor<'a> {
    geometry: &'a GridGeometry,
    canvas: RgbaImage,
}

impl<'a> Compositor<'a> {
    /// Start from a copy of the template's blank tileset.
    pub fn new(geometry: &'a GridGeometry, template: &Template) -> Self {
        Self {
            geometry,
            canvas: template.tileset.clone(),
        }
    }

    /// Paste both variants of a tile into their cells.
    pub fn place(&mut self, placement: &Placement, tile: &TilePair) -> TilesetResult<()> {
        self.paste_cell(placement.normal, &tile.normal)?;
        self.paste_cell(placement.selected, &tile.selected)
    }

    /// The finished canvas.
    pub fn finish(self) -> RgbaImage {
        self.canvas
    }

    fn paste_cell(&mut self, cell: GridCell, img: &RgbaImage) -> TilesetResult<()> {
        let (x, y) = cell.origin(self.geometry);
        let fits = u64::from(x) + u64::from(img.width()) <= u64::from(self.canvas.width())
            && u64::from(y) + u64::from(img.height()) <= u64::from(self.canvas.height());
        if !fits {
            return Err(TilesetError::layout(format!(
                "cell (row {}, column {}) at {x},{y} does not fit the {}x{} canvas",
                cell.row,
                cell.column,
                self.canvas.width(),
                self.canvas.height()
            )));
        }

        if is_opaque(img) {
            paste_replace(&mut self.canvas, img, i64::from(x), i64::from(y));
        } else {
            paste_over(&mut self.canvas, img, i64::from(x), i64::from(y));
        }
        Ok(())
    }
}

/// Encode `canvas` as PNG next to `out`, then rename it into place.
///
/// On failure the temporary file is removed and `out` is left untouched.
pub fn write_png_atomic(canvas: &RgbaImage, out: &Path) -> TilesetResult<()> {
    ensure_parent_dir(out)?;
    let tmp = temp_path(out)?;

    let result = write_png(canvas, &tmp).and_then(|()| {
        std::fs::rename(&tmp, out)
            .with_context(|| format!("move '{}' to '{}'", tmp.display(), out.display()))
            .map_err(TilesetError::from)
    });
    if result.is_err() {
        let _ = std::fs::remove_file(&tmp);
    }
    result
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> TilesetResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

fn temp_path(out: &Path) -> TilesetResult<PathBuf> {
    let name = out.file_name().ok_or_else(|| {
        TilesetError::config(format!("output path '{}' has no file name", out.display()))
    })?;
    let mut tmp_name = name.to_os_string();
    tmp_name.push(".tmp");
    Ok(out.with_file_name(tmp_name))
}

fn write_png(canvas: &RgbaImage, path: &Path) -> TilesetResult<()> {
    let file = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);
    canvas
        .write_to(&mut writer, ImageFormat::Png)
        .with_context(|| format!("encode png '{}'", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flush '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/compose/tileset.rs"]
mod tests;
