use std::collections::BTreeMap;

use crate::foundation::error::{TilesetError, TilesetResult};
use crate::foundation::geometry::GridGeometry;
use crate::params::parser::index_prefix;
use crate::tile::frame::BonusGroupId;

/// A cell of the tileset grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridCell {
    /// Row, counted from the top.
    pub row: u32,
    /// Column, counted from the left.
    pub column: u32,
}

impl GridCell {
    /// Pixel position of the cell's top-left corner.
    ///
    /// Saturates instead of wrapping, so a cell beyond `u32` range is reported as off-canvas.
    pub fn origin(self, geometry: &GridGeometry) -> (u32, u32) {
        (
            geometry
                .origin_x
                .saturating_add(self.column.saturating_mul(geometry.tile_width)),
            geometry
                .origin_y
                .saturating_add(self.row.saturating_mul(geometry.tile_height)),
        )
    }
}

/// Where one source index lands in the tileset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Source index.
    pub index: u32,
    /// Cell of the normal face.
    pub normal: GridCell,
    /// Cell of the selected face, directly below the normal one.
    pub selected: GridCell,
    /// Bonus group, if the index is in one.
    pub bonus: Option<BonusGroupId>,
}

/// Map a source index to its cells and bonus group.
pub fn place(index: u32, geometry: &GridGeometry) -> TilesetResult<Placement> {
    if index >= geometry.tile_count {
        return Err(TilesetError::layout(format!(
            "index {index} is outside 0..={}",
            geometry.tile_count.saturating_sub(1)
        )));
    }

    let columns = geometry.columns.max(1);
    let column = index % columns;
    let pair = index / columns;
    Ok(Placement {
        index,
        normal: GridCell {
            row: pair.saturating_mul(2),
            column,
        },
        selected: GridCell {
            row: pair.saturating_mul(2).saturating_add(1),
            column,
        },
        bonus: bonus_group(index, geometry),
    })
}

/// Bonus group of `index`, if any.
pub fn bonus_group(index: u32, geometry: &GridGeometry) -> Option<BonusGroupId> {
    geometry
        .bonus_groups
        .iter()
        .position(|g| g.contains(index))
        .map(|i| BonusGroupId(i as u8))
}

/// Assign a sort index to each file name.
///
/// When every name starts with a numeric prefix (`12-dragon.png`) that prefix is the
/// index; otherwise the index is the name's position in lexicographic order. Returns
/// indices in the order of `file_names`.
pub fn assign_indices(
    file_names: &[String],
    geometry: &GridGeometry,
) -> TilesetResult<Vec<u32>> {
    let prefixes: Option<Vec<u32>> = file_names.iter().map(|n| index_prefix(n)).collect();

    let indices = match prefixes {
        Some(prefixes) => {
            let mut seen = BTreeMap::<u32, &str>::new();
            for (name, &index) in file_names.iter().zip(&prefixes) {
                if let Some(other) = seen.insert(index, name) {
                    return Err(TilesetError::layout(format!(
                        "'{other}' and '{name}' both claim index {index}"
                    )));
                }
            }
            prefixes
        }
        None => {
            tracing::warn!("not every file name has a numeric prefix; using sorted name order");
            let mut order: Vec<usize> = (0..file_names.len()).collect();
            order.sort_by(|&a, &b| file_names[a].cmp(&file_names[b]));
            let mut indices = vec![0u32; file_names.len()];
            for (pos, &i) in order.iter().enumerate() {
                indices[i] = pos as u32;
            }
            indices
        }
    };

    for (name, &index) in file_names.iter().zip(&indices) {
        if index >= geometry.tile_count {
            return Err(TilesetError::layout(format!(
                "'{name}': index {index} is outside 0..={}",
                geometry.tile_count.saturating_sub(1)
            )));
        }
    }
    Ok(indices)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
