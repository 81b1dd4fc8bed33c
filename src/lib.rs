//! makemahjongg builds tileset images for GNOME Mahjongg.
//!
//! Given a directory of 41 images, it scales each one onto a blank tile, marks the two
//! groups of bonus tiles with a rounded frame, and lays the tiles out in the grid the
//! game expects from a theme PNG.
//!
//! # Pipeline overview
//!
//! 1. **Scan**: list the source directory, derive each image's sort index and parse the
//!    parameters embedded in its filename (`31-empress__resample_NEAREST.png`).
//! 2. **Process**: scale each image into the tile's content box with the requested
//!    resampling filter and stamp it onto the blank normal and selected tiles.
//! 3. **Frame**: outline the eight bonus tiles.
//! 4. **Compose**: paste every tile into its grid cells on a copy of the blank tileset
//!    and write the PNG atomically.
//!
//! Everything is a pure function of the inputs and a [`TilesetContext`]; there is no
//! global state.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod compose;
mod foundation;
mod layout;
mod params;
mod pipeline;
mod tile;

pub use assets::source::{SourceImage, scan_source_dir};
pub use assets::template::{BLANK_FILE, BLANK_SELECTED_FILE, TILESET_BLANK_FILE, Template};
pub use compose::composite::{brighten_in_place, is_opaque, over, paste_over, paste_replace};
pub use compose::tileset::{Compositor, ensure_parent_dir, write_png_atomic};
pub use foundation::color::HexColor;
pub use foundation::error::{TilesetError, TilesetResult};
pub use foundation::geometry::{
    BONUS_GROUP_SIZE, BonusGroupConfig, FrameStyle, GridGeometry, MAX_CANVAS_PIXELS,
};
pub use foundation::raster::{fill_shape, rounded_rect_inclusive, stroke_rounded_rect};
pub use layout::grid::{GridCell, Placement, assign_indices, bonus_group, place};
pub use params::parser::{
    ParamKey, ParameterMap, Resample, TileParams, index_prefix, parse_filename_params,
};
pub use pipeline::{
    PreparedTile, TileThreading, TilesetContext, build_tileset, make_tileset, prepare_tile,
};
pub use tile::frame::{BonusGroupId, apply_bonus_frame};
pub use tile::processor::{TilePair, fit_size, process_tile};
pub use tile::resample::resize_rgba;
