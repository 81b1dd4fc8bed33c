use std::path::Path;

use image::RgbaImage;
use rayon::prelude::*;

use crate::assets::source::{SourceImage, scan_source_dir};
use crate::assets::template::Template;
use crate::compose::tileset::{Compositor, write_png_atomic};
use crate::foundation::error::{TilesetError, TilesetResult};
use crate::foundation::geometry::GridGeometry;
use crate::layout::grid::{Placement, place};
use crate::tile::frame::apply_bonus_frame;
use crate::tile::processor::{TilePair, process_tile};

/// Everything a run needs besides its inputs, threaded through every stage.
#[derive(Clone, Debug)]
pub struct TilesetContext {
    /// Grid contract.
    pub geometry: GridGeometry,
    /// Blank tiles and canvas.
    pub template: Template,
}

impl TilesetContext {
    /// Validate `geometry` and `template` against each other.
    pub fn new(geometry: GridGeometry, template: Template) -> TilesetResult<Self> {
        geometry.validate()?;
        template.validate(&geometry)?;
        Ok(Self { geometry, template })
    }

    /// Context using the built-in template.
    pub fn builtin(geometry: GridGeometry) -> TilesetResult<Self> {
        geometry.validate()?;
        let template = Template::builtin(&geometry);
        Ok(Self { geometry, template })
    }
}

#[derive(Clone, Debug, Default)]
/// Threading controls for tile preparation. Compositing is always sequential.
pub struct TileThreading {
    /// Prepare tiles on a rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

/// A processed tile and the cells it goes to.
#[derive(Clone, Debug)]
pub struct PreparedTile {
    /// Grid placement.
    pub placement: Placement,
    /// Finished tile faces.
    pub tile: TilePair,
}

/// Decode, scale, stamp and (for bonus indices) frame one source image.
pub fn prepare_tile(source: &SourceImage, ctx: &TilesetContext) -> TilesetResult<PreparedTile> {
    let placement = place(source.index, &ctx.geometry)?;
    let pixels = source.decode()?;
    let mut tile = process_tile(&pixels, &source.tile_params, &ctx.geometry, &ctx.template)?;
    if let Some(group) = placement.bonus {
        apply_bonus_frame(&mut tile, group, &ctx.geometry)?;
    }
    tracing::debug!(
        file = %source.file_name,
        index = source.index,
        src_w = pixels.width(),
        src_h = pixels.height(),
        bonus = ?placement.bonus,
        "tile prepared"
    );
    Ok(PreparedTile { placement, tile })
}

/// Build the tileset canvas from the images in `source_dir`.
#[tracing::instrument(skip(ctx, threading))]
pub fn build_tileset(
    source_dir: &Path,
    ctx: &TilesetContext,
    threading: &TileThreading,
) -> TilesetResult<RgbaImage> {
    let sources = scan_source_dir(source_dir, &ctx.geometry)?;

    let prepared = if threading.parallel {
        let pool = build_thread_pool(threading.threads)?;
        pool.install(|| {
            sources
                .par_iter()
                .map(|s| prepare_tile(s, ctx))
                .collect::<TilesetResult<Vec<_>>>()
        })?
    } else {
        sources
            .iter()
            .map(|s| prepare_tile(s, ctx))
            .collect::<TilesetResult<Vec<_>>>()?
    };

    let mut compositor = Compositor::new(&ctx.geometry, &ctx.template);
    for p in &prepared {
        compositor.place(&p.placement, &p.tile)?;
    }
    Ok(compositor.finish())
}

/// Build the tileset and write it to `out` as PNG.
pub fn make_tileset(
    source_dir: &Path,
    out: &Path,
    ctx: &TilesetContext,
    threading: &TileThreading,
) -> TilesetResult<()> {
    let canvas = build_tileset(source_dir, ctx, threading)?;
    write_png_atomic(&canvas, out)?;
    tracing::info!(
        out = %out.display(),
        width = canvas.width(),
        height = canvas.height(),
        "tileset written"
    );
    Ok(())
}

fn build_thread_pool(threads: Option<usize>) -> TilesetResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(TilesetError::config("'threads' must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| TilesetError::config(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
