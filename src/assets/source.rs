use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::{ImageFormat, RgbaImage};

use crate::foundation::error::{TilesetError, TilesetResult};
use crate::foundation::geometry::GridGeometry;
use crate::layout::grid::assign_indices;
use crate::params::parser::{ParameterMap, TileParams, parse_filename_params};

/// One input image, identified and parsed but not yet decoded.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceImage {
    /// Full path.
    pub path: PathBuf,
    /// File name including extension.
    pub file_name: String,
    /// Sort index, which decides the grid cell.
    pub index: u32,
    /// Parameters as written in the file name.
    pub params: ParameterMap,
    /// Resolved parameters.
    pub tile_params: TileParams,
}

impl SourceImage {
    /// Decode to straight-alpha RGBA8.
    pub fn decode(&self) -> TilesetResult<RgbaImage> {
        let img = image::open(&self.path)
            .with_context(|| format!("decode source image '{}'", self.path.display()))?;
        Ok(img.to_rgba8())
    }
}

/// List the images in `dir`, parse their names and order them by sort index.
///
/// Hidden files and files whose extension is not a readable image format are skipped.
/// Anything other than exactly `geometry.tile_count` images is an error.
#[tracing::instrument(skip(geometry))]
pub fn scan_source_dir(dir: &Path, geometry: &GridGeometry) -> TilesetResult<Vec<SourceImage>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("list source directory '{}'", dir.display()))?;

    let mut found = Vec::<(String, PathBuf)>::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("list source directory '{}'", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(file_name) = path.file_name().and_then(|n| n.to_str()).map(str::to_owned)
        else {
            return Err(TilesetError::parse(format!(
                "file name '{}' is not valid UTF-8",
                path.display()
            )));
        };
        if file_name.starts_with('.') || !is_supported_image(&path) {
            tracing::debug!(file = %file_name, "skipping non-image file");
            continue;
        }
        found.push((file_name, path));
    }

    if found.len() != geometry.tile_count as usize {
        return Err(TilesetError::input_count(format!(
            "'{}' contains {} images, expected exactly {}",
            dir.display(),
            found.len(),
            geometry.tile_count
        )));
    }

    found.sort_by(|a, b| a.0.cmp(&b.0));
    let names: Vec<String> = found.iter().map(|(n, _)| n.clone()).collect();
    let indices = assign_indices(&names, geometry)?;

    let mut sources = Vec::with_capacity(found.len());
    for ((file_name, path), index) in found.into_iter().zip(indices) {
        let params = parse_filename_params(&file_name)?;
        let tile_params = TileParams::resolve(&params, &file_name)?;
        if !params.is_empty() {
            tracing::debug!(file = %file_name, resample = %tile_params.resample, "parameters");
        }
        sources.push(SourceImage {
            path,
            file_name,
            index,
            params,
            tile_params,
        });
    }
    sources.sort_by_key(|s| s.index);
    Ok(sources)
}

fn is_supported_image(path: &Path) -> bool {
    ImageFormat::from_path(path).is_ok_and(|f| f.reading_enabled())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
