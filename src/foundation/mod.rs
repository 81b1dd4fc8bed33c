//! Shared building blocks: errors, colours, grid geometry, rasterization.

/// Hex colours for configuration.
pub mod color;
/// Error taxonomy.
pub mod error;
/// Grid and tile geometry.
pub mod geometry;
/// Rounded-rectangle rasterization.
pub mod raster;
