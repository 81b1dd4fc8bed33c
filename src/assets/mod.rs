//! Inputs of a tileset run: the source images and the template.
//!
//! All filesystem reads happen here, before any tile is processed.

/// Source directory scanning and decoding.
pub mod source;
/// Blank tiles and the empty tileset canvas.
pub mod template;
