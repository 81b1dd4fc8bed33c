//! Canvas assembly and PNG output.

/// Straight-alpha pixel compositing.
pub mod composite;
/// The tileset canvas and its atomic PNG write.
pub mod tileset;
