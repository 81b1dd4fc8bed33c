//! Per-image tile preparation: scale-to-fit, stamping onto the blank tile, bonus frames.

/// Rounded-rectangle framing of bonus tiles.
pub mod frame;
/// Scale-to-fit and template stamping.
pub mod processor;
/// Named resampling filters.
pub mod resample;
