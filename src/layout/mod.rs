//! Source index to grid cell mapping.

/// Grid placement and sort-index assignment.
pub mod grid;
