/// Convenience result type used across makemahjongg.
pub type TilesetResult<T> = Result<T, TilesetError>;

/// Top-level error taxonomy. Every variant is fatal to a tileset run.
#[derive(thiserror::Error, Debug)]
pub enum TilesetError {
    /// The source directory does not hold the expected number of images.
    #[error("input count error: {0}")]
    InputCount(String),

    /// A filename parameter segment is malformed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Unknown parameter key, unsupported value, or invalid geometry/template.
    #[error("configuration error: {0}")]
    Config(String),

    /// A source index or grid cell falls outside the tileset layout.
    #[error("layout error: {0}")]
    Layout(String),

    /// Unreadable source, undecodable image, or unwritable output.
    #[error("i/o error: {0:#}")]
    Io(#[from] anyhow::Error),
}

impl TilesetError {
    /// Build a [`TilesetError::InputCount`] value.
    pub fn input_count(msg: impl Into<String>) -> Self {
        Self::InputCount(msg.into())
    }

    /// Build a [`TilesetError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`TilesetError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`TilesetError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
