//! Filename parameters.
//!
//! Source files may carry processing parameters in their name, separated from the base
//! identifier and from each other by a double underscore:
//!
//! ```text
//! 31-childlike_empress__resample_NEAREST.png
//! ```

/// Parameter extraction and resolution.
pub mod parser;
