use std::fmt;
use std::path::Path;

use crate::foundation::error::{TilesetError, TilesetResult};

const SEGMENT_DELIMITER: &str = "__";

/// Recognized parameter keys.
///
/// Declaration order is the order in which the tile processor applies parameter stages,
/// regardless of the order segments appear in a filename.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParamKey {
    /// Resampling filter used when scaling to the tile footprint.
    Resample,
}

impl ParamKey {
    /// All keys, in stage order.
    pub const ALL: [ParamKey; 1] = [ParamKey::Resample];

    /// Canonical (lowercase) name as written in filenames.
    pub fn as_str(self) -> &'static str {
        match self {
            ParamKey::Resample => "resample",
        }
    }

    fn lookup(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resampling algorithms accepted by the `resample` parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Resample {
    /// Nearest neighbour.
    Nearest,
    /// Box filter.
    Box,
    /// Bilinear (triangle) filter.
    Bilinear,
    /// Hamming-windowed filter.
    Hamming,
    /// Bicubic (Catmull-Rom) filter.
    Bicubic,
    /// Lanczos with a = 3.
    #[default]
    Lanczos,
}

impl Resample {
    /// All algorithms in their conventional order.
    pub const ALL: [Resample; 6] = [
        Resample::Nearest,
        Resample::Box,
        Resample::Bilinear,
        Resample::Hamming,
        Resample::Bicubic,
        Resample::Lanczos,
    ];

    /// Name as written in filenames.
    pub fn name(self) -> &'static str {
        match self {
            Resample::Nearest => "NEAREST",
            Resample::Box => "BOX",
            Resample::Bilinear => "BILINEAR",
            Resample::Hamming => "HAMMING",
            Resample::Bicubic => "BICUBIC",
            Resample::Lanczos => "LANCZOS",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(name))
    }

    fn valid_names() -> String {
        Self::ALL.map(Resample::name).join(", ")
    }
}

impl fmt::Display for Resample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters parsed from one filename, in order of occurrence. Keys are unique.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterMap {
    entries: Vec<(ParamKey, String)>,
}

impl ParameterMap {
    /// Raw value for `key`, if present.
    pub fn get(&self, key: ParamKey) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Entries in filename order.
    pub fn iter(&self) -> impl Iterator<Item = (ParamKey, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when the filename carried no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Typed parameters consumed by the tile processor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TileParams {
    /// Resampling filter; Lanczos unless overridden.
    pub resample: Resample,
}

impl TileParams {
    /// Resolve raw values into typed parameters. `file_name` is only used for messages.
    pub fn resolve(params: &ParameterMap, file_name: &str) -> TilesetResult<Self> {
        let mut out = Self::default();
        for key in ParamKey::ALL {
            let Some(value) = params.get(key) else {
                continue;
            };
            match key {
                ParamKey::Resample => {
                    out.resample = Resample::from_name(value).ok_or_else(|| {
                        TilesetError::config(format!(
                            "{file_name}: invalid value '{value}' for parameter 'resample' \
                             (valid: {})",
                            Resample::valid_names()
                        ))
                    })?;
                }
            }
        }
        Ok(out)
    }
}

/// Parse the parameter segments of a filename (extension is ignored).
pub fn parse_filename_params(file_name: &str) -> TilesetResult<ParameterMap> {
    let stem = file_stem(file_name);
    let mut map = ParameterMap::default();

    for segment in stem.split(SEGMENT_DELIMITER).skip(1) {
        let Some((key, value)) = segment.split_once('_') else {
            return Err(TilesetError::parse(format!(
                "{file_name}: parameter segment '{segment}' has no key_value separator"
            )));
        };
        if key.is_empty() || value.is_empty() {
            return Err(TilesetError::parse(format!(
                "{file_name}: parameter segment '{segment}' needs a non-empty key and value"
            )));
        }

        let Some(param) = ParamKey::lookup(key) else {
            return Err(TilesetError::config(format!(
                "{file_name}: unknown parameter '{key}'"
            )));
        };
        if map.get(param).is_some() {
            return Err(TilesetError::config(format!(
                "{file_name}: parameter '{key}' given more than once"
            )));
        }
        map.entries.push((param, value.to_owned()));
    }

    Ok(map)
}

/// Numeric index prefix of a filename: the leading digits of the base identifier,
/// terminated by `-` or the end of the base identifier.
pub fn index_prefix(file_name: &str) -> Option<u32> {
    let stem = file_stem(file_name);
    let base = stem.split(SEGMENT_DELIMITER).next().unwrap_or(stem);
    let digits_end = base
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(base.len());
    if digits_end == 0 {
        return None;
    }
    match base[digits_end..].chars().next() {
        None | Some('-') => base[..digits_end].parse().ok(),
        Some(_) => None,
    }
}

fn file_stem(file_name: &str) -> &str {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name)
}

#[cfg(test)]
#[path = "../../tests/unit/params/parser.rs"]
mod tests;
