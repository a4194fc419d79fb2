use std::path::{Path, PathBuf};

use crate::error::EtcfigError;

/// Decoder selected for a candidate file, chosen purely by its extension.
///
/// | Extension | Format |
/// |-----------|--------|
/// | `.json`   | [`Json`](Format::Json) |
/// | `.xml`    | [`Xml`](Format::Xml) |
/// | `.ini` or none | [`Ini`](Format::Ini) |
/// | `.toml`   | [`Toml`](Format::Toml) |
///
/// Matching is exact and case-sensitive, so `app.JSON` is not recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Xml,
    Ini,
    Toml,
}

impl Format {
    /// Pick a format for `path`, or `None` for an unrecognized extension.
    pub fn from_path(path: &Path) -> Option<Format> {
        match path.extension() {
            None => Some(Format::Ini),
            Some(ext) => match ext.to_str()? {
                "json" => Some(Format::Json),
                "xml" => Some(Format::Xml),
                "ini" => Some(Format::Ini),
                "toml" => Some(Format::Toml),
                _ => None,
            },
        }
    }
}

/// What a load sweep did, in candidate order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Loaded {
    /// Files that were opened and decoded into the target.
    pub applied: Vec<PathBuf>,
    /// Files that exist but have an extension no decoder handles.
    pub ignored: Vec<PathBuf>,
    /// Every candidate the sweep considered.
    pub candidates: Vec<PathBuf>,
}

impl Loaded {
    /// True when no file contributed to the target.
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    /// Turn "nothing was found" into an error for callers that need a file.
    pub fn require_any(self) -> Result<Loaded, EtcfigError> {
        if self.is_empty() {
            return Err(EtcfigError::NoConfigFound {
                candidates: self.candidates,
            });
        }
        Ok(self)
    }
}
