//! The candidate sweep.
//!
//! Candidates are visited in order and every one that opens is decoded into
//! the target. Precedence is therefore **last wins**: a later file overrides
//! the keys an earlier file set, while keys it does not mention keep their
//! earlier values. This is what makes `/etc/{name}` act as a system default
//! under a per-user file.
//!
//! - A candidate that cannot be opened (missing, unreadable, or not a regular
//!   file) is skipped without comment.
//! - An extension no decoder handles is skipped and reported in
//!   [`Loaded::ignored`].
//! - A failed decode leaves the target as it was and is recorded. Only the
//!   last candidate's outcome counts: an error is returned only when the final
//!   candidate visited failed to decode. A later candidate that decodes, is
//!   missing, or is ignored clears it.
//! - INI and XML values are text; they are converted with
//!   [`crate::lenient`] so the target's field types pick the meaning. JSON and
//!   TOML are converted strictly.
//! - The primary file, when it decodes cleanly, ends the sweep.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};

use crate::decode;
use crate::error::EtcfigError;
use crate::lenient;
use crate::merge;
use crate::types::{Format, Loaded};

/// Sweep `paths` into `target`. `primary`, if it is one of `paths`, stops the
/// sweep once it decodes cleanly.
///
/// Returns an error only when the last candidate visited failed to decode. A
/// failure followed by a missing or ignored candidate is logged and dropped.
/// When nothing was found the target is untouched and the result is `Ok` with
/// an empty [`Loaded::applied`].
pub fn load_paths<T>(
    target: &mut T,
    primary: Option<&Path>,
    paths: &[PathBuf],
) -> Result<Loaded, EtcfigError>
where
    T: Serialize + DeserializeOwned,
{
    let mut loaded = Loaded {
        candidates: paths.to_vec(),
        ..Loaded::default()
    };
    let mut last_error = None;

    for path in paths {
        let Some(file) = open_candidate(path) else {
            last_error = None;
            continue;
        };
        let Some(format) = Format::from_path(path) else {
            debug!(path = %path.display(), "no decoder for extension, ignoring");
            loaded.ignored.push(path.clone());
            last_error = None;
            continue;
        };

        // The reader (and the file handle) is consumed by this attempt.
        match apply(target, format, path, BufReader::new(file)) {
            Ok(()) => {
                debug!(path = %path.display(), ?format, "applied config file");
                loaded.applied.push(path.clone());
                last_error = None;
                if primary == Some(path.as_path()) {
                    debug!(path = %path.display(), "primary config file loaded, stopping search");
                    break;
                }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config file");
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) => Err(e),
        None => Ok(loaded),
    }
}

fn open_candidate(path: &Path) -> Option<File> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            trace!(path = %path.display(), error = %e, "skipping candidate");
            return None;
        }
    };
    match file.metadata() {
        Ok(meta) if meta.is_file() => Some(file),
        _ => {
            trace!(path = %path.display(), "skipping candidate, not a regular file");
            None
        }
    }
}

/// Decode one file and lay it over the target. On error the target is left
/// as it was.
fn apply<T, R>(target: &mut T, format: Format, path: &Path, reader: R) -> Result<(), EtcfigError>
where
    T: Serialize + DeserializeOwned,
    R: BufRead,
{
    let decoded = decode::decode(format, path, reader)?;
    let current = serde_json::to_value(&*target).map_err(|e| EtcfigError::Target {
        reason: e.to_string(),
    })?;
    let merged = merge::overlay(current, decoded);
    let converted = match format {
        Format::Ini | Format::Xml => lenient::from_value(merged),
        Format::Json | Format::Toml => serde_json::from_value(merged),
    };
    *target = converted.map_err(|e| EtcfigError::InvalidValue {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(())
}
