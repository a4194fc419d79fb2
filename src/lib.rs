//! Find and load a program's configuration file at startup.
//!
//! Etcfig probes a prioritized list of directories and file names, decodes
//! every file it finds (JSON, XML, INI or TOML, by extension) and lays each
//! one over a value you already hold, so whatever defaults that value carries
//! survive unless a file says otherwise.
//!
//! ```ignore
//! let mut config = AppConfig::default();
//! etcfig::load_default(&mut config, cli.config.overrides())?;
//! ```
//!
//! For a program invoked as `myapp` on Linux, that probes
//! `/etc/myapp/myapp`, `/usr/local/etc/myapp/myapp`, then the XDG
//! directories, then `$MYAPP_DIRNAME/myapp`, then whatever the override paths
//! add.
//!
//! # Search order
//!
//! A [`SearchConfig`] holds a program **name**, an ordered list of
//! **locations** (base directories) and an ordered list of **files** (base
//! names). Each location is namespaced with the name (`/etc` →
//! `/etc/myapp`) unless its last segment already is the name. Candidates
//! are every location × every file, location-major:
//!
//! ```text
//! /etc/myapp/myapp.json
//! /etc/myapp/myapp
//! /usr/local/etc/myapp/myapp.json
//! /usr/local/etc/myapp/myapp
//! ```
//!
//! Override paths extend both lists. A file path (`/opt/app/custom.json`)
//! adds its directory to the locations and its name to the files; a
//! directory (`/opt/app/`) adds only the location. Overrides are never
//! namespaced. A path reachable in several ways is probed once, at its
//! first position.
//!
//! # Layering: last wins
//!
//! Every candidate that opens is decoded, in order. Files are **sparse
//! overlays**: a later file overrides the keys it mentions and leaves the
//! rest as earlier files (or your defaults) set them. So list general
//! locations first and specific ones last.
//!
//! Missing candidates are skipped silently; listing a location is a
//! suggestion, not a requirement. Finding nothing is not an error: the
//! target keeps its defaults and [`Loaded::applied`] is empty. Call
//! [`Loaded::require_any`] when a file is mandatory.
//!
//! # Formats
//!
//! | Extension | Decoder |
//! |-----------|---------|
//! | `.json` | JSON |
//! | `.xml` | XML (root element unwrapped, attributes and child elements as keys) |
//! | `.ini` or none | INI (`[a.b]` sections nest) |
//! | `.toml` | TOML |
//!
//! Other extensions are skipped and reported in [`Loaded::ignored`]. INI and
//! XML carry only text, so the target's field types decide what a value
//! means: `version = 1.0` fills a `String` field as `"1.0"` and an `f64` field
//! as `1.0`. A lone XML element fills a `Vec` field as a one-item list. A name
//! that is both an INI key and a section is [`EtcfigError::KeyConflict`].
//!
//! # Errors
//!
//! A file that fails to decode, or whose contents do not fit the target type,
//! leaves the target untouched and is logged. The sweep carries on. The error
//! is returned only if that file was the last candidate: any later candidate,
//! whether it decodes, is missing or has an unknown extension, clears it. See
//! [`EtcfigError`].
//!
//! # Platform defaults
//!
//! [`SearchConfig::platform_default`] builds the default for the running
//! program. Only Linux has one: `/etc` and `/usr/local/etc`, then the XDG
//! base directories, then the program's own variables (`MYAPP_DIRNAME`,
//! `MYAPP_FILENAME`, `MYAPP_CONFIG`); see [`Overlay`]. Build it once at
//! startup and hand it to whatever loads configuration.

pub mod error;
pub mod types;

mod candidates;
#[cfg(feature = "clap")]
mod cli;
mod decode;
mod env;
mod identity;
mod lenient;
mod loader;
pub(crate) mod merge;
mod platform;
mod search;

#[cfg(test)]
mod fixtures;

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use candidates::{build_candidates, split_override};
#[cfg(feature = "clap")]
pub use cli::ConfigPathArgs;
pub use env::{Environment, Overlay};
pub use error::EtcfigError;
pub use identity::ProgramIdentity;
pub use loader::load_paths;
pub use platform::{PLATFORMS, PlatformDefaults};
pub use search::{SearchConfig, SearchConfigBuilder};
pub use types::{Format, Loaded};

/// Load configuration for the running program into `target`.
///
/// Uses the platform default [`SearchConfig`] plus `overrides`. On a platform
/// without defaults only the overrides are searched; with no overrides either,
/// this returns [`EtcfigError::NoDefaultConfig`].
pub fn load_default<T, P>(target: &mut T, overrides: &[P]) -> Result<Loaded, EtcfigError>
where
    T: Serialize + DeserializeOwned,
    P: AsRef<Path>,
{
    let identity = ProgramIdentity::current();
    let os = std::env::consts::OS;
    let config = match platform::default_for(os, &identity, &Environment::capture()) {
        Some(config) => config,
        None if overrides.iter().any(|p| !p.as_ref().as_os_str().is_empty()) => {
            SearchConfig::builder().name(identity.name()).build()
        }
        None => return Err(EtcfigError::NoDefaultConfig { os: os.to_string() }),
    };
    config.load_with(target, overrides)
}
