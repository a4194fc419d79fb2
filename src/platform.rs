//! Per-platform default search configs.
//!
//! Each supported OS has one entry: its base directories and the environment
//! overlays applied on top, in order. An OS without an entry has no default,
//! and callers there must build a [`SearchConfig`] or pass override paths.

use crate::env::{Environment, Overlay};
use crate::identity::ProgramIdentity;
use crate::search::SearchConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformDefaults {
    /// Matches [`std::env::consts::OS`].
    pub os: &'static str,
    pub base_dirs: &'static [&'static str],
    pub overlays: &'static [Overlay],
}

pub const PLATFORMS: &[PlatformDefaults] = &[PlatformDefaults {
    os: "linux",
    base_dirs: &["/etc", "/usr/local/etc"],
    overlays: &[Overlay::Xdg, Overlay::ProgramVars],
}];

pub fn lookup(os: &str) -> Option<&'static PlatformDefaults> {
    PLATFORMS.iter().find(|p| p.os == os)
}

/// Build the default search config for `identity` on `os`.
///
/// The program name is both the directory namespace and the file name; the
/// platform's overlays then extend it from `env`.
pub fn default_for(
    os: &str,
    identity: &ProgramIdentity,
    env: &Environment,
) -> Option<SearchConfig> {
    let platform = lookup(os)?;
    let mut builder = SearchConfig::builder()
        .name(identity.name())
        .file(identity.name())
        .locations(platform.base_dirs.iter().copied());
    for overlay in platform.overlays {
        builder = overlay.apply(builder, identity, env);
    }
    Some(builder.build())
}
