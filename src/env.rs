//! Environment overlays: how environment variables extend a [`SearchConfig`].
//!
//! An [`Environment`] is a read-only snapshot of the variables (plus the home
//! directory) taken once when a default search config is built. Overlays read
//! from the snapshot and add to a [`SearchConfigBuilder`]; they never touch the
//! process environment themselves, so tests pass synthetic snapshots.
//!
//! Empty variables count as unset.
//!
//! [`SearchConfig`]: crate::SearchConfig

use std::collections::HashMap;
use std::path::PathBuf;

use crate::identity::ProgramIdentity;
use crate::search::SearchConfigBuilder;

#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
    home: Option<PathBuf>,
}

impl Environment {
    /// Snapshot the current process environment. Non-UTF-8 variables are dropped.
    pub fn capture() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        let home = directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
        Self { vars, home }
    }

    /// Build a snapshot from explicit pairs, with no home directory.
    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            vars: vars.into_iter().collect(),
            home: None,
        }
    }

    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn home(&self) -> Option<&std::path::Path> {
        self.home.as_deref()
    }

    /// A `:`-separated list variable, empty entries skipped.
    fn list(&self, key: &str) -> Vec<PathBuf> {
        self.var(key)
            .map(|v| {
                v.split(':')
                    .filter(|s| !s.is_empty())
                    .map(PathBuf::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// A policy for deriving search locations from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    /// XDG base directories, appended in priority-ascending order:
    /// `XDG_DATA_DIRS` (reversed), `XDG_DATA_HOME`, `XDG_CONFIG_DIRS`
    /// (reversed), then `XDG_CONFIG_HOME` or `$HOME/.config`.
    Xdg,
    /// Program-specific variables, with `PREFIX` from
    /// [`ProgramIdentity::env_prefix`]:
    ///
    /// | Variable | Effect |
    /// |----------|--------|
    /// | `PREFIX_DIRNAME` | extra location, appended last |
    /// | `PREFIX_FILENAME` | replaces the config file name |
    /// | `PREFIX_CONFIG` | primary file, probed before all others |
    ProgramVars,
}

impl Overlay {
    pub fn apply(
        &self,
        mut builder: SearchConfigBuilder,
        identity: &ProgramIdentity,
        env: &Environment,
    ) -> SearchConfigBuilder {
        match self {
            Overlay::Xdg => {
                // Lists are most-important-first; the search wants last = highest.
                for dir in env.list("XDG_DATA_DIRS").into_iter().rev() {
                    builder = builder.location(dir);
                }
                if let Some(dir) = env.var("XDG_DATA_HOME") {
                    builder = builder.location(dir);
                }
                for dir in env.list("XDG_CONFIG_DIRS").into_iter().rev() {
                    builder = builder.location(dir);
                }
                let config_home = env
                    .var("XDG_CONFIG_HOME")
                    .map(PathBuf::from)
                    .or_else(|| env.home().map(|h| h.join(".config")));
                if let Some(dir) = config_home {
                    builder = builder.location(dir);
                }
                builder
            }
            Overlay::ProgramVars => {
                let prefix = identity.env_prefix();
                if prefix.is_empty() {
                    return builder;
                }
                if let Some(dir) = env.var(&format!("{prefix}_DIRNAME")) {
                    builder = builder.location(dir);
                }
                if let Some(file) = env.var(&format!("{prefix}_FILENAME")) {
                    builder = builder.files([file]);
                }
                if let Some(path) = env.var(&format!("{prefix}_CONFIG")) {
                    builder = builder.primary_file(path);
                }
                builder
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchConfig;

    fn env(pairs: &[(&str, &str)]) -> Environment {
        Environment::from_vars(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())))
    }

    fn base() -> SearchConfigBuilder {
        SearchConfig::builder().name("myapp").location("/etc")
    }

    fn apply(overlay: Overlay, env: &Environment) -> SearchConfig {
        overlay
            .apply(base(), &ProgramIdentity::new("myapp"), env)
            .build()
    }

    #[test]
    fn empty_var_is_unset() {
        let e = env(&[("MYAPP_DIRNAME", "")]);
        assert_eq!(e.var("MYAPP_DIRNAME"), None);
    }

    #[test]
    fn xdg_config_home_appended() {
        let config = apply(Overlay::Xdg, &env(&[("XDG_CONFIG_HOME", "/home/u/.config")]));
        assert_eq!(
            config.locations(),
            &[PathBuf::from("/etc"), PathBuf::from("/home/u/.config")]
        );
    }

    #[test]
    fn xdg_config_home_falls_back_to_home() {
        let config = apply(Overlay::Xdg, &Environment::default().with_home("/home/u"));
        assert_eq!(
            config.locations(),
            &[PathBuf::from("/etc"), PathBuf::from("/home/u/.config")]
        );
    }

    #[test]
    fn xdg_without_home_adds_nothing() {
        let config = apply(Overlay::Xdg, &Environment::default());
        assert_eq!(config.locations(), &[PathBuf::from("/etc")]);
    }

    #[test]
    fn xdg_lists_are_priority_ascending() {
        let e = env(&[
            ("XDG_DATA_DIRS", "/usr/local/share:/usr/share"),
            ("XDG_DATA_HOME", "/home/u/.local/share"),
            ("XDG_CONFIG_DIRS", "/etc/xdg:/opt/xdg"),
            ("XDG_CONFIG_HOME", "/home/u/.config"),
        ]);
        let config = apply(Overlay::Xdg, &e);
        let expected: Vec<PathBuf> = [
            "/etc",
            "/usr/share",
            "/usr/local/share",
            "/home/u/.local/share",
            "/opt/xdg",
            "/etc/xdg",
            "/home/u/.config",
        ]
        .iter()
        .map(PathBuf::from)
        .collect();
        assert_eq!(config.locations(), expected.as_slice());
    }

    #[test]
    fn xdg_list_skips_empty_entries() {
        let config = apply(Overlay::Xdg, &env(&[("XDG_CONFIG_DIRS", ":/etc/xdg::")]));
        assert_eq!(
            config.locations(),
            &[PathBuf::from("/etc"), PathBuf::from("/etc/xdg")]
        );
    }

    #[test]
    fn program_dirname_appended_last() {
        let config = apply(Overlay::ProgramVars, &env(&[("MYAPP_DIRNAME", "/opt/conf")]));
        assert_eq!(
            config.locations(),
            &[PathBuf::from("/etc"), PathBuf::from("/opt/conf")]
        );
    }

    #[test]
    fn program_filename_replaces_default() {
        let config = apply(Overlay::ProgramVars, &env(&[("MYAPP_FILENAME", "settings.json")]));
        assert_eq!(config.files(), &["settings.json".to_string()]);
    }

    #[test]
    fn program_config_sets_primary() {
        let config = apply(Overlay::ProgramVars, &env(&[("MYAPP_CONFIG", "/srv/myapp.ini")]));
        assert_eq!(config.primary_file(), Some(std::path::Path::new("/srv/myapp.ini")));
    }

    #[test]
    fn other_program_vars_ignored() {
        let config = apply(Overlay::ProgramVars, &env(&[("OTHER_DIRNAME", "/opt/other")]));
        assert_eq!(config.locations(), &[PathBuf::from("/etc")]);
        assert_eq!(config.primary_file(), None);
    }

    #[test]
    fn program_vars_use_sanitized_prefix() {
        let e = env(&[("MY_APP_DIRNAME", "/opt/conf")]);
        let config = Overlay::ProgramVars
            .apply(
                SearchConfig::builder().name("my-app"),
                &ProgramIdentity::new("my-app"),
                &e,
            )
            .build();
        assert_eq!(config.locations(), &[PathBuf::from("/opt/conf")]);
    }
}
