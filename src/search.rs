use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::candidates;
use crate::env::Environment;
use crate::error::EtcfigError;
use crate::identity::ProgramIdentity;
use crate::loader;
use crate::platform;
use crate::types::Loaded;

/// Where a program's configuration may live.
///
/// Immutable once built; construct one with [`SearchConfig::builder`] or take
/// the platform default from [`SearchConfig::platform_default`].
///
/// Locations and files are both **priority-ascending**: candidates are probed
/// location-major, file-minor, every file that opens is decoded, and a later
/// file overrides the keys an earlier one set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchConfig {
    name: String,
    files: Vec<String>,
    locations: Vec<PathBuf>,
    primary: Option<PathBuf>,
}

impl SearchConfig {
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::default()
    }

    /// The default for the running program on the current platform, or `None`
    /// where the platform has no defaults.
    ///
    /// Reads the process environment, so build it once at startup and pass it
    /// to whatever needs to load configuration.
    pub fn platform_default() -> Option<SearchConfig> {
        platform::default_for(
            std::env::consts::OS,
            &ProgramIdentity::current(),
            &Environment::capture(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn locations(&self) -> &[PathBuf] {
        &self.locations
    }

    /// File probed before every other candidate. When it decodes cleanly the
    /// search stops there.
    pub fn primary_file(&self) -> Option<&Path> {
        self.primary.as_deref()
    }

    /// Namespace each location with the program name.
    ///
    /// `/etc` becomes `/etc/{name}`; a location whose last segment already is
    /// the name is kept. With an empty name the locations come back as-is, and
    /// empty locations always pass through untouched.
    pub fn resolve_dirs(&self) -> Vec<PathBuf> {
        if self.name.is_empty() {
            return self.locations.clone();
        }
        let name = OsStr::new(&self.name);
        self.locations
            .iter()
            .map(|dir| {
                if dir.as_os_str().is_empty() || dir.file_name() == Some(name) {
                    dir.clone()
                } else {
                    dir.join(name)
                }
            })
            .collect()
    }

    /// Every path a load would probe, in order, each at most once.
    ///
    /// The primary file (if any) comes first, then the resolved directories ×
    /// files, extended by `overrides` (see [`candidates::build_candidates`]).
    pub fn candidates<P: AsRef<Path>>(&self, overrides: &[P]) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.primary.iter().cloned().collect();
        let rest = candidates::build_candidates(&self.resolve_dirs(), &self.files, overrides);
        paths.extend(rest.into_iter().filter(|p| self.primary.as_ref() != Some(p)));
        paths
    }

    /// Decode every existing candidate into `target`, later files winning.
    pub fn load<T>(&self, target: &mut T) -> Result<Loaded, EtcfigError>
    where
        T: Serialize + DeserializeOwned,
    {
        self.load_with::<T, &Path>(target, &[])
    }

    /// Like [`load`](Self::load), with extra override paths searched after the
    /// configured ones.
    pub fn load_with<T, P>(&self, target: &mut T, overrides: &[P]) -> Result<Loaded, EtcfigError>
    where
        T: Serialize + DeserializeOwned,
        P: AsRef<Path>,
    {
        let paths = self.candidates(overrides);
        loader::load_paths(target, self.primary.as_deref(), &paths)
    }
}

/// Builder for [`SearchConfig`].
#[derive(Debug, Clone, Default)]
pub struct SearchConfigBuilder {
    name: String,
    files: Vec<String>,
    locations: Vec<PathBuf>,
    primary: Option<PathBuf>,
}

impl SearchConfigBuilder {
    /// Set the program name. It namespaces locations and, when no file is
    /// added, is the file name too.
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Append a candidate file base name. Empty names are ignored.
    pub fn file(mut self, file: &str) -> Self {
        if !file.is_empty() {
            self.files.push(file.to_string());
        }
        self
    }

    /// Replace the candidate file names.
    pub fn files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.files.clear();
        for file in files {
            self = self.file(file.as_ref());
        }
        self
    }

    /// Append a base directory.
    pub fn location(mut self, dir: impl Into<PathBuf>) -> Self {
        self.locations.push(dir.into());
        self
    }

    /// Replace the base directories.
    pub fn locations<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.locations = dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn primary_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.primary = Some(path.into());
        self
    }

    pub fn build(self) -> SearchConfig {
        let files = if self.files.is_empty() && !self.name.is_empty() {
            vec![self.name.clone()]
        } else {
            self.files
        };
        SearchConfig {
            name: self.name,
            files,
            locations: self.locations,
            primary: self.primary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::TestConfig;
    use std::fs;
    use tempfile::TempDir;

    fn paths(items: &[&str]) -> Vec<PathBuf> {
        items.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn name_is_default_file() {
        let config = SearchConfig::builder().name("myapp").build();
        assert_eq!(config.files(), &["myapp".to_string()]);
    }

    #[test]
    fn explicit_files_replace_default() {
        let config = SearchConfig::builder()
            .name("myapp")
            .file("myapp.json")
            .file("myapp.ini")
            .build();
        assert_eq!(config.files(), &["myapp.json".to_string(), "myapp.ini".to_string()]);
    }

    #[test]
    fn files_replaces_earlier_files() {
        let config = SearchConfig::builder()
            .file("a.json")
            .files(["b.json", "", "c.xml"])
            .build();
        assert_eq!(config.files(), &["b.json".to_string(), "c.xml".to_string()]);
    }

    #[test]
    fn empty_name_has_no_default_file() {
        let config = SearchConfig::builder().location("/etc").build();
        assert!(config.files().is_empty());
    }

    // --- resolve_dirs ---

    #[test]
    fn resolve_dirs_empty_name_is_identity() {
        let config = SearchConfig::builder()
            .locations(["/etc", "", "/usr/local/etc"])
            .build();
        assert_eq!(config.resolve_dirs(), paths(&["/etc", "", "/usr/local/etc"]));
    }

    #[test]
    fn resolve_dirs_appends_name() {
        let config = SearchConfig::builder()
            .name("foo")
            .locations(["/etc", "/usr/local/etc"])
            .build();
        assert_eq!(config.resolve_dirs(), paths(&["/etc/foo", "/usr/local/etc/foo"]));
    }

    #[test]
    fn resolve_dirs_no_double_nesting() {
        let config = SearchConfig::builder()
            .name("foo")
            .locations(["/etc/foo", "/opt/foo/"])
            .build();
        assert_eq!(config.resolve_dirs(), paths(&["/etc/foo", "/opt/foo/"]));
    }

    #[test]
    fn resolve_dirs_only_matches_whole_segment() {
        let config = SearchConfig::builder()
            .name("foo")
            .locations(["/etc/foobar", "/foo/etc"])
            .build();
        assert_eq!(
            config.resolve_dirs(),
            paths(&["/etc/foobar/foo", "/foo/etc/foo"])
        );
    }

    #[test]
    fn resolve_dirs_keeps_empty_entries() {
        let config = SearchConfig::builder().name("foo").locations(["", "/etc"]).build();
        assert_eq!(config.resolve_dirs(), paths(&["", "/etc/foo"]));
    }

    #[test]
    fn resolve_dirs_every_entry_is_namespaced() {
        let config = SearchConfig::builder()
            .name("foo")
            .locations(["/etc", "/etc/foo", "relative", "/a/b/c"])
            .build();
        for (orig, resolved) in config.locations().iter().zip(config.resolve_dirs()) {
            assert!(resolved.ends_with("foo"));
            assert!(resolved == *orig || resolved == orig.join("foo"));
        }
    }

    // --- candidates ---

    #[test]
    fn candidates_are_location_major() {
        let config = SearchConfig::builder()
            .name("foo")
            .locations(["/etc", "/usr/local/etc"])
            .files(["foo.json", "foo"])
            .build();
        assert_eq!(
            config.candidates::<&str>(&[]),
            paths(&[
                "/etc/foo/foo.json",
                "/etc/foo/foo",
                "/usr/local/etc/foo/foo.json",
                "/usr/local/etc/foo/foo",
            ])
        );
    }

    #[test]
    fn primary_file_comes_first_once() {
        let config = SearchConfig::builder()
            .name("foo")
            .location("/etc")
            .primary_file("/etc/foo/foo")
            .build();
        assert_eq!(config.candidates::<&str>(&[]), paths(&["/etc/foo/foo"]));
    }

    #[test]
    fn overrides_are_not_namespaced() {
        let config = SearchConfig::builder().name("foo").location("/etc").build();
        assert_eq!(
            config.candidates(&["/opt/app/custom.json"]),
            paths(&[
                "/etc/foo/foo",
                "/etc/foo/custom.json",
                "/opt/app/foo",
                "/opt/app/custom.json",
            ])
        );
    }

    // --- load ---

    #[test]
    fn load_layers_locations_in_order() {
        let system = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        fs::create_dir(system.path().join("myapp")).unwrap();
        fs::create_dir(user.path().join("myapp")).unwrap();
        fs::write(
            system.path().join("myapp").join("myapp"),
            "host = system\nport = 1000\n",
        )
        .unwrap();
        fs::write(user.path().join("myapp").join("myapp"), "port = 2000\n").unwrap();

        let config = SearchConfig::builder()
            .name("myapp")
            .location(system.path())
            .location(user.path())
            .build();
        let mut target = TestConfig::default();
        let loaded = config.load(&mut target).unwrap();

        assert_eq!(loaded.applied.len(), 2);
        assert_eq!(target.host, "system");
        assert_eq!(target.port, 2000);
    }

    #[test]
    fn load_with_override_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("custom.json");
        fs::write(&file, r#"{"debug": true}"#).unwrap();

        let config = SearchConfig::builder().name("myapp").build();
        let mut target = TestConfig::default();
        let loaded = config.load_with(&mut target, &[&file]).unwrap();

        assert_eq!(loaded.applied, vec![file]);
        assert!(target.debug);
    }

    #[test]
    fn load_with_override_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("myapp.xml"), "<c><port>7</port></c>").unwrap();

        let config = SearchConfig::builder().name("myapp").file("myapp.xml").build();
        let mut target = TestConfig::default();
        config.load_with(&mut target, &[dir.path()]).unwrap();

        assert_eq!(target.port, 7);
    }
}
