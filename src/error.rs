use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EtcfigError {
    #[error("Failed to parse JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to parse XML in {path}: {reason}")]
    Xml { path: PathBuf, reason: String },

    #[error("Failed to parse INI in {path}: {source}")]
    Ini { path: PathBuf, source: ini::Error },

    #[error("Key '{key}' in {path} is both a value and a section")]
    KeyConflict { path: PathBuf, key: String },

    #[error("Failed to parse TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid configuration in {path}: {reason}")]
    InvalidValue { path: PathBuf, reason: String },

    #[error("Cannot capture the current state of the decode target: {reason}")]
    Target { reason: String },

    #[error("No default search locations for platform '{os}' — pass a SearchConfig or override paths")]
    NoDefaultConfig { os: String },

    #[error("No configuration file found (searched {} candidates)", .candidates.len())]
    NoConfigFound { candidates: Vec<PathBuf> },
}

impl EtcfigError {
    /// The file this error is about, if it concerns a single candidate.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            EtcfigError::Json { path, .. }
            | EtcfigError::Xml { path, .. }
            | EtcfigError::Ini { path, .. }
            | EtcfigError::KeyConflict { path, .. }
            | EtcfigError::Toml { path, .. }
            | EtcfigError::Read { path, .. }
            | EtcfigError::InvalidValue { path, .. } => Some(path),
            EtcfigError::Target { .. }
            | EtcfigError::NoDefaultConfig { .. }
            | EtcfigError::NoConfigFound { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xml_error_formats_correctly() {
        let err = EtcfigError::Xml {
            path: "/etc/myapp/myapp.xml".into(),
            reason: "unexpected end of file".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("myapp.xml"));
        assert!(msg.contains("unexpected end of file"));
    }

    #[test]
    fn invalid_value_carries_path() {
        let err = EtcfigError::InvalidValue {
            path: "/etc/myapp/myapp".into(),
            reason: "invalid type".into(),
        };
        assert_eq!(
            err.path(),
            Some(std::path::Path::new("/etc/myapp/myapp"))
        );
    }

    #[test]
    fn key_conflict_names_key_and_file() {
        let err = EtcfigError::KeyConflict {
            path: "/etc/myapp/myapp.ini".into(),
            key: "database".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'database'"));
        assert!(msg.contains("myapp.ini"));
        assert_eq!(err.path(), Some(std::path::Path::new("/etc/myapp/myapp.ini")));
    }

    #[test]
    fn no_default_config_names_platform() {
        let err = EtcfigError::NoDefaultConfig { os: "windows".into() };
        assert!(err.to_string().contains("windows"));
        assert!(err.path().is_none());
    }

    #[test]
    fn no_config_found_counts_candidates() {
        let err = EtcfigError::NoConfigFound {
            candidates: vec!["/etc/a".into(), "/etc/b".into()],
        };
        assert!(err.to_string().contains("2 candidates"));
    }
}
