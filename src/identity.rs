//! The running program's identity.
//!
//! The name is taken from the invocation name (`argv[0]`), stripped to its
//! final path segment. It namespaces config directories (`/etc/{name}`), is
//! the default config file base name, and (uppercased) prefixes the
//! program-specific environment variables.

use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramIdentity {
    name: String,
}

impl ProgramIdentity {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    /// Identity of the running process, from its invocation name.
    ///
    /// Falls back to an empty name when `argv[0]` is absent, which disables
    /// directory namespacing.
    pub fn current() -> Self {
        let argv0 = std::env::args_os()
            .next()
            .map(|a| a.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_invocation(&argv0)
    }

    /// `"/usr/bin/myapp"` → `myapp`.
    pub fn from_invocation(argv0: &str) -> Self {
        let name = Path::new(argv0)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Environment variable prefix: the name uppercased, with anything that
    /// cannot appear in a shell variable name mapped to `_`.
    pub fn env_prefix(&self) -> String {
        self.name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect()
    }
}
