//! Clap adapter for etcfig.
//!
//! Compiled only with the `clap` Cargo feature (on by default). It offers a
//! single flattenable args struct that gives an app a repeatable
//! `--config <PATH>` flag; the collected paths are the override list for
//! [`load_default`](crate::load_default) or
//! [`SearchConfig::load_with`](crate::SearchConfig::load_with).
//!
//! Apps using another parser can skip this module and pass paths directly.

use std::path::PathBuf;

use clap::Args;

/// Embed into your app's clap derive:
/// ```ignore
/// #[derive(Parser)]
/// struct Cli {
///     #[command(flatten)]
///     config: ConfigPathArgs,
/// }
/// ```
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigPathArgs {
    /// Also read configuration from this file, or from this directory.
    /// May be repeated; later paths override earlier ones.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Vec<PathBuf>,
}

impl ConfigPathArgs {
    pub fn overrides(&self) -> &[PathBuf] {
        &self.config
    }
}
