//! # etcfig demo application
//!
//! A small program that loads its configuration the way a real service would
//! at startup, then prints what it found. It exists to manually exercise
//! etcfig.
//!
//! ```sh
//! cargo run --example etcfig_demo
//! cargo run --example etcfig_demo -- --candidates
//! cargo run --example etcfig_demo -- --config ./demo.json -v
//! ETCFIG_DEMO_DIRNAME=/tmp/conf cargo run --example etcfig_demo -- --candidates
//! ```
//!
//! `-v` installs a `tracing` subscriber at debug level, which shows each
//! applied or ignored file.

mod config;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use etcfig::{ConfigPathArgs, SearchConfig};

use config::DemoConfig;

/// etcfig demo — load configuration from the standard locations.
#[derive(Parser, Debug)]
#[command(name = "etcfig_demo")]
struct Cli {
    #[command(flatten)]
    config: ConfigPathArgs,

    /// Print the candidate paths instead of loading them.
    #[arg(long)]
    candidates: bool,

    /// Log what the loader does.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("etcfig=trace"))
            .with_writer(std::io::stderr)
            .init();
    }

    let Some(search) = SearchConfig::platform_default() else {
        eprintln!("no default config locations on this platform");
        return ExitCode::FAILURE;
    };

    if cli.candidates {
        for path in search.candidates(cli.config.overrides()) {
            println!("{}", path.display());
        }
        return ExitCode::SUCCESS;
    }

    let mut config = DemoConfig::default();
    match search.load_with(&mut config, cli.config.overrides()) {
        Ok(loaded) => {
            for path in &loaded.applied {
                println!("loaded {}", path.display());
            }
            if loaded.is_empty() {
                println!("no config file found, using defaults");
            }
            println!("{}", config.greeting);
            println!(
                "serving on {}:{} (max {} connections)",
                config.server.host, config.server.port, config.server.max_connections
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
