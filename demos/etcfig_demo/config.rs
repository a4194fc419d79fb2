//! Configuration structs for the etcfig demo.
//!
//! Defaults live in the `Default` impls; any config file found only needs the
//! keys it wants to change.
//!
//! The same settings in each supported format:
//!
//! ```text
//! # etcfig_demo (INI, no extension)      <!-- etcfig_demo.xml -->
//! greeting = hi                          <demo greeting="hi">
//! [server]                                 <server><port>9000</port></server>
//! port = 9000                            </demo>
//! ```

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct DemoConfig {
    /// Printed by the demo on startup.
    pub greeting: String,
    pub server: ServerConfig,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            greeting: "hello".into(),
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 8080,
                max_connections: 64,
            },
        }
    }
}
