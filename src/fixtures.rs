#[cfg(test)]
pub mod test {
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct TestConfig {
        pub host: String,
        pub port: u16,
        pub debug: bool,
        pub database: TestDbConfig,
    }

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct TestDbConfig {
        pub url: Option<String>,
        pub pool_size: usize,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                host: "localhost".into(),
                port: 8080,
                debug: false,
                database: TestDbConfig {
                    url: None,
                    pool_size: 5,
                },
            }
        }
    }

    /// String-typed fields that INI and XML values often look numeric for.
    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct TextConfig {
        pub name: String,
        pub version: String,
        pub token: String,
        pub port: u16,
        pub tags: Vec<String>,
    }

    impl Default for TextConfig {
        fn default() -> Self {
            Self {
                name: "app".into(),
                version: "0".into(),
                token: String::new(),
                port: 80,
                tags: Vec::new(),
            }
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = TestConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 8080);
        assert!(!config.debug);
        assert_eq!(config.database.url, None);
        assert_eq!(config.database.pool_size, 5);
    }
}
