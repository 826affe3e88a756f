// Configuration module entry point
// Loads the layered configuration and builds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;
use std::path::Path;

// Re-export public types
pub use state::AppState;
pub use types::{Config, LoggingConfig, PerformanceConfig, ServerConfig, SiteConfig};

/// Config file used when none is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

impl Config {
    /// Load configuration from the given file, then `SITE_*` environment overrides
    ///
    /// A missing file is not an error; defaults fill every unset key.
    /// Nested keys use a double underscore, e.g. `SITE_SERVER__PORT=9000`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("SITE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("site.root", "site")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.connection_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Check that the configured root exists and is a directory
    pub fn validate(&self) -> Result<(), String> {
        let root = Path::new(&self.site.root);
        if !root.exists() {
            return Err(format!("Site root '{}' does not exist", self.site.root));
        }
        if !root.is_dir() {
            return Err(format!("Site root '{}' is not a directory", self.site.root));
        }
        if self.performance.connection_timeout == 0 {
            return Err("performance.connection_timeout must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("absent.toml");
        let cfg = Config::load_from(missing.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.site.root, "site");
        assert_eq!(cfg.site.index_files, vec!["index.html".to_string()]);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.performance.connection_timeout, 30);
        assert!(cfg.performance.max_connections.is_none());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("server.toml");
        fs::write(
            &path,
            r#"
[server]
port = 9090

[site]
root = "public"
index_files = ["home.html", "index.html"]

[logging]
level = "debug"
access_log = false

[performance]
max_connections = 64
"#,
        )
        .unwrap();

        let cfg = Config::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.site.root, "public");
        assert_eq!(cfg.site.index_files, vec!["home.html", "index.html"]);
        assert_eq!(cfg.logging.level, "debug");
        assert!(!cfg.logging.access_log);
        assert_eq!(cfg.performance.max_connections, Some(64));
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::default();
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 8080);
        cfg.server.host = "not an address".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }

    #[test]
    fn test_validate_root() {
        let temp = TempDir::new().unwrap();
        let mut cfg = Config::default();

        cfg.site.root = temp.path().to_string_lossy().into_owned();
        assert!(cfg.validate().is_ok());

        cfg.site.root = temp.path().join("missing").to_string_lossy().into_owned();
        assert!(cfg.validate().is_err());

        let file = temp.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        cfg.site.root = file.to_string_lossy().into_owned();
        assert!(cfg.validate().is_err());
    }
}
