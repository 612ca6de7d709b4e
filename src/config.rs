use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming a TOML config file.
pub const CONFIG_ENV: &str = "CRAWLER_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub crawler: CrawlerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Knobs of the crawl engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Deepest link hop that is still fetched; the seed is depth 0.
    pub max_depth: usize,

    /// Stop after this many page records. `None` means no ceiling.
    pub max_pages: Option<usize>,

    /// Per-request timeout of the HTTP client.
    pub timeout_secs: u64,

    /// Fixed user agent. When unset one is picked from the built-in list.
    pub user_agent: Option<String>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            max_pages: None,
            timeout_secs: 30,
            user_agent: None,
        }
    }
}

impl AppConfig {
    /// Loads the config file at `path` (or `$CRAWLER_CONFIG`), then applies
    /// the `HOST` and `PORT` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var(CONFIG_ENV).ok();
        let path = path.or(from_env.as_deref().map(Path::new));

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("PORT must be a valid number, got {:?}", port))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.crawler.max_depth, 4);
        assert_eq!(config.crawler.max_pages, None);
        assert_eq!(config.crawler.timeout_secs, 30);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [crawler]
            max_depth = 2
            max_pages = 25
            "#,
        )
        .unwrap();

        assert_eq!(config.crawler.max_depth, 2);
        assert_eq!(config.crawler.max_pages, Some(25));
        assert_eq!(config.crawler.timeout_secs, 30);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_rejects_bad_types() {
        assert!(AppConfig::from_toml("[server]\nport = \"eighty\"").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nhost = \"0.0.0.0\"\nport = 9000").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = AppConfig::from_file(Path::new("/nonexistent/crawler.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/crawler.toml"));
    }
}
