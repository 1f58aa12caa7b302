use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Application configuration loaded from a TOML file.
///
/// Only the HTTP surface is file-configured. Remote datastore
/// connectivity comes from the environment (see [`DatastoreConfig`]) so
/// that credentials never land in a checked-in file.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Exact origins allowed to make cross-origin requests. No wildcard
    /// support; the list is enumerated on purpose.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_bind() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "https://your-vercel-app.vercel.app".to_string(),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

/// Loads configuration from `path`. A missing file is not an error; the
/// service runs on defaults so a bare `market-map serve` just works.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    Ok(config)
}

/// Remote datastore connectivity, read once at startup.
///
/// Both values must be present for remote mode; a partial configuration
/// disables remote mode rather than failing startup.
#[derive(Debug, Clone)]
pub struct DatastoreConfig {
    pub url: String,
    pub key: String,
}

impl DatastoreConfig {
    pub const URL_VAR: &'static str = "SUPABASE_URL";
    pub const KEY_VAR: &'static str = "SUPABASE_KEY";

    pub fn from_env() -> Option<Self> {
        let url = std::env::var(Self::URL_VAR).ok()?;
        let key = std::env::var(Self::KEY_VAR).ok()?;
        if url.is_empty() || key.is_empty() {
            return None;
        }
        Some(Self { url, key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = load_config(Path::new("/nonexistent/market-map.toml")).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:8000");
        assert_eq!(config.cors.allowed_origins.len(), 2);
    }

    #[test]
    fn parses_full_config() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("market-map.toml");
        std::fs::write(
            &path,
            r#"
[server]
bind = "127.0.0.1:9000"

[cors]
allowed_origins = ["https://example.com"]
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:9000");
        assert_eq!(config.cors.allowed_origins, vec!["https://example.com"]);
    }

    #[test]
    fn partial_config_falls_back_to_defaults_per_section() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("market-map.toml");
        std::fs::write(&path, "[server]\nbind = \"127.0.0.1:9001\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:9001");
        assert_eq!(config.cors.allowed_origins.len(), 2);
    }

    #[test]
    fn rejects_malformed_toml() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("market-map.toml");
        std::fs::write(&path, "[server\nbind = ").unwrap();
        assert!(load_config(&path).is_err());
    }
}
