use std::path::PathBuf;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding the item collection.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_file: default_data_file() }
    }
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 8000 }
fn default_data_file() -> PathBuf { PathBuf::from("data.json") }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

/// Load `path`, falling back to [`from_env`] only when the file does not exist.
/// A file that exists but cannot be read or parsed is an error.
pub fn load_or_env(path: &str) -> Result<AppConfig> {
    match load_from_file(path) {
        Ok(cfg) => Ok(cfg),
        Err(e) if is_missing_file(&e) => Ok(from_env()),
        Err(e) => Err(e.context(format!("failed to load config file {path}"))),
    }
}

fn is_missing_file(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

/// Build a config from `SERVER_HOST`, `SERVER_PORT`, `TOKIO_WORKER_THREADS`
/// and `DATA_FILE`, using defaults for anything unset or unparseable.
pub fn from_env() -> AppConfig {
    let mut cfg = AppConfig::default();
    if let Ok(host) = std::env::var("SERVER_HOST") {
        cfg.server.host = host;
    }
    if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        cfg.server.port = port;
    }
    if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
        cfg.server.worker_threads = Some(w);
    }
    cfg.storage.apply_env();
    cfg
}

impl AppConfig {
    /// Config file if present, environment otherwise; then normalize.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_or_env(&config_path())?;
        cfg.storage.apply_env();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl StorageConfig {
    /// `DATA_FILE` overrides the configured path.
    pub fn apply_env(&mut self) {
        if let Ok(path) = std::env::var("DATA_FILE") {
            if !path.trim().is_empty() {
                self.data_file = PathBuf::from(path);
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(anyhow!("storage.data_file is empty; set it in config.toml or DATA_FILE"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_all_interfaces_on_8000() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:8000");
        assert_eq!(cfg.storage.data_file, PathBuf::from("data.json"));
    }

    #[test]
    fn parses_partial_toml() -> Result<()> {
        let mut cfg = load_from_str(
            r#"
            [server]
            port = 9000
            worker_threads = 0

            [storage]
            data_file = "var/items.json"
            "#,
        )?;
        cfg.normalize_and_validate()?;
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.storage.data_file, PathBuf::from("var/items.json"));
        Ok(())
    }

    #[test]
    fn empty_toml_is_all_defaults() -> Result<()> {
        let cfg = load_from_str("")?;
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.storage.data_file, PathBuf::from("data.json"));
        Ok(())
    }

    #[test]
    fn malformed_config_file_is_an_error() -> Result<()> {
        let path = std::env::temp_dir().join(format!("cfg_{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[server]\nport = \"not a number\"\n")?;
        let res = load_or_env(&path.to_string_lossy());
        let _ = std::fs::remove_file(&path);
        let err = res.expect_err("malformed file must not fall back to env");
        assert!(err.to_string().contains("failed to load config file"));
        Ok(())
    }

    #[test]
    fn missing_config_file_uses_environment() -> Result<()> {
        let path = std::env::temp_dir().join(format!("cfg_missing_{}.toml", uuid::Uuid::new_v4()));
        let cfg = load_or_env(&path.to_string_lossy())?;
        assert!(cfg.server.port > 0);
        assert!(!cfg.storage.data_file.as_os_str().is_empty());
        Ok(())
    }

    #[test]
    fn rejects_port_zero_and_empty_data_file() {
        let mut cfg = AppConfig::default();
        cfg.server.port = 0;
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.storage.data_file = PathBuf::new();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn blank_host_falls_back() -> Result<()> {
        let mut cfg = AppConfig::default();
        cfg.server.host = "  ".into();
        cfg.normalize_and_validate()?;
        assert_eq!(cfg.server.host, "0.0.0.0");
        Ok(())
    }
}
