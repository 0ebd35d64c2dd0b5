use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub security: SecurityConfig,
}

/// Which implementation set backs the content services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentBackend {
    /// SQL-backed catalog (the normal mode).
    #[default]
    Database,
    /// Seeded in-memory catalog; useful for demos and frontend work
    /// without a database.
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// SeaORM connection string; `DATABASE_URL` overrides this.
    pub database_url: String,

    pub log_level: String,

    /// 0 means "let tokio decide".
    pub worker_threads: usize,

    pub max_db_connections: u32,

    pub min_db_connections: u32,

    pub content_backend: ContentBackend,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:macabre.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 0,
            max_db_connections: 5,
            min_db_connections: 1,
            content_backend: ContentBackend::Database,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    /// "*" means any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8700,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Lifetime of a session token, in days.
    pub session_ttl_days: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            session_ttl_days: 30,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        let mut config = None;
        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                config = Some(Self::load_from_path(path)?);
                break;
            }
        }

        let mut config = config.unwrap_or_else(|| {
            info!("No config file found, using defaults");
            Self::default()
        });

        if let Ok(database_url) = std::env::var("DATABASE_URL")
            && !database_url.is_empty()
        {
            config.general.database_url = database_url;
        }

        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.database_url.is_empty() {
            anyhow::bail!("database_url must not be empty");
        }
        if self.general.max_db_connections == 0 {
            anyhow::bail!("max_db_connections must be at least 1");
        }
        if self.general.min_db_connections > self.general.max_db_connections {
            anyhow::bail!("min_db_connections must not exceed max_db_connections");
        }
        if self.security.session_ttl_days <= 0 {
            anyhow::bail!("session_ttl_days must be positive");
        }
        Ok(())
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    pub fn create_default_if_missing() -> Result<()> {
        let path = Self::default_config_path();
        if path.exists() {
            info!("Config already exists at: {}", path.display());
            return Ok(());
        }
        Self::default().save_to_path(&path)
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("macabre").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".macabre").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config() {
        let config: Config = toml::from_str(
            r#"
            [general]
            database_url = "postgres://localhost/macabre"
            content_backend = "memory"

            [server]
            port = 9000
            "#,
        )
        .unwrap();

        assert_eq!(config.general.database_url, "postgres://localhost/macabre");
        assert_eq!(config.general.content_backend, ContentBackend::Memory);
        assert_eq!(config.server.port, 9000);
        // untouched sections keep their defaults
        assert_eq!(config.security.session_ttl_days, 30);
    }

    #[test]
    fn test_validate_rejects_bad_pool() {
        let mut config = Config::default();
        config.general.min_db_connections = 10;
        config.general.max_db_connections = 2;
        assert!(config.validate().is_err());
    }
}
