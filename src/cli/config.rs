use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// Persistent CLI state: which server to talk to and the current admin session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    pub server_url: String,
    pub session: Option<Session>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            session: None,
        }
    }
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

impl CliConfig {
    /// Token of a live session, if any.
    pub fn token(&self) -> Option<&str> {
        self.session
            .as_ref()
            .filter(|s| !s.is_expired())
            .map(|s| s.token.as_str())
    }
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("ATELIER_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("atelier").join("cli")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

pub fn config_file() -> anyhow::Result<PathBuf> {
    Ok(get_config_dir()?.join("cli.json"))
}

pub fn load_cli_config() -> anyhow::Result<CliConfig> {
    let file = config_file()?;

    if !file.exists() {
        return Ok(CliConfig::default());
    }

    let content = fs::read_to_string(file)?;
    let config: CliConfig = serde_json::from_str(&content)?;
    Ok(config)
}

pub fn save_cli_config(config: &CliConfig) -> anyhow::Result<()> {
    let file = config_file()?;

    let content = serde_json::to_string_pretty(config)?;
    fs::write(file, content)?;
    Ok(())
}

/// Reads a page document from disk; `.yaml`/`.yml` as YAML, anything else as JSON.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let parsed = if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?
    } else {
        serde_json::from_str(&content).map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?
    };
    Ok(parsed)
}
