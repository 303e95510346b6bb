use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_portrait_base_url")]
    pub portrait_base_url: String,
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    /// Per-request deadline. Ignored in the browser, where fetch has no timeout knob.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_favorites_key")]
    pub favorites_key: String,
    #[serde(default = "default_storage_path")]
    pub path: String,
}

fn default_base_url() -> String {
    "https://swapi.dev/api".to_string()
}
fn default_portrait_base_url() -> String {
    "https://akabab.github.io/starwars-api/api".to_string()
}
fn default_max_concurrency() -> usize {
    16
}
fn default_favorites_key() -> String {
    "favorites".to_string()
}
fn default_storage_path() -> String {
    "favorites.json".to_string()
}
fn default_page_size() -> usize {
    5
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            portrait_base_url: default_portrait_base_url(),
            max_concurrency: default_max_concurrency(),
            request_timeout_secs: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            favorites_key: default_favorites_key(),
            path: default_storage_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            storage: StorageConfig::default(),
            page_size: default_page_size(),
        }
    }
}

impl ApiConfig {
    pub fn listing_url(&self) -> String {
        format!("{}/people/", self.base_url.trim_end_matches('/'))
    }

    pub fn portrait_url(&self, id: u32) -> String {
        format!("{}/id/{}.json", self.portrait_base_url.trim_end_matches('/'), id)
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("{} not found. Please create one.", path.display());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = serde_yaml_ng::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file means "use the public endpoints".
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("{} not found, using default configuration", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml_ng::to_string(self)?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}
