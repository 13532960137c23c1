use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

/// Which data directory the dashboard reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Debug,
    Production,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_environment")]
    pub environment: Environment,
    #[serde(default = "default_debug_data_dir")]
    pub debug_data_dir: String,
    #[serde(default)]
    pub production_data_dir: String,
}

fn default_environment() -> Environment {
    Environment::Debug
}

fn default_debug_data_dir() -> String {
    "machine_data".into()
}

impl DataConfig {
    /// Store root for the selected environment. A relative debug directory is
    /// resolved against `config_dir`; the production directory is used as-is.
    pub fn resolve_root(&self, config_dir: &Path) -> PathBuf {
        match self.environment {
            Environment::Production => PathBuf::from(&self.production_data_dir),
            Environment::Debug => {
                let dir = Path::new(&self.debug_data_dir);
                if dir.is_absolute() {
                    dir.to_path_buf()
                } else {
                    config_dir.join(dir)
                }
            }
        }
    }
}

/// Browser polling intervals for each page.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshConfig {
    pub homepage_interval_ms: u64,
    pub detail_interval_ms: u64,
    pub host_interval_ms: u64,
}

/// Synthetic data written at startup in the debug environment.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    #[serde(default = "default_seed_machines")]
    pub machines: Vec<String>,
    #[serde(default = "default_seed_days")]
    pub days: u32,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            machines: default_seed_machines(),
            days: default_seed_days(),
        }
    }
}

fn default_seed_machines() -> Vec<String> {
    vec!["machine1".into(), "machine2".into(), "machine3".into()]
}

fn default_seed_days() -> u32 {
    30
}

impl AppConfig {
    /// Path of the config file: `CONFIG_FILE` or `config.toml`.
    pub fn path() -> PathBuf {
        std::env::var("CONFIG_FILE")
            .unwrap_or_else(|_| "config.toml".into())
            .into()
    }

    pub fn load() -> anyhow::Result<Self> {
        let path = Self::path();
        let s = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("reading {}: {}", path.display(), e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        match self.data.environment {
            Environment::Debug => anyhow::ensure!(
                !self.data.debug_data_dir.is_empty(),
                "data.debug_data_dir must be non-empty"
            ),
            Environment::Production => anyhow::ensure!(
                !self.data.production_data_dir.is_empty(),
                "data.production_data_dir must be non-empty in production"
            ),
        }
        anyhow::ensure!(
            self.refresh.homepage_interval_ms > 0,
            "refresh.homepage_interval_ms must be > 0, got {}",
            self.refresh.homepage_interval_ms
        );
        anyhow::ensure!(
            self.refresh.detail_interval_ms > 0,
            "refresh.detail_interval_ms must be > 0, got {}",
            self.refresh.detail_interval_ms
        );
        anyhow::ensure!(
            self.refresh.host_interval_ms > 0,
            "refresh.host_interval_ms must be > 0, got {}",
            self.refresh.host_interval_ms
        );
        anyhow::ensure!(
            self.seed.days > 0,
            "seed.days must be > 0, got {}",
            self.seed.days
        );
        for id in &self.seed.machines {
            anyhow::ensure!(
                crate::state_store::is_valid_entity_id(id),
                "seed.machines contains an invalid machine id: {:?}",
                id
            );
        }
        Ok(())
    }
}
