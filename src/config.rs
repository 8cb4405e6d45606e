use crate::inventory::ProcessOrder;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub inventory: InventoryConfig,
    pub publishing: PublishingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    /// Upper bound on a single TCP connect attempt.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

fn default_connect_timeout_ms() -> u64 {
    2000
}

#[derive(Debug, Clone, Deserialize)]
pub struct InventoryConfig {
    /// Used by GET /api/processes when no limit is given.
    #[serde(default = "default_max_processes")]
    pub default_max_processes: usize,
    #[serde(default)]
    pub order: ProcessOrder,
    /// Used by GET /api/dir when no limit is given.
    #[serde(default = "default_max_files")]
    pub default_max_files: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            default_max_processes: default_max_processes(),
            order: ProcessOrder::default(),
            default_max_files: default_max_files(),
        }
    }
}

fn default_max_processes() -> usize {
    10
}

fn default_max_files() -> usize {
    100
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublishingConfig {
    pub cpu_stats_frequency_ms: u64,
    pub network_stats_frequency_ms: u64,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
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
        anyhow::ensure!(!self.server.host.is_empty(), "server.host must be non-empty");
        anyhow::ensure!(
            self.probe.connect_timeout_ms > 0,
            "probe.connect_timeout_ms must be > 0, got {}",
            self.probe.connect_timeout_ms
        );
        anyhow::ensure!(
            self.inventory.default_max_processes > 0,
            "inventory.default_max_processes must be > 0, got {}",
            self.inventory.default_max_processes
        );
        anyhow::ensure!(
            self.inventory.default_max_files > 0,
            "inventory.default_max_files must be > 0, got {}",
            self.inventory.default_max_files
        );
        anyhow::ensure!(
            self.publishing.cpu_stats_frequency_ms > 0,
            "publishing.cpu_stats_frequency_ms must be > 0, got {}",
            self.publishing.cpu_stats_frequency_ms
        );
        anyhow::ensure!(
            self.publishing.network_stats_frequency_ms > 0,
            "publishing.network_stats_frequency_ms must be > 0, got {}",
            self.publishing.network_stats_frequency_ms
        );
        Ok(())
    }
}
