use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Seconds between two runs of the inactivity sweep
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    /// Maximum heartbeat age before a participant counts as inactive
    #[serde(default = "default_staleness_threshold_secs")]
    pub staleness_threshold_secs: u64,
}

fn default_port() -> u16 {
    5000
}

fn default_database_url() -> String {
    "sqlite://batepapo.db".to_string()
}

fn default_sweep_interval_secs() -> u64 {
    15
}

fn default_staleness_threshold_secs() -> u64 {
    10
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default())
            .build()?;

        let settings: Config = config
            .try_deserialize()
            .unwrap_or_else(|_| Config::default());

        Ok(settings)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            database_url: default_database_url(),
            sweep_interval_secs: default_sweep_interval_secs(),
            staleness_threshold_secs: default_staleness_threshold_secs(),
        }
    }
}
