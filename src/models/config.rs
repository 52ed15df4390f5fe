use serde::Deserialize;

/// Knobs for the combination optimizer.
#[derive(Debug, Clone, Deserialize)]
pub struct OptimizerConfig {
    /// Hard cap on combination size; request `maxSize` is clamped to this.
    #[serde(default = "default_max_combination_size")]
    pub max_combination_size: usize,
    /// Enumeration time budget per request, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Weight of live union coverage in the subset score.
    #[serde(default = "default_live_weight")]
    pub live_weight: f64,
    /// Weight of highlights union coverage in the subset score.
    #[serde(default = "default_highlights_weight")]
    pub highlights_weight: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_combination_size: default_max_combination_size(),
            timeout_ms: default_timeout_ms(),
            live_weight: default_live_weight(),
            highlights_weight: default_highlights_weight(),
        }
    }
}

fn default_max_combination_size() -> usize {
    3
}

fn default_timeout_ms() -> u64 {
    2000
}

fn default_live_weight() -> f64 {
    1.0
}

fn default_highlights_weight() -> f64 {
    0.25
}

/// Configuration options for the comparison service.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the three catalog CSV files.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default)]
    pub optimizer: OptimizerConfig,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_dir() -> String {
    "data".to_string()
}

impl ServerConfig {
    /// Loads configuration from `config.yaml` (optional) with `APP_*`
    /// environment overrides, e.g. `APP_PORT=9000`.
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }
}
