use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::filter::DateRange;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub filters: FilterDefaults,
    #[serde(default)]
    pub ranking: RankingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Mock data generation
#[derive(Debug, Deserialize, Clone)]
pub struct DataSettings {
    pub seed: Option<u64>,
    #[serde(default = "default_days")]
    pub days: u32,
    /// Last generated day, today when unset
    pub anchor_date: Option<NaiveDate>,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            seed: None,
            days: default_days(),
            anchor_date: None,
        }
    }
}

/// Bounds applied when a request leaves a filter unset
#[derive(Debug, Deserialize, Clone)]
pub struct FilterDefaults {
    #[serde(default = "default_days")]
    pub lookback_days: u32,
    #[serde(default)]
    pub min_amount: f64,
    #[serde(default = "default_max_amount")]
    pub max_amount: f64,
    #[serde(default)]
    pub min_hour: u8,
    #[serde(default = "default_max_hour")]
    pub max_hour: u8,
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self {
            lookback_days: default_days(),
            min_amount: 0.0,
            max_amount: default_max_amount(),
            min_hour: 0,
            max_hour: default_max_hour(),
        }
    }
}

impl FilterDefaults {
    pub fn date_range(&self, today: NaiveDate) -> DateRange {
        DateRange::ending_at(today, self.lookback_days)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RankingSettings {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_days() -> u32 {
    7
}

fn default_max_amount() -> f64 {
    200.0
}

fn default_max_hour() -> u8 {
    23
}

fn default_top_n() -> usize {
    3
}

/// Reads `config/analytics.*` when present, then `ANALYTICS__*` environment overrides.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/analytics").required(false))
        .add_source(
            config::Environment::with_prefix("ANALYTICS")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
