use serde::Deserialize;
use skyvoyage_core::{OccupancyPolicy, SeatLayout, SeatResult};
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub static_files: StaticFilesConfig,
    #[serde(default)]
    pub seat_map: SeatMapConfig,
    #[serde(default)]
    pub sessions: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 5000 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StaticFilesConfig {
    #[serde(default = "default_static_dir")]
    pub dir: String,
    #[serde(default = "default_index")]
    pub index: String,
}

fn default_static_dir() -> String { "public".into() }
fn default_index() -> String { "index.html".into() }

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            dir: default_static_dir(),
            index: default_index(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeatMapConfig {
    #[serde(default = "default_rows")]
    pub rows: u8,
    #[serde(default = "default_letters")]
    pub letters: String,
    #[serde(default = "default_aisle_after")]
    pub aisle_after: usize,
    #[serde(default = "default_occupied_min")]
    pub occupied_min: usize,
    #[serde(default = "default_occupied_max")]
    pub occupied_max: usize,
}

fn default_rows() -> u8 { 8 }
fn default_letters() -> String { "ABCDEF".into() }
fn default_aisle_after() -> usize { 3 }
fn default_occupied_min() -> usize { 10 }
fn default_occupied_max() -> usize { 24 }

impl Default for SeatMapConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            letters: default_letters(),
            aisle_after: default_aisle_after(),
            occupied_min: default_occupied_min(),
            occupied_max: default_occupied_max(),
        }
    }
}

impl SeatMapConfig {
    pub fn layout(&self) -> SeatResult<SeatLayout> {
        SeatLayout::new(self.rows, &self.letters, self.aisle_after)
    }

    pub fn policy(&self) -> OccupancyPolicy {
        OccupancyPolicy::new(self.occupied_min, self.occupied_max)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    #[serde(default = "default_idle_ttl")]
    pub idle_ttl_seconds: u64,
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
    #[serde(default = "default_max_passengers")]
    pub max_passengers: u32,
}

fn default_idle_ttl() -> u64 { 30 * 60 }
fn default_sweep_interval() -> u64 { 60 }
fn default_max_passengers() -> u32 { 9 }

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_ttl_seconds: default_idle_ttl(),
            sweep_interval_seconds: default_sweep_interval(),
            max_passengers: default_max_passengers(),
        }
    }
}

impl SessionConfig {
    pub fn idle_ttl(&self) -> Duration {
        Duration::from_secs(self.idle_ttl_seconds)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds.max(1))
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // SKYVOYAGE__SERVER__PORT=8080 sets server.port
            .add_source(config::Environment::with_prefix("SKYVOYAGE").separator("__"))
            // Plain PORT, as hosting platforms set it
            .set_override_option("server.port", env::var("PORT").ok())?
            .build()?;

        s.try_deserialize()
    }
}
