use crate::models::User;
use crate::users::default_roster;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerConf,
    #[serde(default = "default_roster")]
    pub users: Vec<User>,
    #[serde(default)]
    pub rng_seed: Option<u64>,          // seed fixe => données reproductibles
    #[serde(default)]
    pub utc_offset_minutes: Option<i16>, // ex: 120 pour UTC+2
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConf {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConf {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            server: ServerConf::default(),
            users: default_roster(),
            rng_seed: None,
            utc_offset_minutes: None,
        }
    }
}

impl DashboardConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Un roster vide casserait le "premier utilisateur par défaut"
    fn normalized(mut self) -> Self {
        if self.users.is_empty() {
            tracing::warn!("config has an empty user roster, using default roster");
            self.users = default_roster();
        }
        self
    }

    fn with_port_override(mut self, raw: Option<String>) -> Self {
        if let Some(raw) = raw {
            match raw.trim().parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(e) => tracing::warn!(value = %raw, error = %e, "ignoring invalid DASHBOARD_PORT"),
            }
        }
        self
    }
}

pub fn parse_config(txt: &str) -> DashboardConfig {
    if txt.trim().is_empty() {
        return DashboardConfig::default();
    }
    serde_yaml::from_str::<DashboardConfig>(txt)
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "invalid dashboard config, using defaults");
            DashboardConfig::default()
        })
        .normalized()
}

pub async fn load_config() -> DashboardConfig {
    let path = std::env::var("DASHBOARD_CONFIG").unwrap_or_else(|_| "dashboard.yaml".into());
    let cfg = if Path::new(&path).exists() {
        match fs::read_to_string(&path).await {
            Ok(txt) => parse_config(&txt),
            Err(e) => {
                tracing::error!(path = %path, error = %e, "failed to read config, using defaults");
                DashboardConfig::default()
            }
        }
    } else {
        tracing::info!(path = %path, "no config file, using defaults");
        DashboardConfig::default()
    };
    cfg.with_port_override(std::env::var("DASHBOARD_PORT").ok())
}
