/**
 * MODÈLES - Structures de données exposées par l'API dashboard
 *
 * RÔLE :
 * Types sérialisés en JSON vers le frontend : utilisateurs, métriques,
 * alertes, tâches, et les petits accusés de réception des endpoints stub.
 *
 * FONCTIONNEMENT :
 * - User = seule donnée "stable" (roster chargé au démarrage)
 * - Metric / Alert / Task = éphémères, générés à chaque requête
 * - MetricType / TimeRange = paramètres validés (FromStr -> DashboardError)
 */

use crate::error::DashboardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub value: f64,
    pub unit: String,
    pub timestamp: String, // HH:MM:SS
    pub user_id: String,
}

/// Snapshot courant : une mesure par type, clés dans l'ordre d'affichage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentMetrics {
    pub cpu: Metric,
    pub memory: Metric,
    pub disk: Metric,
    pub network: Metric,
    pub temperature: Metric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    Cpu,
    Memory,
    Disk,
    Network,
    Temperature,
}

impl MetricType {
    pub const ALL: [MetricType; 5] = [
        MetricType::Cpu,
        MetricType::Memory,
        MetricType::Disk,
        MetricType::Network,
        MetricType::Temperature,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Cpu => "cpu",
            MetricType::Memory => "memory",
            MetricType::Disk => "disk",
            MetricType::Network => "network",
            MetricType::Temperature => "temperature",
        }
    }

    /// Bornes inclusives (min, max) des valeurs générées
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            MetricType::Memory => (1.0, 16.0),
            MetricType::Temperature => (35.0, 75.0),
            MetricType::Cpu | MetricType::Disk | MetricType::Network => (10.0, 90.0),
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            MetricType::Memory => "GB",
            MetricType::Temperature => "°C",
            MetricType::Cpu | MetricType::Disk | MetricType::Network => "%",
        }
    }

    /// Ex: "cpu, memory, disk, network, temperature"
    pub fn valid_values() -> String {
        Self::ALL.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricType {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DashboardError::InvalidMetricType(s.to_string()))
    }
}

/// Fenêtre d'historique demandée. Le nombre de points est fixe,
/// seul l'intervalle entre deux points change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    #[default]
    OneHour,
    SixHours,
    OneDay,
}

impl TimeRange {
    pub const ALL: [TimeRange; 3] = [TimeRange::OneHour, TimeRange::SixHours, TimeRange::OneDay];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::OneHour => "1h",
            TimeRange::SixHours => "6h",
            TimeRange::OneDay => "24h",
        }
    }

    pub fn interval(&self) -> Duration {
        match self {
            TimeRange::OneHour => Duration::seconds(5),
            TimeRange::SixHours => Duration::seconds(30),
            TimeRange::OneDay => Duration::minutes(2),
        }
    }

    pub fn valid_values() -> String {
        Self::ALL.iter().map(|r| r.as_str()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| DashboardError::InvalidTimeRange(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Warning,
    Error,
    Info,
}

impl AlertKind {
    pub const ALL: [AlertKind; 3] = [AlertKind::Warning, AlertKind::Error, AlertKind::Info];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
    pub timestamp: String,
    pub user_id: String,
    pub acknowledged: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Running,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub start_time: String,
    pub end_time: Option<String>, // None <=> status == running
    pub status: TaskStatus,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportReceipt {
    pub message: String,
    pub user_id: Option<String>,
    pub format: String,
}
