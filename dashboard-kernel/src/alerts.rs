//! Alertes synthétiques (0 à 3 par requête) et acquittement stub.

use crate::clock::wall_clock;
use crate::models::{Acknowledgement, Alert, AlertKind, User};
use rand::Rng;
use time::{Duration, OffsetDateTime};

pub const ALERT_MESSAGES: [&str; 5] = [
    "High CPU usage detected",
    "Memory approaching capacity",
    "Disk space running low",
    "Network congestion detected",
    "Temperature exceeding normal range",
];

pub const MAX_ALERTS: usize = 3;

/// Fenêtre dans laquelle une alerte peut avoir été levée (secondes avant `now`)
const ALERT_WINDOW_SECS: i64 = 3600;

pub fn alerts<R: Rng + ?Sized>(rng: &mut R, user: &User, now: OffsetDateTime) -> Vec<Alert> {
    let count = rng.gen_range(0..=MAX_ALERTS);
    (0..count)
        .map(|i| {
            let raised_at = now - Duration::seconds(rng.gen_range(0..=ALERT_WINDOW_SECS));
            Alert {
                id: format!("alert-{}-{}", user.id, i),
                kind: AlertKind::ALL[rng.gen_range(0..AlertKind::ALL.len())],
                message: ALERT_MESSAGES[rng.gen_range(0..ALERT_MESSAGES.len())].to_string(),
                timestamp: wall_clock(raised_at),
                user_id: user.id.clone(),
                acknowledged: rng.gen_bool(0.5),
            }
        })
        .collect()
}

/// Aucun état n'est conservé : on confirme seulement la réception.
pub fn acknowledge(alert_id: &str) -> Acknowledgement {
    Acknowledgement { message: format!("Alert {alert_id} acknowledged") }
}
