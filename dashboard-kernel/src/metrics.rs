/**
 * GÉNÉRATEUR DE MÉTRIQUES - Valeurs courantes et séries historiques
 *
 * RÔLE :
 * Produit des mesures synthétiques (cpu, memory, disk, network, temperature)
 * pour un utilisateur du roster. Rien n'est stocké : chaque appel tire de
 * nouvelles valeurs depuis le RNG injecté.
 *
 * FONCTIONNEMENT :
 * - Valeur uniforme dans les bornes du type, arrondie à 2 décimales
 * - Historique = toujours HISTORY_POINTS points, l'intervalle dépend de la
 *   fenêtre (1h -> 5s, 6h -> 30s, 24h -> 2min)
 * - Le point i est daté `now - (HISTORY_POINTS - i) * intervalle`
 *
 * Prendre un `&User` (et pas un id brut) garantit que l'existence de
 * l'utilisateur a été vérifiée par l'appelant via UserDirectory.
 */

use crate::clock::wall_clock;
use crate::models::{CurrentMetrics, Metric, MetricType, TimeRange, User};
use rand::Rng;
use time::OffsetDateTime;

/// Nombre de points d'une série, quelle que soit la fenêtre
pub const HISTORY_POINTS: usize = 720;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Tire une valeur dans les bornes du type de métrique
pub fn sample_value<R: Rng + ?Sized>(rng: &mut R, metric: MetricType) -> f64 {
    let (min, max) = metric.bounds();
    round2(rng.gen_range(min..=max))
}

fn reading<R: Rng + ?Sized>(rng: &mut R, metric: MetricType, user: &User, at: OffsetDateTime) -> Metric {
    Metric {
        value: sample_value(rng, metric),
        unit: metric.unit().to_string(),
        timestamp: wall_clock(at),
        user_id: user.id.clone(),
    }
}

pub fn current_metrics<R: Rng + ?Sized>(rng: &mut R, user: &User, now: OffsetDateTime) -> CurrentMetrics {
    CurrentMetrics {
        cpu: reading(rng, MetricType::Cpu, user, now),
        memory: reading(rng, MetricType::Memory, user, now),
        disk: reading(rng, MetricType::Disk, user, now),
        network: reading(rng, MetricType::Network, user, now),
        temperature: reading(rng, MetricType::Temperature, user, now),
    }
}

pub fn history<R: Rng + ?Sized>(
    rng: &mut R,
    metric: MetricType,
    user: &User,
    range: TimeRange,
    now: OffsetDateTime,
) -> Vec<Metric> {
    let interval = range.interval();
    (0..HISTORY_POINTS)
        .map(|i| {
            let remaining = (HISTORY_POINTS - i) as i32;
            reading(rng, metric, user, now - interval * remaining)
        })
        .collect()
}
