//! Tâches synthétiques : en cours (sans fin) ou terminées (succès / échec).

use crate::clock::wall_clock;
use crate::models::{Task, TaskStatus, User};
use rand::Rng;
use time::{Duration, OffsetDateTime};

pub const TASK_NAMES: [&str; 5] = [
    "System Backup",
    "Database Optimization",
    "Security Scan",
    "Update Installation",
    "Log Analysis",
];

pub const MAX_TASKS: usize = 3;

const RUNNING_PROBABILITY: f64 = 0.3;
const COMPLETED_PROBABILITY: f64 = 0.8;

pub fn tasks<R: Rng + ?Sized>(rng: &mut R, user: &User, now: OffsetDateTime) -> Vec<Task> {
    let count = rng.gen_range(0..=MAX_TASKS);
    (0..count)
        .map(|i| {
            let started = now - Duration::seconds(rng.gen_range(0..=3600));
            let (status, end_time) = if rng.gen_bool(RUNNING_PROBABILITY) {
                (TaskStatus::Running, None)
            } else {
                let ended = started + Duration::seconds(rng.gen_range(300..=1800));
                let status = if rng.gen_bool(COMPLETED_PROBABILITY) {
                    TaskStatus::Completed
                } else {
                    TaskStatus::Failed
                };
                (status, Some(wall_clock(ended)))
            };

            Task {
                id: format!("task-{}-{}", user.id, i),
                name: TASK_NAMES[rng.gen_range(0..TASK_NAMES.len())].to_string(),
                start_time: wall_clock(started),
                end_time,
                status,
                user_id: user.id.clone(),
            }
        })
        .collect()
}
