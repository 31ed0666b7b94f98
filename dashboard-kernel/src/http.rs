/**
 * API REST DASHBOARD - Serveur HTTP du kernel
 *
 * RÔLE :
 * Expose les données synthétiques (utilisateurs, métriques, alertes, tâches)
 * au frontend qui interroge l'API en polling.
 *
 * FONCTIONNEMENT :
 * - Serveur Axum, routes sous /api + /health pour la supervision
 * - Validation des paramètres (metric_type, time_range, user_id) avant génération
 * - user_id absent => premier utilisateur du roster
 * - Erreurs métier => DashboardError => 404 / 400 avec {"detail": ...}
 *
 * ROUTES :
 * GET  /                                   message d'accueil
 * GET  /api/users, /api/users/{user_id}    roster
 * GET  /api/metrics/current                snapshot des 5 métriques
 * GET  /api/metrics/history/{metric_type}  série de 720 points
 * GET  /api/alerts                         0..3 alertes
 * PUT  /api/alerts/{alert_id}/acknowledge  accusé (stub, rien n'est persisté)
 * GET  /api/tasks                          0..3 tâches
 * GET  /api/export/metrics                 accusé d'export (stub)
 *
 * CORS : ouvert à toutes les origines, méthodes et headers.
 */

use axum::extract::{Path, Query, Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::alerts;
use crate::clock::Clock;
use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::export::{self, DEFAULT_EXPORT_FORMAT};
use crate::health::{HealthTracker, ServiceHealth};
use crate::metrics;
use crate::models::{Acknowledgement, Alert, CurrentMetrics, ExportReceipt, Metric, MetricType, Task, TimeRange, User};
use crate::state::{new_rng, SharedRng};
use crate::tasks;
use crate::users::UserDirectory;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserDirectory>,
    pub rng: SharedRng,
    pub clock: Clock,
    pub health_tracker: HealthTracker,
    pub rng_seeded: bool,
}

impl AppState {
    pub fn new(cfg: &DashboardConfig) -> Self {
        Self {
            users: Arc::new(UserDirectory::new(cfg.users.clone())),
            rng: new_rng(cfg.rng_seed),
            clock: Clock::from_config(cfg.utc_offset_minutes),
            health_tracker: HealthTracker::new(),
            rng_seeded: cfg.rng_seed.is_some(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserParams {
    user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HistoryParams {
    user_id: Option<String>,
    time_range: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExportParams {
    user_id: Option<String>,
    format: Option<String>,
}

/// `?user_id=` vide est traité comme absent
fn requested(user_id: &Option<String>) -> Option<&str> {
    user_id.as_deref().filter(|id| !id.is_empty())
}

async fn count_requests(State(tracker): State<HealthTracker>, req: Request, next: Next) -> Response {
    tracker.record_request();
    next.run(req).await
}

pub fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let tracker = app_state.health_tracker.clone();

    Router::new()
        .route("/", get(root))
        .route("/health", get(|| async { "ok" }))
        .route("/system/health", get(get_system_health))
        .route("/api/users", get(list_users))
        .route("/api/users/{user_id}", get(get_user))
        .route("/api/metrics/current", get(get_current_metrics))
        .route("/api/metrics/history/{metric_type}", get(get_metrics_history))
        .route("/api/alerts", get(get_alerts))
        .route("/api/alerts/{alert_id}/acknowledge", put(acknowledge_alert))
        .route("/api/tasks", get(get_tasks))
        .route("/api/export/metrics", get(export_metrics))
        .with_state(app_state)
        .layer(middleware::from_fn_with_state(tracker, count_requests))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// GET /
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Welcome to the Metrics Dashboard API" }))
}

// GET /system/health
async fn get_system_health(State(app): State<AppState>) -> Json<ServiceHealth> {
    Json(app.health_tracker.get_health(app.users.len(), app.rng_seeded))
}

// GET /api/users
async fn list_users(State(app): State<AppState>) -> Json<Vec<User>> {
    Json(app.users.list().to_vec())
}

// GET /api/users/{user_id}
async fn get_user(
    State(app): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, DashboardError> {
    app.users.get(&user_id).cloned().map(Json)
}

// GET /api/metrics/current?user_id=
async fn get_current_metrics(
    State(app): State<AppState>,
    Query(params): Query<UserParams>,
) -> Result<Json<CurrentMetrics>, DashboardError> {
    let user = app.users.resolve(requested(&params.user_id))?;
    let now = app.clock.now();
    let snapshot = metrics::current_metrics(&mut *app.rng.lock(), user, now);
    Ok(Json(snapshot))
}

// GET /api/metrics/history/{metric_type}?user_id=&time_range=
async fn get_metrics_history(
    State(app): State<AppState>,
    Path(metric_type): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<Metric>>, DashboardError> {
    let metric: MetricType = metric_type.parse()?;
    let range = match params.time_range.as_deref() {
        Some(raw) => raw.parse::<TimeRange>()?,
        None => TimeRange::default(),
    };
    let user = app.users.resolve(requested(&params.user_id))?;
    let now = app.clock.now();
    let series = metrics::history(&mut *app.rng.lock(), metric, user, range, now);
    tracing::debug!(%metric, %range, user_id = %user.id, points = series.len(), "history generated");
    Ok(Json(series))
}

// GET /api/alerts?user_id=
async fn get_alerts(
    State(app): State<AppState>,
    Query(params): Query<UserParams>,
) -> Result<Json<Vec<Alert>>, DashboardError> {
    let user = app.users.resolve(requested(&params.user_id))?;
    let now = app.clock.now();
    let generated = alerts::alerts(&mut *app.rng.lock(), user, now);
    Ok(Json(generated))
}

// PUT /api/alerts/{alert_id}/acknowledge
async fn acknowledge_alert(Path(alert_id): Path<String>) -> Json<Acknowledgement> {
    tracing::info!(%alert_id, "alert acknowledged (not persisted)");
    Json(alerts::acknowledge(&alert_id))
}

// GET /api/tasks?user_id=
async fn get_tasks(
    State(app): State<AppState>,
    Query(params): Query<UserParams>,
) -> Result<Json<Vec<Task>>, DashboardError> {
    let user = app.users.resolve(requested(&params.user_id))?;
    let now = app.clock.now();
    let generated = tasks::tasks(&mut *app.rng.lock(), user, now);
    Ok(Json(generated))
}

// GET /api/export/metrics?user_id=&format=
async fn export_metrics(Query(params): Query<ExportParams>) -> Json<ExportReceipt> {
    let format = params.format.unwrap_or_else(|| DEFAULT_EXPORT_FORMAT.to_string());
    Json(export::export_metrics(params.user_id, format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::seconds_of_day;
    use axum::body::{self, Body};
    use axum::http::{Method, Request, StatusCode};
    use tower::ServiceExt;

    fn test_router() -> Router {
        let cfg = DashboardConfig {
            rng_seed: Some(1234),
            utc_offset_minutes: Some(0),
            ..DashboardConfig::default()
        };
        build_router(AppState::new(&cfg))
    }

    async fn call(app: Router, method: Method, uri: &str) -> (StatusCode, serde_json::Value) {
        let req = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        call(test_router(), Method::GET, uri).await
    }

    #[tokio::test]
    async fn test_root_and_liveness() {
        let (status, json) = get_json("/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Welcome to the Metrics Dashboard API");

        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let resp = test_router().oneshot(req).await.unwrap();
        let bytes = body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn test_list_and_get_users() {
        let (status, json) = get_json("/api/users").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 4);
        assert_eq!(json[0]["name"], "Rithika");

        let (status, json) = get_json("/api/users/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!({
                "id": "1",
                "name": "Rithika",
                "avatar": "https://i.pravatar.cc/150?u=rithika"
            })
        );

        let (status, json) = get_json("/api/users/99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["detail"], "User not found");
    }

    #[tokio::test]
    async fn test_current_metrics() {
        let (status, json) = get_json("/api/metrics/current").await;
        assert_eq!(status, StatusCode::OK);
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 5);
        for key in ["cpu", "memory", "disk", "network", "temperature"] {
            assert_eq!(obj[key]["user_id"], "1", "defaults to first user");
        }
        assert_eq!(obj["memory"]["unit"], "GB");
        assert_eq!(obj["temperature"]["unit"], "°C");

        let (status, json) = get_json("/api/metrics/current?user_id=3").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["cpu"]["user_id"], "3");

        let (status, _) = get_json("/api/metrics/current?user_id=99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_history_six_hours() {
        let (status, json) = get_json("/api/metrics/history/cpu?time_range=6h").await;
        assert_eq!(status, StatusCode::OK);
        let points = json.as_array().unwrap();
        assert_eq!(points.len(), 720);
        for p in points {
            assert_eq!(p["unit"], "%");
            let v = p["value"].as_f64().unwrap();
            assert!((10.0..=90.0).contains(&v));
        }
        let secs: Vec<i64> = points.iter().map(|p| seconds_of_day(p["timestamp"].as_str().unwrap())).collect();
        assert!(secs.windows(2).all(|w| (w[1] - w[0]).rem_euclid(86_400) == 30));
    }

    #[tokio::test]
    async fn test_history_defaults_and_user() {
        let (status, json) = get_json("/api/metrics/history/memory?user_id=2").await;
        assert_eq!(status, StatusCode::OK);
        let points = json.as_array().unwrap();
        assert_eq!(points.len(), 720);
        assert!(points.iter().all(|p| p["user_id"] == "2" && p["unit"] == "GB"));
    }

    #[tokio::test]
    async fn test_history_validation() {
        let (status, json) = get_json("/api/metrics/history/bogus").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["detail"],
            "Invalid metric type. Must be one of: cpu, memory, disk, network, temperature"
        );

        let (status, json) = get_json("/api/metrics/history/cpu?time_range=2h").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["detail"], "Invalid time range. Must be one of: 1h, 6h, 24h");

        // le type est validé avant l'utilisateur
        let (status, _) = get_json("/api/metrics/history/bogus?user_id=99").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get_json("/api/metrics/history/disk?user_id=99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_alerts_and_tasks() {
        for uri in ["/api/alerts", "/api/tasks", "/api/alerts?user_id=4", "/api/tasks?user_id="] {
            let (status, json) = get_json(uri).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert!(json.as_array().unwrap().len() <= 3);
        }

        let (status, _) = get_json("/api/alerts?user_id=99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = get_json("/api/tasks?user_id=99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_acknowledge_alert() {
        let (status, json) = call(test_router(), Method::PUT, "/api/alerts/alert-1-0/acknowledge").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Alert alert-1-0 acknowledged");

        let (status, _) = call(test_router(), Method::GET, "/api/alerts/alert-1-0/acknowledge").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_export_echo() {
        let (status, json) = get_json("/api/export/metrics").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["format"], "csv");
        assert!(json["user_id"].is_null());
        assert_eq!(json["message"], "Metrics data exported in csv format");

        let (_, json) = get_json("/api/export/metrics?user_id=2&format=json").await;
        assert_eq!(json["user_id"], "2");
        assert_eq!(json["format"], "json");
    }

    #[tokio::test]
    async fn test_cors_is_open() {
        let req = Request::builder()
            .uri("/api/users")
            .header("origin", "http://localhost:5173")
            .body(Body::empty())
            .unwrap();
        let resp = test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.headers()["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn test_system_health_counts_requests() {
        let app = test_router();
        call(app.clone(), Method::GET, "/api/users").await;
        call(app.clone(), Method::GET, "/api/users/99").await;
        let (status, json) = call(app, Method::GET, "/system/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["users_loaded"], 4);
        assert_eq!(json["rng_seeded"], true);
        // les deux requêtes précédentes + celle-ci
        assert_eq!(json["requests_served"], 3);
    }
}
