use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::PathBuf;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use big18_core::domain::contract::parse_rankings_filename;
use big18_core::storage::rankings::rankings_candidates;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = big18_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let state = AppState {
        rankings_dir: settings.rankings_dir.clone(),
        archive_dir: settings.resolved_archive_dir(),
    };

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/api/rankings", get(get_latest_rankings))
        .route("/api/rankings/:date", get(get_rankings_by_date))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Clone)]
struct AppState {
    rankings_dir: PathBuf,
    archive_dir: PathBuf,
}

/// Rankings row as the site renders it. Rows missing any required field fail
/// the whole response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublishedTeam {
    id: String,
    rank: i64,
    name: String,
    logo_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trend: Option<i64>,
    blurb: String,
    record: String,
}

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, msg: &str) -> ApiError {
    (status, Json(json!({ "error": msg })))
}

async fn get_latest_rankings(
    State(state): State<AppState>,
) -> Result<Json<Vec<PublishedTeam>>, ApiError> {
    let Some(path) = latest_rankings_file(&state.rankings_dir) else {
        return Err(api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "No ranking files found.",
        ));
    };

    load_published(&path).await.map(Json).map_err(|e| {
        sentry_anyhow::capture_anyhow(&e);
        tracing::error!(path = %path.display(), error = %format!("{e:#}"), "error fetching rankings");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch rankings.")
    })
}

async fn get_rankings_by_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<Vec<PublishedTeam>>, ApiError> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| api_error(StatusCode::BAD_REQUEST, "Date must be YYYY-MM-DD."))?;

    let file_name = format!("{}.json", date.format("%Y-%m-%d"));
    let path = [&state.rankings_dir, &state.archive_dir]
        .into_iter()
        .map(|dir| dir.join(&file_name))
        .find(|p| p.is_file())
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "No rankings for that date."))?;

    load_published(&path).await.map(Json).map_err(|e| {
        sentry_anyhow::capture_anyhow(&e);
        tracing::error!(path = %path.display(), error = %format!("{e:#}"), "error fetching rankings");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch rankings.")
    })
}

/// Newest date-named rankings file in `dir`; auxiliary and oddly named files are ignored.
fn latest_rankings_file(dir: &std::path::Path) -> Option<PathBuf> {
    let candidates = match rankings_candidates(dir) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %format!("{e:#}"), "cannot list rankings dir");
            return None;
        }
    };

    candidates
        .into_iter()
        .filter(|p| parse_rankings_filename(p).is_ok())
        .max_by(|a, b| a.file_name().cmp(&b.file_name()))
}

async fn load_published(path: &std::path::Path) -> anyhow::Result<Vec<PublishedTeam>> {
    use anyhow::Context;

    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("{} does not match the published rankings schema", path.display()))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &big18_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
