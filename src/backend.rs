use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Json, Router,
};
use std::{
    path::PathBuf,
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_STATIC_DIR: &str = "dist";
const DEFAULT_ASSET_CACHE_MAX_AGE_SECONDS: u64 = 3_600;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const ASSET_CACHE_MAX_AGE_SECONDS_BOUNDS: (u64, u64) = (0, 365 * 24 * 60 * 60);
const ASSET_PATH_PREFIX: &str = "/assets/";
const REQUEST_ID_HEADER: &str = "x-request-id";

static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

// Variant order is severity order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
enum LogLevel {
    Debug,
    Info,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
        }
    }
}

#[derive(Clone, Debug)]
struct ServerConfig {
    port: u16,
    static_dir: PathBuf,
    asset_cache_max_age_seconds: u64,
    log_level: LogLevel,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let static_dir = non_empty(lookup("STATIC_DIR"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));
        let asset_cache_max_age_seconds = parse_u64_with_bounds(
            lookup("ASSET_CACHE_MAX_AGE_SECONDS"),
            DEFAULT_ASSET_CACHE_MAX_AGE_SECONDS,
            ASSET_CACHE_MAX_AGE_SECONDS_BOUNDS,
        );
        let log_level = parse_log_level(lookup("LOG_LEVEL"), DEFAULT_LOG_LEVEL);

        Self {
            port,
            static_dir,
            asset_cache_max_age_seconds,
            log_level,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    config: ServerConfig,
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env();
    let bind_address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&bind_address).await?;

    log_event(
        &config,
        LogLevel::Info,
        "server_started",
        serde_json::json!({
            "address": bind_address,
            "staticDir": config.static_dir.display().to_string(),
            "assetCacheMaxAgeSeconds": config.asset_cache_max_age_seconds,
        }),
    );

    serve(listener, AppState { config }).await?;
    Ok(())
}

async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, router(state)).await
}

fn router(state: AppState) -> Router {
    let static_dir = &state.config.static_dir;
    // Missing assets must 404 rather than fall through to the shell.
    let assets = ServeDir::new(static_dir.join("assets"));
    let shell = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/healthz", get(healthz))
        .nest_service("/assets", assets)
        .fallback_service(shell)
        .layer(middleware::from_fn_with_state(state.clone(), track_request))
        .with_state(state)
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

async fn track_request(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let started = Instant::now();
    let request_id = resolve_request_id(request.headers());
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;
    let status = response.status();

    let headers = response.headers_mut();
    if status.is_success() || status == StatusCode::NOT_MODIFIED {
        headers.insert(
            header::CACHE_CONTROL,
            cache_control_for_path(&path, state.config.asset_cache_max_age_seconds),
        );
    }
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        headers.insert(REQUEST_ID_HEADER, value);
    }

    let level = if path.starts_with(ASSET_PATH_PREFIX) && !status.is_server_error() {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    log_event(
        &state.config,
        level,
        "request_completed",
        serde_json::json!({
            "requestId": request_id,
            "method": method,
            "path": path,
            "status": status.as_u16(),
            "durationMs": started.elapsed().as_millis() as u64,
        }),
    );

    response
}

fn cache_control_for_path(path: &str, max_age_seconds: u64) -> HeaderValue {
    if path.starts_with(ASSET_PATH_PREFIX) {
        HeaderValue::from_str(&format!("public, max-age={max_age_seconds}"))
            .unwrap_or_else(|_| HeaderValue::from_static("no-cache"))
    } else {
        HeaderValue::from_static("no-cache")
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_u64_with_bounds(value: Option<String>, default: u64, bounds: (u64, u64)) -> u64 {
    value
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_log_level(value: Option<String>, default: LogLevel) -> LogLevel {
    match non_empty(value)
        .unwrap_or_else(|| default.as_str().to_string())
        .to_ascii_lowercase()
        .as_str()
    {
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        _ => default,
    }
}

fn since_epoch() -> Duration {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
}

fn generate_request_id() -> String {
    let counter = REQUEST_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("req-{}-{counter}", since_epoch().as_millis())
}

fn resolve_request_id(headers: &HeaderMap) -> String {
    let value = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|raw| raw.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string);

    value.unwrap_or_else(generate_request_id)
}

fn build_log_line(level: LogLevel, event: &str, fields: serde_json::Value) -> serde_json::Value {
    let mut payload = serde_json::Map::new();
    payload.insert("ts".to_string(), serde_json::Value::from(since_epoch().as_secs()));
    payload.insert("level".to_string(), serde_json::Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), serde_json::Value::String(event.to_string()));

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    serde_json::Value::Object(payload)
}

fn log_event(config: &ServerConfig, level: LogLevel, event: &str, fields: serde_json::Value) {
    if level < config.log_level {
        return;
    }

    println!("{}", build_log_line(level, event, fields));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    fn temp_static_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("portfolio-static-{}", generate_request_id()));
        std::fs::create_dir_all(dir.join("assets")).expect("create static dir");
        std::fs::write(dir.join("index.html"), "<div id=\"app\">portfolio-shell</div>")
            .expect("write index");
        std::fs::write(dir.join("assets/rotary.png"), b"png-bytes").expect("write asset");
        dir
    }

    async fn spawn_server(static_dir: PathBuf) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind ephemeral port");
        let address = listener.local_addr().expect("local addr");
        let mut config = config_from(&[]);
        config.static_dir = static_dir;
        config.asset_cache_max_age_seconds = 120;

        tokio::spawn(async move {
            let _ = serve(listener, AppState { config }).await;
        });
        format!("http://{address}")
    }

    #[test]
    fn config_defaults_apply_without_environment() {
        let config = config_from(&[]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.static_dir, PathBuf::from(DEFAULT_STATIC_DIR));
        assert_eq!(config.asset_cache_max_age_seconds, DEFAULT_ASSET_CACHE_MAX_AGE_SECONDS);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn config_reads_valid_overrides() {
        let config = config_from(&[
            ("PORT", " 9000 "),
            ("STATIC_DIR", "public"),
            ("ASSET_CACHE_MAX_AGE_SECONDS", "0"),
            ("LOG_LEVEL", "DEBUG"),
        ]);
        assert_eq!(config.port, 9000);
        assert_eq!(config.static_dir, PathBuf::from("public"));
        assert_eq!(config.asset_cache_max_age_seconds, 0);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn config_falls_back_on_invalid_values() {
        let config = config_from(&[
            ("PORT", "not-a-port"),
            ("STATIC_DIR", "   "),
            ("ASSET_CACHE_MAX_AGE_SECONDS", "99999999999"),
            ("LOG_LEVEL", "verbose"),
        ]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.static_dir, PathBuf::from(DEFAULT_STATIC_DIR));
        assert_eq!(config.asset_cache_max_age_seconds, DEFAULT_ASSET_CACHE_MAX_AGE_SECONDS);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn asset_paths_get_long_lived_cache_headers() {
        assert_eq!(
            cache_control_for_path("/assets/rotary.png", 60),
            HeaderValue::from_static("public, max-age=60")
        );
        assert_eq!(
            cache_control_for_path("/index.html", 60),
            HeaderValue::from_static("no-cache")
        );
    }

    #[test]
    fn request_id_is_echoed_or_generated() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("  abc-123 "));
        assert_eq!(resolve_request_id(&headers), "abc-123");

        let generated = resolve_request_id(&HeaderMap::new());
        assert!(generated.starts_with("req-"));
        assert_ne!(generated, resolve_request_id(&HeaderMap::new()));
    }

    #[test]
    fn log_line_merges_extra_fields() {
        let line = build_log_line(
            LogLevel::Info,
            "request_completed",
            serde_json::json!({ "status": 200, "path": "/" }),
        );
        assert_eq!(line["level"], "info");
        assert_eq!(line["event"], "request_completed");
        assert_eq!(line["status"], 200);
        assert_eq!(line["path"], "/");
        assert!(line["ts"].is_u64());
    }

    #[test]
    fn debug_ranks_below_info() {
        assert!(LogLevel::Debug < LogLevel::Info);
    }

    #[tokio::test]
    async fn serves_shell_assets_and_health() {
        let base = spawn_server(temp_static_dir()).await;
        let client = reqwest::Client::new();

        let index = client.get(format!("{base}/")).send().await.expect("index response");
        assert_eq!(index.status(), reqwest::StatusCode::OK);
        assert_eq!(
            index.headers().get("cache-control").and_then(|v| v.to_str().ok()),
            Some("no-cache")
        );
        assert!(index.headers().contains_key(REQUEST_ID_HEADER));
        assert!(index.text().await.expect("index body").contains("portfolio-shell"));

        let asset = client
            .get(format!("{base}/assets/rotary.png"))
            .header(REQUEST_ID_HEADER, "trace-1")
            .send()
            .await
            .expect("asset response");
        assert_eq!(asset.status(), reqwest::StatusCode::OK);
        assert_eq!(
            asset.headers().get("cache-control").and_then(|v| v.to_str().ok()),
            Some("public, max-age=120")
        );
        assert_eq!(
            asset.headers().get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok()),
            Some("trace-1")
        );

        let health: serde_json::Value = client
            .get(format!("{base}/healthz"))
            .send()
            .await
            .expect("health response")
            .json()
            .await
            .expect("health json");
        assert_eq!(health["ok"], true);
    }

    #[tokio::test]
    async fn unknown_routes_fall_back_to_the_shell() {
        let base = spawn_server(temp_static_dir()).await;

        let body = reqwest::get(format!("{base}/works/rhino"))
            .await
            .expect("fallback response")
            .text()
            .await
            .expect("fallback body");
        assert!(body.contains("portfolio-shell"));
    }

    #[tokio::test]
    async fn missing_asset_is_not_answered_with_the_shell() {
        let base = spawn_server(temp_static_dir()).await;

        let response = reqwest::get(format!("{base}/assets/missing.png"))
            .await
            .expect("missing asset response");
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
        let cache_control = response
            .headers()
            .get("cache-control")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        assert!(!cache_control.is_some_and(|value| value.starts_with("public")));
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
        assert!(!response.text().await.expect("missing asset body").contains("portfolio-shell"));
    }
}
