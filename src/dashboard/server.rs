//! HTTP server for the dashboard

use super::cache::ParseCache;
use super::page::render_page;
use super::view::DashboardView;
use crate::config::Config;
use crate::input::ScanError;
use crate::models::Event;
use actix_web::{middleware, web, App, HttpResponse, HttpServer};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared state handed to every request
pub struct AppState {
    cache: ParseCache,
    log_path: PathBuf,
    top: usize,
}

/// Events for the configured log, or the message to show instead
struct Loaded {
    events: Arc<Vec<Event>>,
    error: Option<String>,
}

impl AppState {
    pub fn new(log_path: PathBuf, top: usize) -> Result<Self, ScanError> {
        Ok(AppState {
            cache: ParseCache::new()?,
            log_path,
            top,
        })
    }

    fn load(&self) -> Loaded {
        match self.cache.events(&self.log_path) {
            Ok(events) => Loaded { events, error: None },
            Err(ScanError::NotFound(path)) => {
                log::warn!("Log file not found: {:?}", path);
                Loaded {
                    events: Arc::new(Vec::new()),
                    error: Some(format!("Could not find file: {}", path.display())),
                }
            }
            Err(e) => {
                log::error!("Failed to read {:?}: {}", self.log_path, e);
                Loaded {
                    events: Arc::new(Vec::new()),
                    error: Some(format!("Could not read {}: {}", self.log_path.display(), e)),
                }
            }
        }
    }
}

// scanning is blocking file I/O
async fn load(state: &web::Data<AppState>) -> Result<Loaded, actix_web::Error> {
    let state = state.clone();
    Ok(web::block(move || state.load()).await?)
}

async fn index(state: web::Data<AppState>) -> Result<HttpResponse, actix_web::Error> {
    let loaded = load(&state).await?;
    let view = DashboardView::from_events(&loaded.events, state.top);
    let html = render_page(&view, &state.log_path, loaded.error.as_deref())
        .map_err(actix_web::error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

async fn summary(state: web::Data<AppState>) -> Result<HttpResponse, actix_web::Error> {
    let loaded = load(&state).await?;
    let view = DashboardView::from_events(&loaded.events, state.top);

    Ok(HttpResponse::Ok().json(json!({
        "log_path": state.log_path.display().to_string(),
        "error": loaded.error,
        "view": view,
    })))
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/// Register the dashboard routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/api/summary", web::get().to(summary))
        .route("/health", web::get().to(health));
}

/// Serve the dashboard until the process is interrupted
pub async fn run(config: &Config) -> std::io::Result<()> {
    let state = AppState::new(config.input.log_path.clone(), config.aggregation.dashboard_top)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    let state = web::Data::new(state);
    let address = (config.dashboard.bind_address.clone(), config.dashboard.port);

    log::info!(
        "Dashboard for {:?} listening on http://{}:{}",
        config.input.log_path,
        address.0,
        address.1
    );

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .workers(1)
    .bind(address)?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};

    const LOG: &str = "\
2024-01-15T10:23:40.000000Z [cowrie.ssh.factory.CowrieSSHFactory] New connection: 203.0.113.7:51122 (10.0.0.5:2222) [session: a1]
2024-01-15T10:23:42.000000Z [HoneyPotSSHTransport,0,203.0.113.7] login attempt [root/123456] failed
2024-01-15T10:23:46.000000Z [HoneyPotSSHTransport,0,203.0.113.7] CMD: ls -la
";

    fn state_for(path: PathBuf) -> web::Data<AppState> {
        web::Data::new(AppState::new(path, 10).unwrap())
    }

    #[actix_web::test]
    async fn test_index_renders_dashboard() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cowrie.log");
        std::fs::write(&path, LOG).unwrap();

        let app = test::init_service(App::new().app_data(state_for(path)).configure(configure)).await;
        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = test::read_body(resp).await;
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Total Connections"));
        assert!(html.contains("ls -la"));
        assert!(html.contains("<svg"));
    }

    #[actix_web::test]
    async fn test_summary_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cowrie.log");
        std::fs::write(&path, LOG).unwrap();

        let app = test::init_service(App::new().app_data(state_for(path)).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/summary").to_request();
        let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert!(json["error"].is_null());
        assert_eq!(json["view"]["total_connections"], 1);
        assert_eq!(json["view"]["commands_executed"], 1);
        assert_eq!(json["view"]["top_usernames"][0]["value"], "root");
    }

    #[actix_web::test]
    async fn test_missing_log_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(state_for(dir.path().join("cowrie.log")))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = test::read_body(resp).await;
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Could not find file"));
        assert!(html.contains("Please verify"));
    }

    #[actix_web::test]
    async fn test_health() {
        let app = test::init_service(App::new().configure(configure)).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
