pub mod cors;

use crate::application::AnalyzeUseCase;
use crate::domain::analysis::AnalysisOutcome;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::ServerConfig;
use actix_web::middleware::from_fn;
use actix_web::{dev::Server, get, guard, post, web, App, HttpResponse, HttpServer};
use chrono::Utc;
use cors::cors_middleware;
use serde_json::json;
use tracing::{error, info};

pub struct HttpState {
    pub analyze_use_case: AnalyzeUseCase,
}

pub const MAX_BODY_BYTES: usize = 256 * 1024;
pub const BODY_TOO_LARGE_MESSAGE: &str = "request body too large";

/// Read by hand so that size and read failures reach the caller as JSON
/// envelopes instead of actix's plain-text payload errors.
async fn read_body(payload: web::Payload) -> Result<web::Bytes> {
    match payload.to_bytes_limited(MAX_BODY_BYTES).await {
        Ok(Ok(bytes)) => Ok(bytes),
        Ok(Err(e)) => Err(AppError::ValidationError(format!(
            "Failed to read request body: {}",
            e
        ))),
        Err(_) => Err(AppError::ValidationError(BODY_TOO_LARGE_MESSAGE.to_string())),
    }
}

async fn run_analysis(use_case: &AnalyzeUseCase, payload: web::Payload) -> Result<AnalysisOutcome> {
    let body = read_body(payload).await?;
    use_case.execute(&body).await
}

#[post("/analyze")]
async fn analyze(data: web::Data<HttpState>, payload: web::Payload) -> Result<HttpResponse> {
    match run_analysis(&data.analyze_use_case, payload).await {
        Ok(outcome) => Ok(HttpResponse::Ok().json(outcome)),
        Err(e) => {
            error!("Analysis failed: {}", e);
            Err(e)
        }
    }
}

#[get("/ping")]
async fn ping() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "ok": true,
        "now": Utc::now().timestamp_millis(),
    }))
}

async fn preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "error": "not found" }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{tail:.*}")
            .guard(guard::Options())
            .to(preflight),
    )
    .service(analyze)
    .service(ping)
    .default_service(web::to(not_found));
}

pub fn start_server(
    server_config: &ServerConfig,
    analyze_use_case: AnalyzeUseCase,
) -> std::io::Result<Server> {
    let state = web::Data::new(HttpState { analyze_use_case });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(from_fn(cors_middleware))
            .configure(configure_routes)
    })
    .bind((server_config.host.as_str(), server_config.port))?
    .run();

    info!(
        "Listening on http://{}:{}",
        server_config.host, server_config.port
    );
    Ok(server)
}
