//! # Agora API Server
//!
//! The main entry point for the actix-web HTTP server.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod background;
mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use agora_core::ports::{PasswordService, RateLimiter, TokenService};
use agora_infra::auth::{Argon2PasswordService, JwtTokenService};
use agora_infra::rate_limit::InMemoryRateLimiter;

use background::{Scheduler, SchedulerConfig};
use config::AppConfig;
use middleware::rate_limit::RateLimitMiddleware;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing and alerting
    let telemetry_config = TelemetryConfig::from_env();
    telemetry::init_telemetry(&telemetry_config);

    // Load configuration
    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Agora API server on {}:{}",
        config.host,
        config.port
    );

    // Build application state
    let state = AppState::new(&config)
        .await
        .map_err(|e| std::io::Error::other(format!("database init failed: {e}")))?;

    let token_service: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());
    let password_service: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
    let rate_limiter: Arc<dyn RateLimiter> = Arc::new(InMemoryRateLimiter::from_env());

    // Hourly reconciliation of the denormalized messageboard counters
    let mut scheduler = match Scheduler::new(SchedulerConfig::from_env()).await {
        Ok(scheduler) => {
            let boards = state.messageboards.clone();
            let registered = scheduler
                .add_cron("0 0 * * * *", move || {
                    let boards = boards.clone();
                    async move {
                        match boards.refresh_counters().await {
                            Ok(updated) => {
                                tracing::info!(boards = updated, "Messageboard counters refreshed");
                            }
                            Err(e) => {
                                tracing::error!(error = %e, "Messageboard counter refresh failed");
                            }
                        }
                    }
                })
                .await;
            if let Err(e) = registered {
                tracing::warn!(error = %e, "Failed to register counter refresh job");
            }
            if let Err(e) = scheduler.start().await {
                tracing::warn!(error = %e, "Failed to start scheduler");
            }
            Some(scheduler)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Scheduler unavailable");
            None
        }
    };

    // Start HTTP server
    let server_state = state.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(RateLimitMiddleware::new(rate_limiter.clone()))
            .wrap(RequestIdMiddleware)
            .app_data(web::Data::new(server_state.clone()))
            .app_data(web::Data::new(token_service.clone()))
            .app_data(web::Data::new(password_service.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    if let Some(scheduler) = scheduler.as_mut() {
        if let Err(e) = scheduler.shutdown().await {
            tracing::warn!(error = %e, "Scheduler shutdown failed");
        }
    }

    Ok(())
}
