mod config;
mod error;
mod handlers;
mod otp;
mod services;
mod state;
mod stores;
#[cfg(test)]
mod test_utils;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Result;
use axum::{Router, http};
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::Config,
    otp::{Channel, OtpFlow},
    services::{EmailChannel, NotificationChannel, TwilioSmsChannel, twilio},
    state::AppState,
    stores::{MemoryOtpStore, OtpStore, RedisOtpStore},
};

#[derive(Parser)]
#[command(name = "api")]
#[command(about = "Shop admin contact verification API server")]
struct Args {
    /// Load and validate configuration, print a summary and exit
    #[arg(long)]
    check_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    dotenv::dotenv().ok();
    let config = envy::prefixed("ESHOP_").from_env::<Config>()?;

    // Initialize Sentry for error tracking (must be done early, guard must stay alive)
    let _sentry_guard = config.sentry_dsn.as_ref().map(|dsn| {
        sentry::init((
            dsn.as_str(),
            sentry::ClientOptions {
                release: sentry::release_name!(),
                environment: Some(config.env.clone().into()),
                ..Default::default()
            },
        ))
    });

    // Set up tracing: JSON in production, human-readable otherwise
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.is_production() {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer())
            .init();
    }

    tracing::info!(
        env = %config.env,
        store = config.store_backend(),
        email = config.email_backend(),
        sms_from = %config.twilio_from_number,
        expose_debug_code = config.expose_debug_code,
        dispatch_timeout_secs = config.dispatch_timeout_secs,
        "configuration loaded"
    );

    if config.expose_debug_code && config.is_production() {
        tracing::warn!(
            "EXPOSE_DEBUG_CODE is enabled in production; issued codes are returned to callers"
        );
    }

    // Build stores
    let redis_client = match config.redis_url.as_deref().filter(|u| !u.is_empty()) {
        Some(url) => Some(redis::Client::open(url)?),
        None => None,
    };
    let phone_store = build_store(redis_client.as_ref(), Channel::Phone);
    let email_store = build_store(redis_client.as_ref(), Channel::Email);

    // Build notification channels
    let sms: Arc<dyn NotificationChannel> = Arc::new(TwilioSmsChannel::new(
        twilio::Client::new(&config.twilio_account_sid, &config.twilio_auth_token),
        &config.twilio_from_number,
    ));
    let dispatch_timeout = Duration::from_secs(config.dispatch_timeout_secs);
    let email: Arc<dyn NotificationChannel> = Arc::new(EmailChannel::new(
        config.resend_api_key.clone(),
        config.smtp_url.clone(),
        config.email_from.clone(),
        dispatch_timeout,
    )?);

    if args.check_config {
        tracing::info!("Configuration OK");
        return Ok(());
    }

    let state = AppState {
        config: config.clone(),
        phone: OtpFlow::new(Channel::Phone, phone_store, sms, dispatch_timeout),
        email: OtpFlow::new(Channel::Email, email_store, email, dispatch_timeout),
    };

    let cors = match config.cors_allowed_origin.as_deref() {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<http::HeaderValue>()?)
            .allow_methods([http::Method::GET, http::Method::POST])
            .allow_headers([http::header::CONTENT_TYPE]),
        None => CorsLayer::permissive(),
    };

    // Request ID header name
    let x_request_id = http::HeaderName::from_static("x-request-id");

    let app = Router::new()
        .nest("/health", handlers::health::router())
        .nest("/api", handlers::otp::router())
        .with_state(state)
        // Request ID: generate UUID, include in logs, return in response
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(TraceLayer::new_for_http().make_span_with(
            |request: &http::Request<axum::body::Body>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            },
        ))
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(1024 * 1024)); // 1MB limit

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");

    Ok(())
}

/// One store per channel. Redis keys are namespaced by channel, memory stores are separate maps.
fn build_store(redis_client: Option<&redis::Client>, channel: Channel) -> Arc<dyn OtpStore> {
    match redis_client {
        Some(client) => Arc::new(RedisOtpStore::new(client.clone(), channel)),
        None => Arc::new(MemoryOtpStore::new()),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
