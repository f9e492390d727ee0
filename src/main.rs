use std::sync::Arc;

use anyhow::Result;
use axum::http::{self, HeaderValue};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use member_dues::adapters::http::{api_router, AppState};
use member_dues::adapters::{
    InMemoryMemberStore, InMemoryOtpStore, InMemoryRateLimiter, JwtSessions, LoggingEmailSender,
    MockPaymentGateway, PostgresMemberReader, PostgresMemberRepository, RateLimitConfig,
    RazorpayConfig, RazorpayGateway, RedisOtpStore, RedisRateLimiter, ResendConfig,
    ResendEmailSender,
};
use member_dues::adapters::rate_limiter::ResourceLimits;
use member_dues::application::handlers::{AdminCredentials, DuesSchedule, OtpService};
use member_dues::config::AppConfig;
use member_dues::domain::foundation::Timestamp;
use member_dues::ports::{
    EmailSender, MemberReader, MemberRepository, OtpStore, PaymentGateway, RateLimiter,
    ADMIN_LOGIN_RESOURCE, OTP_SEND_RESOURCE,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    config.validate()?;

    // JSON in production, human-readable otherwise
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_filter));
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

    // Members: PostgreSQL when configured, otherwise process memory
    let (repository, reader): (Arc<dyn MemberRepository>, Arc<dyn MemberReader>) =
        match config.database.url() {
            Some(url) => {
                let pool = PgPoolOptions::new()
                    .max_connections(config.database.max_connections)
                    .acquire_timeout(config.database.acquire_timeout())
                    .connect(url)
                    .await?;

                if config.database.run_migrations {
                    tracing::info!("Running database migrations...");
                    sqlx::migrate!("./migrations").run(&pool).await?;
                    tracing::info!("Migrations complete");
                }

                (
                    Arc::new(PostgresMemberRepository::new(pool.clone())),
                    Arc::new(PostgresMemberReader::new(pool)),
                )
            }
            None => {
                tracing::warn!("No database configured, members are kept in memory");
                let store = Arc::new(InMemoryMemberStore::new());
                (store.clone(), store)
            }
        };

    // Passcodes and rate limits: Redis when configured, otherwise swept in memory
    let limits = RateLimitConfig::empty()
        .with_resource(
            OTP_SEND_RESOURCE,
            ResourceLimits {
                requests_per_window: config.otp.send_limit,
                window_secs: config.otp.send_window_secs,
            },
        )
        .with_resource(
            ADMIN_LOGIN_RESOURCE,
            ResourceLimits {
                requests_per_window: config.auth.login_limit,
                window_secs: config.auth.login_window_secs,
            },
        );
    let (otp_store, rate_limiter, sweep): (Arc<dyn OtpStore>, Arc<dyn RateLimiter>, bool) =
        match config.redis.url() {
            Some(url) => {
                let client = redis::Client::open(url)?;
                let conn = tokio::time::timeout(
                    config.redis.timeout(),
                    client.get_multiplexed_async_connection(),
                )
                .await??;
                (
                    Arc::new(RedisOtpStore::new(conn.clone())),
                    Arc::new(RedisRateLimiter::new(conn, limits)),
                    false,
                )
            }
            None => (
                Arc::new(InMemoryOtpStore::new()),
                Arc::new(InMemoryRateLimiter::new(limits)),
                true,
            ),
        };
    let otp = Arc::new(OtpService::new(
        otp_store,
        rate_limiter.clone(),
        config.otp.policy(),
    ));

    let gateway: Arc<dyn PaymentGateway> = match config.payment.razorpay_keys() {
        Some((key_id, secret)) => {
            Arc::new(RazorpayGateway::new(RazorpayConfig::new(key_id, secret.clone())))
        }
        None => {
            tracing::warn!("No Razorpay keys configured, using the mock gateway");
            Arc::new(MockPaymentGateway::new())
        }
    };

    let email: Arc<dyn EmailSender> = match &config.email.resend_api_key {
        Some(key) => Arc::new(ResendEmailSender::new(ResendConfig::new(
            key.clone(),
            config.email.from_header(),
        ))),
        None => {
            tracing::warn!("No Resend key configured, passcodes are only logged");
            Arc::new(LoggingEmailSender::new())
        }
    };

    let sessions = Arc::new(JwtSessions::new(
        &config.auth.jwt_secret,
        config.auth.token_ttl_secs,
    ));

    let state = AppState {
        repository,
        reader,
        gateway,
        email,
        otp: otp.clone(),
        rate_limiter,
        session_issuer: sessions.clone(),
        session_validator: sessions,
        admin: AdminCredentials {
            username: config.auth.admin_username.clone(),
            password: config.auth.admin_password.clone(),
        },
        schedule: DuesSchedule::new(config.periods.catalog()?, config.periods.fee_per_period),
        currency: config.payment.currency.clone(),
        clock: Arc::new(Timestamp::now),
    };

    if sweep {
        let every = config.otp.sweep_interval();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                otp.sweep(Timestamp::now()).await;
            }
        });
    }

    let x_request_id = http::HeaderName::from_static("x-request-id");

    let app = api_router(state)
        .layer(cors_layer(&config))
        .layer(TimeoutLayer::new(config.server.request_timeout()))
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
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid));

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");

    Ok(())
}

/// Configured origins, or any origin outside production when none are set.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .allowed_origins()
        .into_iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if origins.is_empty() {
        if config.is_production() {
            CorsLayer::new()
        } else {
            CorsLayer::permissive()
        }
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([http::Method::GET, http::Method::POST, http::Method::PUT])
            .allow_headers([http::header::AUTHORIZATION, http::header::CONTENT_TYPE])
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
