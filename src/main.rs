use actix_cors::Cors;
use anyhow::Context;
use actix_web::{http::header, middleware::NormalizePath, web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, EnvFilter};

use talent_backend::{
    db::postgres::{create_pool, run_migrations},
    graceful_shutdown::shutdown_signal,
    middlewares::auth::AuthMiddleware,
    routes::configure_routes,
    settings::AppConfig,
    AppState,
};

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.pretty().init();
    }
}

fn build_cors(config: &AppConfig) -> Cors {
    let origins = config.cors_origins();
    if origins.iter().any(|origin| origin == "*") {
        return Cors::permissive();
    }

    origins.iter().fold(
        Cors::default()
            .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
            .supports_credentials()
            .max_age(3600),
        |cors, origin| cors.allowed_origin(origin),
    )
}

/// Connects to Postgres, applies pending migrations and builds the shared state.
async fn bootstrap(config: &AppConfig) -> anyhow::Result<AppState> {
    let pool = create_pool(&config.database_url)
        .await
        .context("failed to create database connection pool")?;

    if config.run_migrations {
        run_migrations(&pool).await.context("failed to run migrations")?;
    }

    Ok(AppState::new(config, pool))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::new();
    init_tracing(config.as_ref().is_ok_and(|cfg| cfg.is_production()));

    let config = match config {
        Ok(cfg) => {
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        }
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = match bootstrap(&config).await {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            tracing::error!("Startup failed: {:#}", e);
            std::process::exit(1);
        }
    };
    app_state.rate_limiter.start_eviction();

    let server_addr = format!("{}:{}", config.host, config.port);
    tracing::info!(
        "Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let server_config = config.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(AuthMiddleware)
            .wrap(NormalizePath::trim())
            .wrap(build_cors(&server_config))
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .bind(server_addr)?
    .run();

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => Ok(()),
    }
}
