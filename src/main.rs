use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scoreboard_backend::config::Config;
use scoreboard_backend::database::{self, create_pool};
use scoreboard_backend::{handlers, middleware, repository, services};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    let config = Arc::new(config);

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.rust_log.clone()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Scoreboard Backend on port {} (signature format: {})",
        config.port, config.signature_format
    );

    // Initialize database pool
    let db_pool = create_pool(&config)
        .await
        .expect("Failed to create database pool");

    // Run migrations
    database::run_migrations(&db_pool)
        .await
        .expect("Failed to run migrations");

    // Initialize repositories
    let score_repo = Arc::new(repository::ScoreRepository::new(db_pool.clone()));

    // Initialize services
    let score_service = Arc::new(services::ScoreService::new(score_repo));

    // Create application state
    let app_state = web::Data::new(handlers::AppState {
        config: config.clone(),
        db_pool,
        score_service,
    });

    let server_port = config.port;
    let cors_origins = config.cors_allowed_origins.clone();

    HttpServer::new(move || {
        let cors_origins_inner = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _req_head| {
                let origin_str = origin.to_str().unwrap_or("");
                if cors_origins_inner == "*" {
                    return true;
                }
                cors_origins_inner
                    .split(',')
                    .any(|o| o.trim() == origin_str)
            })
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                "Content-Type",
                "Accept",
                middleware::SIGNED_REQUEST_HEADER,
            ])
            .max_age(3600);

        // Custom JSON and query error handlers
        let json_cfg = web::JsonConfig::default().error_handler(|err, _req| {
            let message = format!("{}", err);
            actix_web::error::InternalError::from_response(
                err,
                actix_web::HttpResponse::BadRequest().json(serde_json::json!({
                    "success": false,
                    "error": {
                        "code": "VALIDATION_ERROR",
                        "message": message
                    }
                })),
            )
            .into()
        });
        let query_cfg = web::QueryConfig::default().error_handler(|err, _req| {
            let message = format!("{}", err);
            actix_web::error::InternalError::from_response(
                err,
                actix_web::HttpResponse::BadRequest().json(serde_json::json!({
                    "success": false,
                    "error": {
                        "code": "VALIDATION_ERROR",
                        "message": message
                    }
                })),
            )
            .into()
        });

        App::new()
            .app_data(app_state.clone())
            .app_data(json_cfg)
            .app_data(query_cfg)
            .wrap(Logger::default())
            .wrap(cors)
            // Health check
            .route("/health", web::get().to(handlers::health_check))
            // API v1 routes
            .service(
                web::scope("/api/v1")
                    // Request verification (public)
                    .service(
                        web::scope("/requests")
                            .route("/verify", web::post().to(handlers::requests::verify)),
                    )
                    // Score queries (signed)
                    .service(
                        web::scope("/scores")
                            .wrap(middleware::SignedRequestMiddleware::new(config.clone()))
                            .route(
                                "/dates",
                                web::get().to(handlers::scores::dates_with_min_scores),
                            )
                            .route("/top-users", web::get().to(handlers::scores::top_users))
                            .route(
                                "/me/top-dates",
                                web::get().to(handlers::scores::my_top_dates),
                            )
                            .route(
                                "/users/{user_id}/top-dates",
                                web::get().to(handlers::scores::user_top_dates),
                            ),
                    ),
            )
            .default_service(web::route().to(handlers::not_found))
    })
    .bind(("0.0.0.0", server_port))?
    .run()
    .await
}
