//! Vagon Photo Server - Main entry point.
//!
//! Starts the Actix-web server with configured routes and middleware.

mod api;
mod config;
mod error;
mod middleware;
mod models;
mod services;

use std::path::PathBuf;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::{App, HttpRequest, HttpServer, Result as ActixResult, http::header, web};
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::ApiDoc;
use crate::config::{Config, UPLOADS_PUBLIC_PREFIX};
use crate::services::photo_store::{FsPhotoStore, PhotoStore};
use crate::services::wagon_source::WagonSource;

/// SPA fallback handler - serves index.html for client-side routing.
async fn spa_fallback(req: HttpRequest) -> ActixResult<NamedFile> {
    let static_dir: &PathBuf = req
        .app_data::<web::Data<PathBuf>>()
        .expect("Static dir not configured")
        .get_ref();
    Ok(NamedFile::open(static_dir.join("index.html"))?)
}

/// Perform health check (for Docker healthcheck).
async fn health_check() -> bool {
    // Simple check - just verify we can load config
    Config::from_env().is_ok()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Check for --health-check flag (used by Docker HEALTHCHECK)
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|arg| arg == "--health-check") {
        dotenvy::dotenv().ok();
        if health_check().await {
            std::process::exit(0);
        } else {
            std::process::exit(1);
        }
    }

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - RUST_ENV must be set to 'development' or 'production'");
            error!("  - In production, VAGON_UPLOAD_DIR must be an absolute path");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  Vagon Photo Server");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
    }

    // Create the upload directory up front so the static file service and
    // the first listing both see an existing (empty) store
    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .expect("Failed to create upload directory");

    info!("Photo store: {}", config.upload_dir.display());
    info!(
        "Wagon registry: {} (timeout {}s)",
        config.source_url, config.fetch_timeout_secs
    );

    let wagon_source = WagonSource::new(config.source_url.clone(), config.fetch_timeout());
    let photo_store: Arc<dyn PhotoStore> = Arc::new(FsPhotoStore::new(config.upload_dir.clone()));

    // Prepare shared state
    let bind_address = config.bind_address();
    let upload_dir = config.upload_dir.clone();
    let max_upload_size = config.max_upload_size;
    let static_dir = config.static_dir.clone();
    let is_development = config.is_development();

    if static_dir.is_some() {
        info!("Static file serving enabled from {:?}", static_dir);
    }

    let worker_count = if is_development {
        info!(
            "Starting server at http://{} (4 workers - development mode)",
            bind_address
        );
        4
    } else {
        let cpus = num_cpus::get();
        info!(
            "Starting server at http://{} ({} workers)",
            bind_address, cpus
        );
        cpus
    };

    // Start HTTP server
    let server = HttpServer::new(move || {
        // Configure CORS
        let cors = if is_development {
            // Permissive CORS for development
            Cors::default()
                .allowed_origin("http://localhost:3000")
                .allowed_origin("http://127.0.0.1:3000")
                .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
                .max_age(3600)
        } else {
            // Restrictive CORS for production (same-origin only)
            Cors::default()
                .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
                .max_age(3600)
        };

        let mut app = App::new()
            // Add CORS middleware (must be before other middleware)
            .wrap(cors)
            // Add request logging middleware
            .wrap(middleware::RequestLogger)
            // Add shared state
            .app_data(web::Data::new(wagon_source.clone()))
            .app_data(web::Data::from(photo_store.clone()))
            .app_data(web::Data::new(max_upload_size))
            // Allow 2x max_upload_size at the HTTP layer - the actual limit is
            // enforced while the multipart stream is read
            .app_data(web::PayloadConfig::new(max_upload_size * 2))
            // Configure API routes
            .service(
                web::scope("/api")
                    .configure(api::configure_health_routes)
                    .configure(api::configure_wagon_routes)
                    .configure(api::configure_photo_routes)
                    .configure(api::configure_upload_routes),
            )
            // Serve stored photos; the directory listing is the only index
            .service(Files::new(UPLOADS_PUBLIC_PREFIX, upload_dir.clone()));

        // Swagger UI in development
        if is_development {
            app = app.service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
            );
        }

        // Serve static frontend in production (when VAGON_STATIC_DIR is set)
        if let Some(ref dir) = static_dir {
            app = app
                .app_data(web::Data::new(dir.clone()))
                // Serve static assets (js, css, images)
                .service(Files::new("/assets", dir.join("assets")).prefer_utf8(true))
                // SPA fallback - serve index.html for all other routes
                .default_service(web::route().to(spa_fallback));
        }

        app
    });

    // Set worker count
    server
        .workers(worker_count)
        .bind(&bind_address)?
        .run()
        .await
}
