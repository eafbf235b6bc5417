use actix_cors::Cors;
use actix_files::Files;
use actix_web::dev::{fn_service, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use std::path::Path;
use std::sync::Arc;

mod api;
mod config;
mod services;
mod store;

use services::catalog::VideoCatalog;
use services::seed::SeedGenerator;
use store::VideoStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if it exists
    dotenv().ok();

    // Initialize logger
    env_logger::init();

    // Load configuration
    let config = config::AppConfig::new().expect("Failed to load configuration");
    let config = Arc::new(config);

    log::info!(
        "Starting server on {}:{}",
        config.server.host,
        config.server.port
    );

    // Create the storage locations if they don't exist
    tokio::fs::create_dir_all(&config.storage.images_dir)
        .await
        .expect("Failed to create images directory");
    tokio::fs::create_dir_all(&config.storage.videos_dir)
        .await
        .expect("Failed to create videos directory");
    if let Some(parent) = Path::new(&config.storage.data_file).parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .expect("Failed to create data directory");
    }

    // One catalog for the whole process; the seed rotations live inside it
    let catalog = web::Data::new(VideoCatalog::new(
        VideoStore::new(config.storage.data_file.clone()),
        SeedGenerator::new(),
        config.seed.comments_per_video,
    ));

    let c = config.clone();
    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(catalog.clone())
            .app_data(web::Data::from(c.clone()))
            .wrap(cors_layer(&c))
            .configure(api::configure)
            .service(Files::new("/media", c.storage.videos_dir.clone()))
            // Poster images and the placeholder live at the server root, so
            // the stored root-relative paths resolve as-is.
            .service(
                Files::new("/", c.storage.images_dir.clone()).default_handler(fn_service(
                    |req: ServiceRequest| async {
                        let (req, _) = req.into_parts();
                        let response = api::not_found().await;
                        Ok(ServiceResponse::new(req, response))
                    },
                )),
            )
            .default_service(web::to(api::not_found))
    })
    .bind((config.server.host.clone(), config.server.port))?
    .run()
    .await
}

fn cors_layer(config: &config::AppConfig) -> Cors {
    match config.cors.allowed_origin.as_deref() {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allow_any_header()
            .max_age(3600),
        None => Cors::permissive(), // Set cors.allowed_origin to restrict in production
    }
}
