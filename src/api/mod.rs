// src/api/mod.rs
pub mod health;
pub mod shared;
pub mod videos;

use actix_web::{web, HttpResponse};

// Routes sit at the root: the frontend this serves predates any /api prefix.
pub fn configure(cfg: &mut web::ServiceConfig) {
    videos::configure(cfg);
    health::configure(cfg);
}

/// Catch-all for unmatched routes and missing static assets.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().body("Sorry can't find that!")
}
