//! API Module
//!
//! HTTP handlers and routing for the banner service REST API.
//!
//! # Endpoints
//! - `GET /user_banner` - Banner content for a feature and tag
//! - `GET /banner`, `POST /banner` - List and create banners
//! - `PATCH /banner/:id`, `DELETE /banner/:id` - Update and delete banners
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
