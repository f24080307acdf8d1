//! API Module
//!
//! HTTP handlers and routing for the profile service.
//!
//! # Endpoints
//! - `GET /api/profile` - Aggregated profile view model
//! - `GET /api/cache/stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
