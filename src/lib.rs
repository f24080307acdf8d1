//! CS2 Profile - aggregation service for a Counter-Strike 2 profile page
//!
//! Combines Steam identity and inventory, Leetify analytics and Allstar
//! highlight clips into one view model, served over HTTP.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fallback;
pub mod models;
pub mod profile;
pub mod sources;

pub use api::AppState;
pub use config::Config;
pub use profile::ProfileService;
