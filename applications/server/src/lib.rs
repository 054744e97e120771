//! Music Catalog Server Library
//!
//! HTTP/JSON service for managing a catalog of music records.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use api::create_router;
pub use config::{ApiSettings, ServerConfig};
pub use dto::{MusicRequest, MusicResponse};
pub use error::{Result, ServerError};
pub use services::MusicService;
pub use state::AppState;
