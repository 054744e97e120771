//! Music Catalog Core
//!
//! Domain types, the storage trait, and error handling shared by the storage
//! layer and the HTTP server.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Music`, `CreateMusic`, paging, sorting and filters
//! - **Core Traits**: `MusicStore`, the data access seam
//! - **Error Handling**: Unified `CatalogError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use catalog_core::types::{CreateMusic, MusicFilter, Sort, SortField};
//!
//! let music = CreateMusic::new("Clair de Lune", "Debussy").normalized();
//! assert!(music.validate().is_ok());
//!
//! let filter = MusicFilter::search("debussy");
//! let sort: Sort = "playCount,desc".parse().unwrap();
//! assert_eq!(sort, Sort::desc(SortField::PlayCount));
//! # let _ = filter;
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{CatalogError, Result};
pub use storage::MusicStore;

pub use types::{
    CatalogStats, CreateMusic, Music, MusicFilter, MusicId, Page, PageRequest, Sort,
    SortDirection, SortField, Tally,
};
