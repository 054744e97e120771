//! Common test utilities and fixtures

#![allow(dead_code)]

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use catalog_server::{config::ApiSettings, create_router, AppState, MusicRequest, MusicService};
use catalog_storage::LocalStorageContext;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

/// File-backed test database; dropping the `TempDir` removes it
pub async fn create_test_storage() -> Result<(Arc<LocalStorageContext>, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_url = format!("sqlite://{}", temp_dir.path().join("catalog.db").display());
    let storage = LocalStorageContext::connect(&db_url, 5).await?;
    Ok((Arc::new(storage), temp_dir))
}

/// Service over a fresh database with default limits
pub async fn create_test_service() -> (MusicService, TempDir) {
    let (storage, temp_dir) = create_test_storage().await.unwrap();
    let service = MusicService::new(storage, ApiSettings::default().max_page_size);
    (service, temp_dir)
}

/// Router over a fresh database with the given limits
pub async fn create_test_app_with(api: ApiSettings) -> (Router, TempDir) {
    let (storage, temp_dir) = create_test_storage().await.unwrap();
    let app = create_router(AppState::from_store(storage, api));
    (app, temp_dir)
}

pub async fn create_test_app() -> (Router, TempDir) {
    create_test_app_with(ApiSettings::default()).await
}

/// Send one request and decode the JSON body (`Null` when empty)
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

pub mod fixtures {
    use super::MusicRequest;

    pub fn music(title: &str, artist: &str) -> MusicRequest {
        MusicRequest {
            title: title.to_string(),
            artist: artist.to_string(),
            ..MusicRequest::default()
        }
    }

    pub fn full_music(
        title: &str,
        artist: &str,
        album: &str,
        genre: &str,
        duration_seconds: i32,
    ) -> MusicRequest {
        MusicRequest {
            album: Some(album.to_string()),
            genre: Some(genre.to_string()),
            duration_seconds: Some(duration_seconds),
            ..music(title, artist)
        }
    }
}
