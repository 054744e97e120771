/// API route modules
pub mod health;
pub mod music;

use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the full application router, nested under `/api`
pub fn create_router(app_state: AppState) -> Router {
    let music_routes = Router::new()
        .route(
            "/music",
            get(music::list_musics).post(music::create_music),
        )
        // Static segments take priority over `:id`
        .route("/music/search", get(music::search_musics))
        .route("/music/filter", get(music::filter_musics))
        .route("/music/popular", get(music::popular_musics))
        .route("/music/recent", get(music::recent_musics))
        .route("/music/genres", get(music::list_genres))
        .route("/music/artists", get(music::list_artists))
        .route("/music/albums", get(music::list_albums))
        .route("/music/stats", get(music::stats))
        .route("/music/artist/:artist", get(music::musics_by_artist))
        .route("/music/artist/:artist/count", get(music::count_by_artist))
        .route("/music/genre/:genre", get(music::musics_by_genre))
        .route("/music/genre/:genre/count", get(music::count_by_genre))
        .route(
            "/music/:id",
            get(music::get_music)
                .put(music::update_music)
                .delete(music::delete_music),
        )
        .route("/music/:id/play", post(music::play_music));

    let api_routes = Router::new()
        .route("/health", get(health::health))
        .merge(music_routes);

    Router::new()
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
