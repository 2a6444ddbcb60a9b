//! HTTP API server for the HBNB catalog.
//!
//! Every route lives under `/api/v1`. Handlers run the synchronous storage
//! engine on the blocking pool through [`blocking::with_storage`].

#![allow(clippy::absolute_paths, reason = "Explicit paths for clarity")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::single_call_fn, reason = "Helper functions improve readability")]

pub mod api_error;
mod blocking;
mod handlers;

use std::sync::{Arc, Mutex, PoisonError};

use axum::Router;
use axum::routing::{get, post};
use hbnb_storage::{Storage, StorageBackend};
use tower_http::cors::{Any, CorsLayer};

use handlers::{amenities, cities, index, place_amenities, places, reviews, search, states, users};

/// Shared application state for all HTTP handlers.
///
/// Owns the single storage engine for the process. The mutex serializes
/// requests onto the engine, which itself does no locking.
#[derive(Debug)]
pub struct AppState {
    pub storage: Arc<Mutex<StorageBackend>>,
}

impl AppState {
    /// Wrap an engine that has already been reloaded.
    #[must_use]
    pub fn new(storage: StorageBackend) -> Self {
        Self { storage: Arc::new(Mutex::new(storage)) }
    }

    /// Release the engine's resources. Called once on shutdown.
    ///
    /// # Errors
    /// Returns the engine's error if closing fails.
    pub fn close(&self) -> hbnb_storage::Result<()> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner).close()
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/status", get(index::status))
        .route("/stats", get(index::stats))
        .route("/states", get(states::list_states).post(states::create_state))
        .route(
            "/states/{id}",
            get(states::get_state).put(states::update_state).delete(states::delete_state),
        )
        .route("/states/{id}/cities", get(cities::list_cities).post(cities::create_city))
        .route(
            "/cities/{id}",
            get(cities::get_city).put(cities::update_city).delete(cities::delete_city),
        )
        .route("/amenities", get(amenities::list_amenities).post(amenities::create_amenity))
        .route(
            "/amenities/{id}",
            get(amenities::get_amenity)
                .put(amenities::update_amenity)
                .delete(amenities::delete_amenity),
        )
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user).put(users::update_user).delete(users::delete_user),
        )
        .route("/cities/{id}/places", get(places::list_places).post(places::create_place))
        .route(
            "/places/{id}",
            get(places::get_place).put(places::update_place).delete(places::delete_place),
        )
        .route("/places/{id}/reviews", get(reviews::list_reviews).post(reviews::create_review))
        .route(
            "/reviews/{id}",
            get(reviews::get_review).put(reviews::update_review).delete(reviews::delete_review),
        )
        .route("/places/{id}/amenities", get(place_amenities::list_place_amenities))
        .route(
            "/places/{id}/amenities/{amenity_id}",
            post(place_amenities::link_place_amenity)
                .delete(place_amenities::unlink_place_amenity),
        )
        .route("/places_search", post(search::places_search));

    Router::new()
        .nest("/api/v1", api)
        .fallback(index::not_found)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(state)
}
