//! Bridge from async handlers into the synchronous storage engine.

use std::sync::{Arc, PoisonError};

use hbnb_storage::StorageBackend;
use tokio::task::spawn_blocking;

use crate::AppState;
use crate::api_error::ApiError;

/// Run `f` against the engine on the blocking pool.
///
/// The engine lock is held for the whole closure, so a handler's
/// read-modify-save sequence is not interleaved with other requests.
pub(crate) async fn with_storage<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&mut StorageBackend) -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    let storage = Arc::clone(&state.storage);
    spawn_blocking(move || {
        let mut guard = storage.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    })
    .await
    .map_err(|e| {
        tracing::error!("Join error: {}", e);
        ApiError::Internal(e.into())
    })?
}
