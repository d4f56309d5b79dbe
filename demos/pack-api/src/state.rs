/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// Async SDK; dispatches the blocking DuckDB work to a thread pool.
    pub sdk: chorepack::AsyncChorepackSdk,
}
