mod error;
mod routes;
mod state;

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use chorepack::async_client::AsyncChorepackSdkBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,chorepack=debug")),
        )
        .init();

    // CHOREPACK_ORIGIN is required; CHOREPACK_DATABASE is optional.
    let sdk = AsyncChorepackSdkBuilder::from_env()
        .build()
        .await
        .expect("Failed to initialize chorepack");
    tracing::info!("chorepack ready");

    let state = Arc::new(AppState { sdk });

    let app = Router::new()
        .route("/api/cards", get(routes::cards::list_cards).post(routes::cards::save_card))
        .route("/api/cards/{id}", delete(routes::cards::delete_card))
        .route("/api/packs", post(routes::packs::generate_packs))
        .route("/open/{token}", get(routes::packs::open_pack))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = "0.0.0.0:3000";
    tracing::info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
