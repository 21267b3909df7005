use axum::{
    Router,
    routing::{get, patch, post},
};

use std::sync::Arc;

use crate::entries;
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route(
            "/entries",
            get(entries::list)
                .post(entries::create)
                .delete(entries::delete_all),
        )
        .route(
            "/entries/{id}",
            patch(entries::update).delete(entries::delete_one),
        )
        .route("/suggestions", get(entries::suggest))
        .route("/import", post(entries::import))
        .route("/export", get(entries::export))
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
