use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::Uri,
    response::{IntoResponse, Response},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::assets;
use crate::config::ServerSettings;

#[derive(Debug, Clone)]
pub struct AssetState {
    pub root: PathBuf,
}

/// Every method and path goes through the asset resolver.
pub fn router(root: PathBuf) -> Router {
    Router::new()
        .fallback(handle_asset)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(AssetState { root }))
}

pub async fn handle_asset(State(state): State<Arc<AssetState>>, uri: Uri) -> Response {
    assets::resolve(&state.root, uri.path()).await.into_response()
}

pub async fn start_server(settings: ServerSettings) -> Result<()> {
    if !settings.asset_dir.is_dir() {
        tracing::warn!(
            "Asset directory {:?} does not exist; every request will 404",
            settings.asset_dir
        );
    }

    let app = router(settings.asset_dir.clone());

    tracing::info!("Server running at http://{}", settings.bind_addr);
    let listener = tokio::net::TcpListener::bind(settings.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", settings.bind_addr))?;
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
