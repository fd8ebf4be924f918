use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

pub const ENTRY_DOCUMENT: &str = "index.html";

pub const NO_CACHE: &str = "no-cache";
pub const CACHE_ONE_HOUR: &str = "public, max-age=3600";

const PLAIN_TEXT: &str = "text/plain; charset=utf-8";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read asset {path:?}: {source}")]
    ReadAsset { path: PathBuf, source: io::Error },
    #[error("failed to read entry document {path:?}: {source}")]
    ReadEntry { path: PathBuf, source: io::Error },
    #[error("entry document missing")]
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResponse {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub cache_control: Option<&'static str>,
    pub body: Vec<u8>,
}

impl AssetResponse {
    fn ok(content_type: &'static str, body: Vec<u8>) -> Self {
        let cache_control = if content_type == "text/html" {
            NO_CACHE
        } else {
            CACHE_ONE_HOUR
        };
        Self {
            status: StatusCode::OK,
            content_type,
            cache_control: Some(cache_control),
            body,
        }
    }

    fn plain(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            content_type: PLAIN_TEXT,
            cache_control: None,
            body: message.as_bytes().to_vec(),
        }
    }
}

impl From<AssetError> for AssetResponse {
    fn from(err: AssetError) -> Self {
        match err {
            AssetError::ReadAsset { .. } => {
                Self::plain(StatusCode::INTERNAL_SERVER_ERROR, "Error reading file")
            }
            AssetError::ReadEntry { .. } => {
                Self::plain(StatusCode::INTERNAL_SERVER_ERROR, "Error reading index.html")
            }
            AssetError::NotFound => Self::plain(StatusCode::NOT_FOUND, "Not found"),
        }
    }
}

impl IntoResponse for AssetResponse {
    fn into_response(self) -> Response {
        let mut builder = Response::builder()
            .status(self.status)
            .header(header::CONTENT_TYPE, self.content_type);
        if let Some(cache_control) = self.cache_control {
            builder = builder.header(header::CACHE_CONTROL, cache_control);
        }
        builder
            .body(axum::body::Body::from(self.body))
            .unwrap_or_default()
    }
}

/// MIME type by file extension; anything unlisted is served as a byte stream.
pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("js") => "application/javascript",
        Some("css") => "text/css",
        Some("html") => "text/html",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Map a request path to a file under `root`, or `None` when the path can
/// only be a client-side route (trailing slash, undecodable, or escaping
/// the root).
fn asset_path(root: &Path, request_path: &str) -> Option<PathBuf> {
    if request_path.ends_with('/') {
        return None;
    }
    let decoded = urlencoding::decode(request_path).ok()?;
    let relative = Path::new(decoded.trim_start_matches('/'));
    if relative
        .components()
        .any(|component| !matches!(component, Component::Normal(_) | Component::CurDir))
    {
        return None;
    }
    Some(root.join(relative))
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

async fn try_resolve(root: &Path, request_path: &str) -> Result<AssetResponse, AssetError> {
    if let Some(path) = asset_path(root, request_path) {
        if is_file(&path).await {
            let body = tokio::fs::read(&path)
                .await
                .map_err(|source| AssetError::ReadAsset {
                    path: path.clone(),
                    source,
                })?;
            tracing::debug!("Serving asset {:?}", path);
            return Ok(AssetResponse::ok(content_type_for(&path), body));
        }
    }

    let entry = root.join(ENTRY_DOCUMENT);
    match tokio::fs::metadata(&entry).await {
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Err(AssetError::NotFound),
        _ => {}
    }
    let body = tokio::fs::read(&entry)
        .await
        .map_err(|source| AssetError::ReadEntry {
            path: entry.clone(),
            source,
        })?;
    Ok(AssetResponse::ok("text/html", body))
}

/// Resolve one request against the asset directory. Always produces a
/// response; I/O failures become 500 and a missing entry document 404.
pub async fn resolve(root: &Path, request_path: &str) -> AssetResponse {
    match try_resolve(root, request_path).await {
        Ok(response) => response,
        Err(AssetError::NotFound) => {
            tracing::debug!("No asset or entry document for {}", request_path);
            AssetError::NotFound.into()
        }
        Err(err) => {
            tracing::warn!("Asset error for {}: {}", request_path, err);
            err.into()
        }
    }
}
