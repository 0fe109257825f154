use anyhow::{Context, Result};
use axum::{
    Router,
    body::Bytes,
    extract::State,
    response::Html,
    routing::get,
};
use landing_generator::{RenderOptions, render_page};
use landing_proxy::{GTAG_ROUTE, HttpUpstream, Upstream};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tower_http::{services::ServeDir, trace::TraceLayer};

use super::load_site;

#[derive(Clone)]
struct AppState {
    /// Rendered once at startup; the content never changes while serving
    page: Bytes,
}

/// Serve the site: the rendered page, the analytics proxy and public assets.
///
/// Configuration and content are loaded once before binding, so a malformed
/// document stops startup instead of failing requests.
///
/// # Arguments
///
/// * `path` - Path to site directory containing content.json
/// * `port` - Port override (default: server.port from site.toml)
pub async fn run(path: PathBuf, port: Option<u16>) -> Result<()> {
    println!("🌐 Starting site server...");
    println!("   Site: {}", path.display());

    let site = load_site(&path)?;

    println!("   ✓ Loaded: {}", site.content.metadata.title);
    println!("   ✓ Sections: {}", site.content.root.count());

    let html = render_page(&site.content, &RenderOptions::from_config(&site.config));

    let upstream =
        HttpUpstream::new(&site.config.analytics).context("Failed to configure analytics upstream")?;
    if site.config.analytics.measurement_id.is_none() {
        tracing::warn!(
            "No analytics measurement id configured; {} will fetch the script without an id",
            GTAG_ROUTE
        );
    }
    tracing::info!("Proxying {} to {}", GTAG_ROUTE, upstream.url());

    let public_dir = path.join(&site.config.site.public_dir);
    let app = app(html, Arc::new(upstream), public_dir);

    let addr = SocketAddr::new(
        site.config.server.host,
        port.unwrap_or(site.config.server.port),
    );
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to port")?;

    println!("\n🚀 Site ready at: http://{}", addr);
    println!("   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

/// Build the site router
pub fn app(page: String, upstream: Arc<dyn Upstream>, public_dir: PathBuf) -> Router {
    let state = AppState {
        page: Bytes::from(page),
    };

    Router::new()
        .route("/", get(index_handler))
        .with_state(state)
        .merge(landing_proxy::router(upstream))
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
}

async fn index_handler(State(state): State<AppState>) -> Html<Bytes> {
    Html(state.page.clone())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        return;
    }
    tracing::info!("Shutting down");
}
