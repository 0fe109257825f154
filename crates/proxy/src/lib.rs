// Same-origin proxy for the analytics loader script

mod upstream;

pub use upstream::{HttpUpstream, Upstream, UpstreamResponse, script_url};

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{
        HeaderMap, HeaderName, HeaderValue, Method, StatusCode,
        header::{ALLOW, CACHE_CONTROL},
    },
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;

/// Route the script is served from
pub const GTAG_ROUTE: &str = "/gtag/js";

/// Request headers passed on to the analytics host
pub const FORWARDED_REQUEST_HEADERS: &[&str] = &["user-agent", "accept", "accept-encoding"];

/// Upstream response headers passed back to the client
pub const FORWARDED_RESPONSE_HEADERS: &[&str] = &["content-type"];

/// Cache-Control sent with every successful script response
pub const SCRIPT_CACHE_CONTROL: &str = "public, max-age=3600";

pub const UPSTREAM_ERROR_BODY: &str = "Error fetching from GTAG";
pub const INTERNAL_ERROR_BODY: &str = "Internal Server Error";

#[derive(Clone)]
struct ProxyState {
    upstream: Arc<dyn Upstream>,
}

/// Router serving `GET /gtag/js` from `upstream`.
///
/// DELETE, POST, PUT and PATCH get a 405 naming the method.
pub fn router(upstream: Arc<dyn Upstream>) -> Router {
    Router::new()
        .route(
            GTAG_ROUTE,
            get(gtag_script)
                .delete(method_not_allowed)
                .post(method_not_allowed)
                .put(method_not_allowed)
                .patch(method_not_allowed),
        )
        .with_state(ProxyState { upstream })
}

async fn gtag_script(State(state): State<ProxyState>, headers: HeaderMap) -> Response {
    match proxy_script(state.upstream.as_ref(), &headers).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Error in GET {}: {:#}", GTAG_ROUTE, e);
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
        }
    }
}

/// Fetch the script once and shape the client response.
///
/// Upstream error statuses are mirrored with a fixed body; transport errors
/// are returned to the caller.
pub async fn proxy_script(
    upstream: &dyn Upstream,
    request_headers: &HeaderMap,
) -> anyhow::Result<Response> {
    let forwarded = select_headers(request_headers, FORWARDED_REQUEST_HEADERS);
    let reply = upstream.fetch(forwarded).await?;

    if !reply.status.is_success() {
        tracing::error!(
            "Error fetching from GTAG: {} {}",
            reply.status.as_u16(),
            reply.status.canonical_reason().unwrap_or("")
        );
        return Ok((reply.status, UPSTREAM_ERROR_BODY).into_response());
    }

    let mut headers = select_headers(&reply.headers, FORWARDED_RESPONSE_HEADERS);
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(SCRIPT_CACHE_CONTROL));

    Ok((reply.status, headers, Body::from(reply.body)).into_response())
}

async fn method_not_allowed(method: Method) -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(ALLOW, "GET")],
        format!("Method {} Not Allowed", method),
    )
        .into_response()
}

/// Copy every value of the allowed headers, nothing else
fn select_headers(source: &HeaderMap, allowed: &[&'static str]) -> HeaderMap {
    let mut selected = HeaderMap::new();
    for &name in allowed {
        for value in source.get_all(name) {
            selected.append(HeaderName::from_static(name), value.clone());
        }
    }
    selected
}
