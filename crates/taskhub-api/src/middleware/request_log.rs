//! Per-request access log

use std::time::Instant;

use axum::{
    extract::Request,
    http::header::USER_AGENT,
    middleware::Next,
    response::Response,
};
use tracing::{error, info, warn};

use taskhub_shared::constants::REQUEST_ID_HEADER;

/// Logs one line per request; level follows the response status.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let query = request.uri().query().unwrap_or_default().to_string();
    let user_agent = header_str(&request, USER_AGENT.as_str());
    let request_id = header_str(&request, REQUEST_ID_HEADER);

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let latency_ms = start.elapsed().as_millis() as u64;

    if response.status().is_server_error() {
        error!(%method, %path, %query, status, latency_ms, %user_agent, %request_id, "Server error");
    } else if response.status().is_client_error() {
        warn!(%method, %path, %query, status, latency_ms, %user_agent, %request_id, "Client error");
    } else {
        info!(%method, %path, %query, status, latency_ms, %user_agent, %request_id, "Request completed");
    }

    response
}

fn header_str(request: &Request, name: &str) -> String {
    request
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
