use axum::{
    extract::{ConnectInfo, Request},
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;

/// Logs every request before dispatch, whatever the outcome.
pub async fn access_log(req: Request, next: Next) -> Response {
    let remote_addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());

    tracing::info!(
        method = %req.method(),
        remote_addr = %remote_addr,
        path = %req.uri().path(),
        "New request"
    );

    next.run(req).await
}
