use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Logs every request: method, path, status, response size and latency.
///
/// The body is buffered to learn its real size, then handed back unchanged.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(
                "{} {} -> {} | body error: {} | {}ms",
                method,
                path,
                parts.status.as_u16(),
                e,
                start.elapsed().as_millis()
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    let elapsed_ms = start.elapsed().as_millis();
    if parts.status.is_server_error() {
        tracing::warn!(
            "{} {} -> {} | {} bytes | {}ms",
            method,
            path,
            parts.status.as_u16(),
            bytes.len(),
            elapsed_ms
        );
    } else {
        tracing::info!(
            "{} {} -> {} | {} bytes | {}ms",
            method,
            path,
            parts.status.as_u16(),
            bytes.len(),
            elapsed_ms
        );
    }

    Response::from_parts(parts, Body::from(bytes))
}
