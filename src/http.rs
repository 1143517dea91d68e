// Shared HTTP helpers for both API clients.

use reqwest::{Response, StatusCode};
use tracing::warn;

pub const USER_AGENT: &str = concat!("neko-poster/", env!("CARGO_PKG_VERSION"));

/// Log a warning for anything but 200 OK. The response is still handed back:
/// callers decide whether the body is usable.
pub fn check_response(response: Response) -> Response {
    let status = response.status();
    if status != StatusCode::OK {
        warn!(
            status = status.as_u16(),
            url = %response.url(),
            "Request error, status code: {}",
            status.as_u16()
        );
    }
    response
}
