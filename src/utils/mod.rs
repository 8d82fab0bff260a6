//! Project-specific utilities live here.

use axum::http::HeaderMap;

/// Header set by the request-id middleware and forwarded upstream.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// The inbound request id, if present and printable.
pub fn request_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_id_reads_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_id(&headers), None);

        headers.insert(REQUEST_ID_HEADER, "0190-abc".parse().unwrap());
        assert_eq!(request_id(&headers), Some("0190-abc"));
    }
}
