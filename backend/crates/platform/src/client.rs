//! Client credential utilities
//!
//! Helpers for pulling caller-supplied credentials out of HTTP headers.

use axum::http::HeaderMap;

/// Header carrying the shared service secret, unless configured otherwise
pub const SERVICE_SECRET_HEADER: &str = "X-Service-Secret";

/// Extract a credential header value
///
/// ## Arguments
/// * `headers` - HTTP request headers
/// * `name` - Header name (case-insensitive)
///
/// ## Returns
/// * `Some(value)` - Header present, valid visible ASCII, non-empty
/// * `None` - Header absent, empty, or not representable as a string
pub fn extract_secret_header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_secret_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-service-secret", HeaderValue::from_static("abc"));

        let value = extract_secret_header(&headers, SERVICE_SECRET_HEADER);
        assert_eq!(value, Some("abc".to_string()));
    }

    #[test]
    fn test_extract_secret_header_missing() {
        let headers = HeaderMap::new();
        assert_eq!(extract_secret_header(&headers, SERVICE_SECRET_HEADER), None);
    }

    #[test]
    fn test_extract_secret_header_empty() {
        let mut headers = HeaderMap::new();
        headers.insert("x-service-secret", HeaderValue::from_static(""));
        assert_eq!(extract_secret_header(&headers, SERVICE_SECRET_HEADER), None);
    }

    #[test]
    fn test_extract_secret_header_non_ascii() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-service-secret",
            HeaderValue::from_bytes(&[0xC3, 0xA9]).unwrap(),
        );
        assert_eq!(extract_secret_header(&headers, SERVICE_SECRET_HEADER), None);
    }
}
