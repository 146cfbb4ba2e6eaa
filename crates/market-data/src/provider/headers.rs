//! HTTP headers for the upstream quote providers.
//!
//! The public endpoints reject requests without a realistic browser
//! identity, so every adapter sends a desktop User-Agent plus the Referer
//! the provider's own frontend would send.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE, REFERER, USER_AGENT};

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/120.0.0.0 Safari/537.36";

/// Create headers for Sina quote list requests
pub fn sina_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
    headers.insert(
        REFERER,
        HeaderValue::from_static("https://finance.sina.com.cn"),
    );
    headers
}

/// Create headers for Eastmoney push API requests
pub fn eastmoney_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        REFERER,
        HeaderValue::from_static("https://quote.eastmoney.com"),
    );
    headers
}

/// Create headers for Xueqiu quote API requests
///
/// Xueqiu expects a session cookie; a placeholder token is sent and auth
/// rejections surface as ordinary provider errors.
pub fn xueqiu_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(REFERER, HeaderValue::from_static("https://xueqiu.com"));
    headers.insert(COOKIE, HeaderValue::from_static("xq_a_token=placeholder"));
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sina_headers_has_required_fields() {
        let headers = sina_headers();
        assert!(headers.contains_key(USER_AGENT));
        assert!(headers.contains_key(REFERER));
    }

    #[test]
    fn test_eastmoney_headers_accepts_json() {
        let headers = eastmoney_headers();
        let accept = headers.get(ACCEPT).unwrap().to_str().unwrap();
        assert!(accept.contains("json"));
    }

    #[test]
    fn test_xueqiu_headers_carries_cookie() {
        let headers = xueqiu_headers();
        assert!(headers.contains_key(COOKIE));
    }
}
