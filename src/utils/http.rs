use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use std::time::Duration;

const CLIENT_USER_AGENT: &str = concat!("watchlist-helper/", env!("CARGO_PKG_VERSION"));

/// 엑셀 내보내기 HTTP client. 타임아웃은 설정에 있을 때만 건다.
pub fn build_export_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet, application/octet-stream, */*",
        ),
    );

    let mut builder = reqwest::Client::builder()
        .default_headers(headers)
        .gzip(true);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// 내재가치 계산 서버 HTTP client（/search, /calculate）
pub fn build_valuation_client() -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));

    let client = reqwest::Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(30))
        .gzip(true)
        .build()?;
    Ok(client)
}

/// Joins a configured server base with an endpoint path, tolerating a
/// trailing slash on the base.
pub fn endpoint_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
