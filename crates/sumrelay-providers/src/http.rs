//! Shared outbound HTTP client.

use sumrelay_core::config::HttpConfig;

/// Build the connection-pooled client used by every adapter.
pub fn build_client(config: &HttpConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(config.connect_timeout())
        .timeout(config.request_timeout())
        .user_agent(concat!("sumrelay/", env!("CARGO_PKG_VERSION")))
        .build()
}
