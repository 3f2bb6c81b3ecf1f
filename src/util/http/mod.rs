use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use concat_string::concat_string;
use reqwest::{header, Client};

use crate::{config, logging};

/// Builds the reqwest client used against the TWSE openapi.
///
/// 與舊版不同，client 不再是全域單例，而是由呼叫端建立後注入。
///
/// # Arguments
///
/// * `setting`: Timeouts for every request issued by the returned client.
///
/// # Returns
///
/// * `Result<Client>`: The configured client, or an error if the TLS backend
///   cannot be initialised.
pub fn build_client(setting: &config::Twse) -> Result<Client> {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

    Client::builder()
        // ===== 壓縮 =====
        .brotli(true)
        .gzip(true)
        .zstd(true)
        // ===== 超時設置 =====
        .connect_timeout(Duration::from_secs(setting.connect_timeout_secs))
        .timeout(Duration::from_secs(setting.timeout_secs))
        .tcp_nodelay(true)
        .default_headers(headers)
        .user_agent(concat_string!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .map_err(|e| anyhow!("Failed to create reqwest client: {:?}", e))
}

/// Performs an HTTP GET request and returns the response body as text.
///
/// A non-2xx status is treated as a failure. No retry is attempted.
///
/// # Arguments
///
/// * `client`: The client to send the request with.
/// * `url`: The URL to send the GET request to.
///
/// # Returns
///
/// * `Result<String>`: The response text, or an error if the request fails,
///   times out, returns an error status or the body cannot be read.
pub async fn get(client: &Client, url: &str) -> Result<String> {
    let visit_log = format!("GET:{url}");
    let start = Instant::now();
    let res = client.get(url).send().await;
    let elapsed = start.elapsed().as_millis();

    let response = match res {
        Ok(response) => response,
        Err(why) => {
            logging::error_file_async(format!("{} failed because {:?}. {} ms", visit_log, why, elapsed));
            return Err(anyhow!("Failed to send request to {}: {:?}", url, why));
        }
    };

    let status = response.status();
    logging::info_file_async(format!("{} {} {} ms", visit_log, status, elapsed));

    if !status.is_success() {
        return Err(anyhow!("Unexpected status {} from {}", status, url));
    }

    response
        .text()
        .await
        .map_err(|e| anyhow!("Error parsing response text from {}: {:?}", url, e))
}


#[cfg(test)]
mod tests {
    use super::{local::*, *};

    #[test]
    fn test_build_client() {
        let _ = rustls::crypto::ring::default_provider().install_default();
        let setting = config::Twse::default();
        assert!(build_client(&setting).is_ok());
    }

    #[tokio::test]
    async fn test_get_ok() {
        let base_url = respond_with("200 OK").await;
        let client = build_client(&setting(&base_url)).unwrap();

        let text = get(&client, &concat_string!(base_url, "ok")).await.unwrap();
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn test_get_error_status_is_failure() {
        let base_url = respond_with("503 Service Unavailable").await;
        let client = build_client(&setting(&base_url)).unwrap();

        let why = get(&client, &concat_string!(base_url, "busy")).await.unwrap_err();
        assert!(why.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_get_timeout_is_failure() {
        let base_url = never_respond().await;
        let client = build_client(&setting(&base_url)).unwrap();
        let start = Instant::now();

        let result = get(&client, &concat_string!(base_url, "hang")).await;

        assert!(result.is_err());
        assert!(start.elapsed() >= Duration::from_secs(1));
        assert!(start.elapsed() < TIMEOUT_MARGIN);
    }

    #[tokio::test]
    #[ignore]
    async fn test_get() {
        dotenv::dotenv().ok();
        let _ = rustls::crypto::ring::default_provider().install_default();
        let client = build_client(&config::Twse::default()).unwrap();
        let url = concat_string!(
            config::DEFAULT_TWSE_BASE_URL,
            "exchangeReport/STOCK_DAY_AVG_ALL"
        );

        match get(&client, &url).await {
            Ok(text) => {
                logging::debug_file_async(format!("text length:{}", text.len()));
            }
            Err(why) => {
                logging::error_file_async(format!("Failed to get because {:?}", why));
            }
        }
    }
}
