use eyre::Result;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep as async_sleep;
use tracing::trace;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Make a GET request to the target URL and return the response body as JSON.
///
/// Transport errors are retried a bounded number of times with exponential
/// backoff; a response body that is not valid JSON yields `None`.
pub async fn get_json_from_url(url: &str, timeout: u64) -> Result<Option<Value>> {
    let client = Client::builder()
        .user_agent(APP_USER_AGENT)
        .timeout(Duration::from_secs(timeout))
        .build()?;

    let mut retry_count: u32 = 0;
    let res = loop {
        trace!("GET {}", &url);
        match client.get(url).send().await {
            Ok(res) => break res,
            Err(e) => {
                trace!("GET {}: {:?}", &url, &e);
                if retry_count >= 2 {
                    return Ok(None);
                }
                retry_count += 1;

                // exponential backoff
                async_sleep(Duration::from_millis(2u64.pow(retry_count) * 250)).await;
            }
        }
    };

    let body = res.text().await?;
    Ok(serde_json::from_str(&body).ok())
}
