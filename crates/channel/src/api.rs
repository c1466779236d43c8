use crate::error::{ChannelError, ChannelResult};
use crate::types::ServerConfig;
use rand::Rng;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

const MAX_RETRIES: u32 = 3;
const BASE_DELAY_MS: u64 = 1000;
const MAX_BACKOFF_MS: u64 = 30_000;


fn calculate_backoff(attempt: u32) -> Duration {
    let jitter = rand::thread_rng().gen_range(0..500);
    let exponential = BASE_DELAY_MS * 2u64.pow(attempt.min(16));
    Duration::from_millis((exponential + jitter).min(MAX_BACKOFF_MS))
}

/// How long to wait before retrying after `error`, or `None` to give up.
fn retry_delay(error: &ChannelError, attempt: u32) -> Option<Duration> {
    match error {
        ChannelError::RateLimited {
            retry_after: Some(after),
        } => Some(*after),
        e if e.is_retryable() => Some(calculate_backoff(attempt)),
        _ => None,
    }
}

async fn with_retry<T, F, Fut>(mut operation: F) -> ChannelResult<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = ChannelResult<T>>,
{
    let mut attempts = 0;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if attempts >= MAX_RETRIES => return Err(e),
            Err(e) => {
                let Some(delay) = retry_delay(&e, attempts) else {
                    return Err(e);
                };
                tracing::debug!(attempt = attempts, ?delay, "Retrying after error: {e}");
                tokio::time::sleep(delay).await;
                attempts += 1;
            }
        }
    }
}

fn check_status(response: &Response) -> ChannelResult<()> {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        return Err(ChannelError::RateLimited { retry_after });
    }
    if !status.is_success() {
        return Err(ChannelError::Status(status.as_u16()));
    }
    Ok(())
}

/// Client for the presentation server's HTTP side.
#[derive(Clone)]
pub struct ConfigApi {
    client: Client,
    base_url: String,
}

impl ConfigApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .user_agent("slide-remote/0.2")
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(20))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn configs_url(&self) -> String {
        format!("{}/configs", self.base_url.trim_end_matches('/'))
    }

    /// Fetches the public domain and protocols the server wants controllers to use.
    pub async fn fetch_server_config(&self) -> ChannelResult<ServerConfig> {
        let url = self.configs_url();
        with_retry(|| {
            let request = self.client.get(&url);
            async move {
                let response = request.send().await?;
                check_status(&response)?;
                let config: ServerConfig = response.json().await?;
                tracing::info!(domain = %config.domain, "Loaded server config");
                Ok(config)
            }
        })
        .await
    }
}
