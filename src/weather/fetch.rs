//! Deadline-bounded HTTP GET shared by every upstream call

use crate::error::{ForecastError, UpstreamApi};
use hyper::ext::ReasonPhrase;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Status and body of a request that settled before its deadline
#[derive(Debug)]
pub struct FetchedResponse {
    pub status: StatusCode,
    /// Reason phrase from the status line, or the canonical one for `status`
    pub status_text: String,
    pub body: String,
}

impl FetchedResponse {
    /// Map a non-2xx status to an upstream error for `api`
    pub fn ensure_success(&self, api: UpstreamApi) -> Result<(), ForecastError> {
        if self.status.is_success() {
            return Ok(());
        }
        Err(ForecastError::upstream(
            api,
            self.status.as_u16(),
            self.status_text.clone(),
        ))
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ForecastError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// hyper only records the reason phrase when it differs from the canonical one
fn status_text(response: &Response) -> String {
    match response.extensions().get::<ReasonPhrase>() {
        Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
        None => response
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string(),
    }
}

/// GET `url`, racing the request and the body read against `deadline`.
///
/// On expiry the request future is dropped, which aborts the connection,
/// and the call fails with [`ForecastError::Timeout`].
#[tracing::instrument(level = "debug", skip(client, deadline))]
pub async fn fetch_with_deadline(
    client: &Client,
    url: &str,
    deadline: Duration,
) -> Result<FetchedResponse, ForecastError> {
    let start_time = Instant::now();

    let request = async {
        let response = client.get(url).send().await?;
        let status = response.status();
        let status_text = status_text(&response);
        let body = response.text().await?;
        Ok::<_, reqwest::Error>(FetchedResponse {
            status,
            status_text,
            body,
        })
    };

    match tokio::time::timeout(deadline, request).await {
        Ok(result) => {
            let fetched = result?;
            debug!(
                "HTTP response received: {} in {:.3}s",
                fetched.status,
                start_time.elapsed().as_secs_f64()
            );
            Ok(fetched)
        }
        Err(_) => {
            warn!("Request exceeded {:.1}s deadline", deadline.as_secs_f64());
            Err(ForecastError::Timeout)
        }
    }
}
