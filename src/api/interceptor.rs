//! The HTTP interception chokepoint.
//!
//! Every outbound call goes through [`Http`]. On failure the cause is
//! classified, exactly one notification is emitted into the injected sink,
//! and the typed error propagates to the resource layer (which maps it to
//! an absent payload). Repeated identical failures each notify again; there
//! is no suppression window.

use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::notify::{Notification, Notify};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Failure taxonomy, in classification priority order.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No response reached the client.
    #[error("backend unreachable, check configuration: {base}")]
    Unreachable {
        base: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response. The message is the response body when one was
    /// sent, otherwise the status line's canonical reason.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// 2xx response whose body did not match the endpoint's schema.
    #[error("invalid payload from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Shared transport handle: one reqwest client, the configured base URL,
/// and the notification sink handed in at construction.
#[derive(Clone)]
pub struct Http {
    client: reqwest::Client,
    base: String,
    notify: Arc<dyn Notify>,
}

impl Http {
    pub fn new(base: impl Into<String>, notify: Arc<dyn Notify>) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .expect("reqwest client construction only fails on TLS misconfiguration");

        Self {
            client,
            base: base.into(),
            notify,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// GET a JSON payload. The single funnel for every REST call.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self.send(url).await?;
        response
            .json::<T>()
            .await
            .map_err(|source| {
                self.fail(FetchError::Decode {
                    url: url.to_string(),
                    source,
                })
            })
    }

    /// GET a streaming response (the `/events` channel). Same
    /// classification as `get_json`; the caller owns the open stream.
    pub(crate) async fn get_stream(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        self.send(url).await
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        tracing::debug!(url, "request");
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(source) => {
                return Err(self.fail(FetchError::Unreachable {
                    base: self.base.clone(),
                    source,
                }));
            }
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        } else {
            body
        };
        Err(self.fail(FetchError::Status {
            status: status.as_u16(),
            message,
        }))
    }

    /// The responseError hook: one notification per failed call, then the
    /// error continues to the caller.
    fn fail(&self, error: FetchError) -> FetchError {
        if let FetchError::Status { status, .. } = &error {
            tracing::warn!(status = *status, "request failed: {error}");
        } else {
            tracing::warn!("request failed: {error}");
        }
        self.notify.notify(Notification::error(error.to_string()));
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_message_names_the_configured_base() {
        // Build a reqwest::Error the cheap way: a malformed URL.
        let source = reqwest::Client::new()
            .get("not a url")
            .build()
            .expect_err("malformed URL must not build");
        let error = FetchError::Unreachable {
            base: "http://10.0.0.1:9999".to_string(),
            source,
        };
        assert_eq!(
            error.to_string(),
            "backend unreachable, check configuration: http://10.0.0.1:9999"
        );
    }

    #[test]
    fn status_message_passes_body_through() {
        let error = FetchError::Status {
            status: 500,
            message: "X failed".to_string(),
        };
        assert_eq!(error.to_string(), "X failed");
    }
}
