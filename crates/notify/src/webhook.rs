//! HTTP webhook observer.
//!
//! Delivers each notification as a JSON payload to a configured URL.
//! Environment variable references (`${VAR_NAME}`) in the URL are
//! resolved at construction time, so secrets can stay out of config.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::traits::{DisplayTimings, NotifyError, Observer};

/// JSON body sent for every notification.
#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    title: &'a str,
    subtitle: &'a str,
    fade_in_ms: u64,
    stay_ms: u64,
    fade_out_ms: u64,
}

/// Observer that POSTs notifications as JSON over HTTP.
#[derive(Debug)]
pub struct WebhookObserver {
    /// Target URL (env vars already resolved).
    url: String,
    /// Shared HTTP client (connection pooling).
    client: reqwest::Client,
}

impl WebhookObserver {
    /// Create a webhook observer for `url`.
    ///
    /// `${VAR_NAME}` references in the URL are resolved eagerly; a
    /// missing variable produces [`NotifyError::Config`].
    pub fn new(url: &str) -> Result<Self, NotifyError> {
        Ok(Self {
            url: resolve_env_vars(url)?,
            client: reqwest::Client::new(),
        })
    }
}

#[async_trait]
impl Observer for WebhookObserver {
    async fn receive(
        &self,
        title: &str,
        subtitle: &str,
        timings: &DisplayTimings,
    ) -> Result<(), NotifyError> {
        let payload = WebhookPayload {
            title,
            subtitle,
            fade_in_ms: timings.fade_in.as_millis() as u64,
            stay_ms: timings.stay.as_millis() as u64,
            fade_out_ms: timings.fade_out.as_millis() as u64,
        };

        let response = self.client.post(&self.url).json(&payload).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            warn!(
                url = %self.url,
                %status,
                body = %body_text,
                "webhook returned non-2xx status"
            );
            return Err(NotifyError::Delivery(format!(
                "webhook returned {status}: {body_text}"
            )));
        }

        debug!(url = %self.url, %status, "webhook notification delivered");
        Ok(())
    }

    fn name(&self) -> &str {
        "webhook"
    }
}

/// Resolve `${VAR_NAME}` patterns in a string using `std::env::var`.
///
/// Returns an error if a referenced variable is not set.
fn resolve_env_vars(input: &str) -> Result<String, NotifyError> {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && chars.peek() == Some(&'{') {
            // Consume the '{'
            chars.next();
            let mut var_name = String::new();
            let mut closed = false;
            for c in chars.by_ref() {
                if c == '}' {
                    closed = true;
                    break;
                }
                var_name.push(c);
            }
            if !closed {
                return Err(NotifyError::Config(format!(
                    "unclosed env var reference in: {input}"
                )));
            }
            let value = std::env::var(&var_name)
                .map_err(|_| NotifyError::Config(format!("env var not found: {var_name}")))?;
            result.push_str(&value);
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}
