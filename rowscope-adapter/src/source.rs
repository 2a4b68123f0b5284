use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::{ControllerError, FetchError, TableConfig, TableController};

#[derive(Deserialize)]
struct Payload {
    results: Option<Vec<Value>>,
}

/// Extracts the `results` array from a response body.
///
/// Entries are returned undecoded; [`rowscope::transform_values`] validates them one by one.
pub fn decode_payload(body: &[u8]) -> Result<Vec<Value>, FetchError> {
    let payload: Payload = serde_json::from_slice(body)?;
    payload.results.ok_or(FetchError::MissingResults)
}

/// Fetches the user list over HTTP.
#[derive(Clone, Debug)]
pub struct UserSource {
    endpoint: String,
    http_client: Client,
    timeout: Option<Duration>,
}

impl UserSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http_client: Client::new(),
            timeout: None,
        }
    }

    pub fn from_config(config: &TableConfig) -> Self {
        let source = Self::new(config.endpoint.clone());
        match config.request_timeout() {
            Some(timeout) => source.with_timeout(timeout),
            None => source,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issues one GET and returns the raw `results` entries.
    pub async fn fetch(&self) -> Result<Vec<Value>, FetchError> {
        vdebug!(endpoint = %self.endpoint, "fetching users");

        let mut request = self.http_client.get(&self.endpoint);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            vwarn!(status = status.as_u16(), "user fetch rejected");
            return Err(FetchError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        let results = decode_payload(&body)?;
        vdebug!(results = results.len(), "fetched users");
        Ok(results)
    }

    /// Fetches and hands the outcome to `controller`, moving it out of the loading phase.
    ///
    /// A fetch failure is not an `Err` here: it puts the controller in its failed phase.
    pub async fn load_into(&self, controller: &mut TableController) -> Result<(), ControllerError> {
        let outcome = self.fetch().await;
        controller.finish_loading(outcome)
    }
}
