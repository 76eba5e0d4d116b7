//! HTTP gateway to the Rivulex backend.
//!
//! Every call is a single attempt with the client-level timeout from
//! [`ApiConfig`]. Failures are classified into [`GatewayError`], whose
//! `Display` output is the exact text shown to the user.

use crate::config::ApiConfig;
use crate::models::{RouteDescription, RouteRequest, SafetyAlert, SafetyData, SubmissionResult};
use anyhow::{bail, Context, Result};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a request did not produce a 2xx response.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request timed out, check your connection and try again.")]
    Timeout,
    #[error("request was cancelled, try again.")]
    Cancelled,
    #[error("{}", rejection_message(.status, .message))]
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("received an unexpected response, try again.")]
    Malformed(String),
    #[error("something went wrong, try again.")]
    Transport(#[source] reqwest::Error),
}

fn rejection_message(status: &StatusCode, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("error {}", status),
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout
        } else {
            GatewayError::Transport(err)
        }
    }
}

/// Form submission endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    SignUp,
    SaveAddress,
}

impl Endpoint {
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Login => "login",
            Endpoint::SignUp => "signup",
            Endpoint::SaveAddress => "addresses",
        }
    }
}

/// A decoded 2xx response.
#[derive(Debug, Clone, PartialEq)]
pub struct Acknowledgement {
    /// Non-empty `message` string from the body, if any
    pub message: Option<String>,
    /// Whole body; `Null` when it was empty or not JSON
    pub body: Value,
}

pub struct RequestGateway {
    client: Client,
    login_url: Url,
    signup_url: Url,
    addresses_url: Url,
    safety_url: Url,
    routes_url: Url,
}

impl RequestGateway {
    pub fn new(api: &ApiConfig) -> Result<Self> {
        let base = Url::parse(&api.base_url)
            .with_context(|| format!("Invalid API base URL: {}", api.base_url))?;
        if base.cannot_be_a_base() {
            bail!("API base URL cannot carry paths: {}", api.base_url);
        }

        let client = Client::builder()
            .timeout(api.timeout())
            .user_agent(concat!("rivulex/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        let paths = &api.endpoints;
        Ok(Self {
            client,
            login_url: join(&base, &paths.login),
            signup_url: join(&base, &paths.signup),
            addresses_url: join(&base, &paths.addresses),
            safety_url: join(&base, &paths.safety),
            routes_url: join(&base, &paths.routes),
        })
    }

    fn url_for(&self, endpoint: Endpoint) -> &Url {
        match endpoint {
            Endpoint::Login => &self.login_url,
            Endpoint::SignUp => &self.signup_url,
            Endpoint::SaveAddress => &self.addresses_url,
        }
    }

    /// POST `payload` as JSON to a form endpoint.
    pub async fn post<P: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        payload: &P,
    ) -> Result<Acknowledgement, GatewayError> {
        let url = self.url_for(endpoint);
        info!("POST {} ({})", url, endpoint.name());
        let body = self.execute(self.client.post(url.clone()).json(payload)).await?;
        Ok(Acknowledgement {
            message: message_of(&body),
            body,
        })
    }

    /// Submit a form and turn the outcome into a user-facing result.
    ///
    /// `confirmation` is shown when a 2xx response carries no message.
    pub async fn send<P: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        payload: &P,
        confirmation: &str,
    ) -> SubmissionResult {
        match self.post(endpoint, payload).await {
            Ok(ack) => {
                info!("{} accepted", endpoint.name());
                SubmissionResult::success(ack.message.unwrap_or_else(|| confirmation.to_string()))
            }
            Err(e) => {
                warn!("{} failed: {:?}", endpoint.name(), e);
                SubmissionResult::failure(e.to_string())
            }
        }
    }

    /// Fetch alerts for a location (`GET {safety}/{location}`).
    pub async fn safety_data(&self, location: &str) -> Result<SafetyData, GatewayError> {
        let mut url = self.safety_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(location);
        }
        info!("GET {}", url);
        let body = self.execute(self.client.get(url)).await?;
        decode_safety_data(body)
    }

    /// Look up a route between two places.
    pub async fn route(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<RouteDescription, GatewayError> {
        let request = RouteRequest {
            origin: origin.to_string(),
            destination: destination.to_string(),
        };
        info!("POST {}", self.routes_url);
        let body = self
            .execute(self.client.post(self.routes_url.clone()).json(&request))
            .await?;
        Ok(RouteDescription(body))
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Value, GatewayError> {
        let response = request.send().await?;
        let status = response.status();
        info!("Status: {}", status);

        let bytes = response.bytes().await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice::<Value>(&bytes).unwrap_or_else(|e| {
                debug!("Response body is not JSON: {}", e);
                Value::Null
            })
        };

        if status.is_success() {
            Ok(body)
        } else {
            Err(GatewayError::Rejected {
                status,
                message: message_of(&body),
            })
        }
    }
}

fn join(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments
            .pop_if_empty()
            .extend(path.split('/').filter(|s| !s.is_empty()));
    }
    url
}

fn message_of(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}

/// Decode a safety-data body alert by alert. Entries that do not decode are
/// skipped; a body where no entry survives is reported as malformed.
fn decode_safety_data(body: Value) -> Result<SafetyData, GatewayError> {
    let alerts = match body {
        Value::Null => return Ok(SafetyData::default()),
        Value::Object(mut map) => map.remove("alerts"),
        _ => {
            return Err(GatewayError::Malformed(
                "safety data is not an object".to_string(),
            ))
        }
    };
    let entries = match alerts {
        None | Some(Value::Null) => return Ok(SafetyData::default()),
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            return Err(GatewayError::Malformed(
                "`alerts` is not a list".to_string(),
            ))
        }
    };

    let total = entries.len();
    let decoded: Vec<SafetyAlert> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(i, entry)| match serde_json::from_value(entry) {
            Ok(alert) => Some(alert),
            Err(e) => {
                warn!("Skipping malformed alert #{}: {}", i, e);
                None
            }
        })
        .collect();

    if total > 0 && decoded.is_empty() {
        return Err(GatewayError::Malformed(format!(
            "none of {} alerts could be read",
            total
        )));
    }
    Ok(SafetyData {
        alerts: Some(decoded),
    })
}
