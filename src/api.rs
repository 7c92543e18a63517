use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure taxonomy for every backend call: the backend either answered and
/// signalled failure itself (`Application`), or no well-formed answer was
/// obtained at all (`Transport`).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    Application(String),
    #[error("{0}")]
    Transport(String),
}

#[derive(Clone, Serialize)]
struct ChatRequest {
    message: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ChatReply {
    response: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ChatErrorBody {
    error: String,
}

#[derive(Clone, Debug, Deserialize)]
struct VpnTestBody {
    success: bool,
    ip: Option<String>,
    method: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct ProxyListingBody {
    success: bool,
    #[serde(default)]
    proxies: Vec<String>,
    #[serde(default)]
    count: usize,
    error: Option<String>,
}

/// Connectivity report returned by a successful `/api/vpn-test` round trip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VpnReport {
    pub ip: String,
    pub method: String,
}

/// Proxy inventory returned by a successful `/api/get-proxies` round trip.
/// `count` is the backend's total, which may exceed `proxies.len()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProxyListing {
    pub proxies: Vec<String>,
    pub count: usize,
}

#[derive(Clone, Debug)]
pub struct BackendClient {
    base_url: String,
    http: reqwest::Client,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(2))
            .timeout(Duration::from_secs(60))
            .build()
            .expect("request client");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// POST `/api/chat` with `{message}`. A 2xx answer carries the bot reply in
    /// `response`; any other status carries the failure reason in `error`.
    pub async fn send_chat(&self, message: String) -> Result<String, ApiError> {
        let response = self
            .http
            .post(self.endpoint("/api/chat"))
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        if status.is_success() {
            let reply: ChatReply = serde_json::from_str(&body)
                .map_err(|err| ApiError::Transport(err.to_string()))?;
            tracing::debug!(len = reply.response.len(), "chat reply received");
            Ok(reply.response)
        } else {
            let reason = serde_json::from_str::<ChatErrorBody>(&body)
                .map(|parsed| parsed.error)
                .unwrap_or(body);
            tracing::debug!(%status, "chat request rejected");
            Err(ApiError::Application(reason))
        }
    }

    /// GET `/api/vpn-test`. The `success` flag decides the tier regardless of
    /// HTTP status; an unparseable body counts as a transport failure.
    pub async fn test_vpn(&self) -> Result<VpnReport, ApiError> {
        let body: VpnTestBody = self
            .get_json(self.endpoint("/api/vpn-test"))
            .await?;

        if body.success {
            Ok(VpnReport {
                ip: body.ip.unwrap_or_default(),
                method: body.method.unwrap_or_default(),
            })
        } else {
            Err(ApiError::Application("Échec du test".to_string()))
        }
    }

    /// GET `/api/get-proxies`.
    pub async fn list_proxies(&self) -> Result<ProxyListing, ApiError> {
        let body: ProxyListingBody = self
            .get_json(self.endpoint("/api/get-proxies"))
            .await?;

        if body.success {
            Ok(ProxyListing {
                proxies: body.proxies,
                count: body.count,
            })
        } else {
            Err(ApiError::Application(
                body.error.unwrap_or_else(|| "Erreur inconnue".to_string()),
            ))
        }
    }

    /// GET `/health`, reachability probe. Never errors; unreachable is `false`.
    pub async fn check_health(&self) -> bool {
        match self.http.get(self.endpoint("/health")).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(err) => {
                tracing::debug!(error = %err, "backend health probe failed");
                false
            }
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))
    }
}
