use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;

#[derive(Error, Debug)]
pub enum AtsError {
    #[error("ATS transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("ATS rejected the push: {0}")]
    Rejected(String),

    #[error("Malformed ATS response: {0}")]
    MalformedResponse(String),
}

/// Acknowledgement returned by the external ATS for a successful push.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsAck {
    pub external_id: Option<String>,
}

/// Seam to the external ATS. The dispatcher only ever sends tagged pushes
/// of shape `{ action, data }` and waits for the acknowledgement.
#[async_trait]
pub trait AtsGateway: Send + Sync {
    async fn push(&self, action: &str, data: serde_json::Value) -> Result<AtsAck, AtsError>;
}

pub struct HttpAtsGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpAtsGateway {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.ats_base_url.clone(),
            api_key: config.ats_api_key.clone(),
        }
    }
}

#[async_trait]
impl AtsGateway for HttpAtsGateway {
    async fn push(&self, action: &str, data: serde_json::Value) -> Result<AtsAck, AtsError> {
        let payload = serde_json::json!({
            "action": action,
            "data": data,
        });

        let response = self
            .client
            .post(format!("{}/sync", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        let response_body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AtsError::MalformedResponse(e.to_string()))?;

        match response_body["status"].as_str() {
            Some("success") => Ok(AtsAck {
                external_id: response_body["data"]["external_id"]
                    .as_str()
                    .map(|s| s.to_string()),
            }),
            Some(_) => Err(AtsError::Rejected(
                response_body["message"]
                    .as_str()
                    .unwrap_or("sync rejected")
                    .to_string(),
            )),
            None => Err(AtsError::MalformedResponse(
                "response has no status field".to_string(),
            )),
        }
    }
}
