/// Thin client for Pinata's pinning API
use crate::config::PinataConfig;
use crate::errors::{BotError, BotResult};
use crate::logger::{self, LogTag};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

const PIN_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

pub struct PinataClient {
    http: Client,
    api_url: String,
    gateway_url: String,
    api_key: String,
    secret_key: String,
}

impl PinataClient {
    pub fn new(config: &PinataConfig) -> BotResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(PIN_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            gateway_url: config.gateway_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            secret_key: config.secret_key.clone(),
        })
    }

    /// `<gateway>/ipfs/<hash>`
    pub fn gateway_link(&self, hash: &str) -> String {
        format!("{}/ipfs/{}", self.gateway_url, hash)
    }

    /// Pin raw file bytes, returning the gateway url
    pub async fn pin_file(&self, bytes: Vec<u8>, file_name: &str) -> BotResult<String> {
        let size = bytes.len();
        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name.to_string()))
            .text("pinataMetadata", json!({ "name": file_name }).to_string());

        let response = self
            .http
            .post(format!("{}/pinning/pinFileToIPFS", self.api_url))
            .header("pinata_api_key", &self.api_key)
            .header("pinata_secret_api_key", &self.secret_key)
            .multipart(form)
            .send()
            .await?;

        let hash = Self::read_hash(response).await?;
        logger::debug(
            LogTag::Upload,
            &format!("Pinned file {} ({} bytes) as {}", file_name, size, hash),
        );
        Ok(self.gateway_link(&hash))
    }

    /// Pin a JSON document, returning the gateway url
    pub async fn pin_json(&self, content: &Value, name: &str) -> BotResult<String> {
        let response = self
            .http
            .post(format!("{}/pinning/pinJSONToIPFS", self.api_url))
            .header("pinata_api_key", &self.api_key)
            .header("pinata_secret_api_key", &self.secret_key)
            .json(&json!({
                "pinataContent": content,
                "pinataMetadata": { "name": name },
            }))
            .send()
            .await?;

        let hash = Self::read_hash(response).await?;
        logger::debug(LogTag::Upload, &format!("Pinned JSON {} as {}", name, hash));
        Ok(self.gateway_link(&hash))
    }

    async fn read_hash(response: reqwest::Response) -> BotResult<String> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BotError::Upload(format!(
                "Pinata returned {}: {}",
                status, body
            )));
        }

        let parsed: PinResponse = response.json().await?;
        Ok(parsed.ipfs_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_link_trims_slash() {
        let config = PinataConfig {
            gateway_url: "https://gateway.example/".to_string(),
            ..Default::default()
        };
        let client = PinataClient::new(&config).unwrap();
        assert_eq!(client.gateway_link("QmHash"), "https://gateway.example/ipfs/QmHash");
    }

    #[test]
    fn test_pin_response_field() {
        let parsed: PinResponse =
            serde_json::from_str(r#"{"IpfsHash":"QmAbc","PinSize":12,"Timestamp":"x"}"#).unwrap();
        assert_eq!(parsed.ipfs_hash, "QmAbc");
    }
}
