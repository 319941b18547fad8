//! Outbound client for the CRM lead-create endpoint.

use url::Url;

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::lead::CrmLeadPayload;

#[derive(Clone)]
pub struct CrmClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CrmClient {
    pub fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Build a client with the timeout from `config`, if any.
    pub fn from_config(config: &RelayConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.crm_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::new(builder.build()?, config.crm_base_url.clone()))
    }

    /// Lead-create URL with the auth key appended as `authkey`.
    pub fn lead_url(&self, auth_key: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair("authkey", auth_key);
        url
    }

    /// Send one lead to the CRM and return its parsed JSON reply.
    ///
    /// Single attempt; a non-2xx reply is surfaced as [`RelayError::CrmRejected`]
    /// with the parsed body, an unparsable reply as [`RelayError::InvalidCrmResponse`].
    pub async fn create_lead(
        &self,
        auth_key: &str,
        payload: &CrmLeadPayload,
    ) -> Result<serde_json::Value, RelayError> {
        let url = self.lead_url(auth_key);
        tracing::info!(
            url = %self.base_url,
            payload = ?payload,
            "Sending to CRM (authkey redacted)"
        );

        let response = self.http.post(url).json(payload).send().await?;
        let status = response.status();
        let raw = response.bytes().await?;

        tracing::info!(
            status = status.as_u16(),
            body = %String::from_utf8_lossy(&raw),
            "CRM raw response"
        );

        let data: serde_json::Value = serde_json::from_slice(&raw)
            .map_err(|e| RelayError::InvalidCrmResponse(e.to_string()))?;

        if !status.is_success() {
            return Err(RelayError::CrmRejected {
                status: status.as_u16(),
                details: data,
            });
        }

        Ok(data)
    }
}
