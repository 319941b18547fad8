//! Lead submission and the CRM payload derived from it.

use serde::{Deserialize, Serialize};

use crate::error::RelayError;

/// Connector the CRM files website leads under.
pub const CONNECTOR_GUID: &str = "d3554968d7df460191eb4273a4dc8b08";
/// Comment sent when the visitor left no message.
pub const DEFAULT_COMMENT: &str = "Website Inquiry - Orchid IVY";
/// Project sent when the form did not name one.
pub const DEFAULT_PROJECT_NAME: &str = "Orchid IVY - Sector 51 Gurugram";

/// Inbound form submission. Every field is optional on the wire;
/// `into_crm_payload` enforces the required ones.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub property_project_name: Option<String>,
}

/// Body of the CRM lead-create call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrmLeadPayload {
    pub connector_guid: String,
    pub first_name: String,
    pub last_name: String,
    pub comment: String,
    pub mobile_number: String,
    pub email_address: String,
    pub property_project_name: String,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl LeadRequest {
    /// Parse a raw request body. An empty body is an empty submission; anything
    /// other than a JSON object is rejected.
    pub fn from_body(body: &[u8]) -> Result<Self, RelayError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let value: serde_json::Value =
            serde_json::from_slice(body).map_err(|e| RelayError::InvalidBody(e.to_string()))?;
        if !value.is_object() {
            return Err(RelayError::InvalidBody("expected a JSON object".to_string()));
        }
        serde_json::from_value(value).map_err(|e| RelayError::InvalidBody(e.to_string()))
    }

    /// Check the required fields and derive the CRM payload.
    pub fn into_crm_payload(self) -> Result<CrmLeadPayload, RelayError> {
        let (Some(name), Some(phone)) = (non_empty(&self.name), non_empty(&self.phone)) else {
            return Err(RelayError::MissingFields);
        };
        let first_name = name.to_string();
        let mobile_number = phone.to_string();
        let comment = non_empty(&self.message)
            .unwrap_or(DEFAULT_COMMENT)
            .to_string();
        let property_project_name = non_empty(&self.property_project_name)
            .unwrap_or(DEFAULT_PROJECT_NAME)
            .to_string();

        Ok(CrmLeadPayload {
            connector_guid: CONNECTOR_GUID.to_string(),
            first_name,
            last_name: String::new(),
            comment,
            mobile_number,
            email_address: self.email.unwrap_or_default(),
            property_project_name,
        })
    }
}
