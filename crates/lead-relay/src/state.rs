use crate::config::RelayConfig;
use crate::crm::CrmClient;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub crm: CrmClient,
}

impl AppState {
    pub fn new(config: RelayConfig) -> Result<Self, reqwest::Error> {
        let crm = CrmClient::from_config(&config)?;
        Ok(Self {
            config: Arc::new(config),
            crm,
        })
    }
}
