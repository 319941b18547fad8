//! Lead relay: accepts website lead submissions and forwards them to the
//! IQSetter CRM with a server-held auth key.
//!
//! # Modules
//!
//! - [`config`]: Environment configuration ([`RelayConfig`])
//! - [`cors`]: Origin allow-list and CORS middleware
//! - [`crm`]: Outbound CRM client
//! - [`lead`]: Lead submission and CRM payload types
//! - [`routes`]: `POST /api/lead` and `GET /health`

pub mod config;
pub mod cors;
pub mod crm;
pub mod error;
pub mod lead;
pub mod routes;
pub mod state;

pub use config::RelayConfig;
pub use error::RelayError;
pub use state::AppState;

/// Inbound body limit (100 KiB).
pub const MAX_BODY_BYTES: usize = 100 * 1024;
