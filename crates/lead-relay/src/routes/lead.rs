use actix_web::{web, HttpResponse};

use crate::error::RelayError;
use crate::lead::LeadRequest;
use crate::state::AppState;

/// POST /api/lead - Validate a website lead and forward it to the CRM
pub async fn create_lead(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, RelayError> {
    tracing::info!(
        body = %String::from_utf8_lossy(&body),
        "[/api/lead] Incoming request"
    );

    let payload = LeadRequest::from_body(&body)?.into_crm_payload()?;

    let auth_key = state
        .config
        .crm_auth_key
        .as_deref()
        .ok_or(RelayError::MissingAuthKey)?;

    let crm_response = state.crm.create_lead(auth_key, &payload).await?;

    tracing::info!(first_name = %payload.first_name, "Lead created in CRM");

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "crmResponse": crm_response,
    })))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/lead", web::post().to(create_lead));
}
