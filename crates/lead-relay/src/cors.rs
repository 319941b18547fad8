//! Strict allow-list CORS gate.

use actix_cors::Cors;
use actix_web::http::header;

/// Origin allow-list. Requests without an `Origin` header (curl, server-to-server)
/// are always let through; browser requests must match an entry exactly.
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    allowed: Vec<String>,
}

impl OriginPolicy {
    pub fn new(allowed: &[String]) -> Self {
        Self {
            allowed: allowed.to_vec(),
        }
    }

    pub fn is_allowed(&self, origin: Option<&str>) -> bool {
        match origin {
            None => true,
            Some(origin) => self.allowed.iter().any(|a| a == origin),
        }
    }
}

/// Build the CORS middleware from allowed origins.
///
/// Disallowed origins get a 400 from the middleware before routing.
pub fn build_cors(allowed_origins: &[String]) -> Cors {
    let policy = OriginPolicy::new(allowed_origins);
    Cors::default()
        .allowed_origin_fn(move |origin, _req_head| {
            let allowed = policy.is_allowed(Some(origin.to_str().unwrap_or("")));
            if !allowed {
                tracing::warn!(origin = ?origin, "Not allowed by CORS");
            }
            allowed
        })
        .block_on_origin_mismatch(true)
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(3600)
}
