pub mod health;
pub mod lead;

use actix_web::web;

/// Mount every route the relay serves.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure).configure(lead::configure);
}
