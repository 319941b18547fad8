use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::json;
use url::Url;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use lead_relay::config::build_allowed_origins;
use lead_relay::cors::build_cors;
use lead_relay::{routes, AppState, RelayConfig};

const FRONTEND: &str = "https://orchid-ivy.example";

fn make_state(crm: &MockServer) -> web::Data<AppState> {
    let config = RelayConfig {
        port: 0,
        frontend_url: Some(FRONTEND.to_string()),
        crm_auth_key: Some("test-auth-key".to_string()),
        crm_base_url: Url::parse(&format!("{}/crm/lead/create", crm.uri())).unwrap(),
        crm_timeout: None,
        allowed_origins: build_allowed_origins(Some(FRONTEND)),
    };
    web::Data::new(AppState::new(config).unwrap())
}

macro_rules! gated_app {
    ($state:expr) => {{
        let state = $state;
        let origins = state.config.allowed_origins.clone();
        test::init_service(
            App::new()
                .app_data(state)
                .wrap(build_cors(&origins))
                .configure(routes::configure),
        )
        .await
    }};
}

async fn mount_crm_ok(crm: &MockServer, calls: u64) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 1 })))
        .expect(calls)
        .mount(crm)
        .await;
}

fn lead(origin: Option<&str>) -> test::TestRequest {
    let req = test::TestRequest::post()
        .uri("/api/lead")
        .set_json(json!({ "name": "Asha", "phone": "9876543210" }));
    match origin {
        Some(origin) => req.insert_header(("Origin", origin)),
        None => req,
    }
}

#[actix_rt::test]
async fn test_foreign_origin_rejected_before_handler() {
    let crm = MockServer::start().await;
    mount_crm_ok(&crm, 0).await;
    let app = gated_app!(make_state(&crm));

    let status = match test::try_call_service(&app, lead(Some("http://evil.example")).to_request())
        .await
    {
        Ok(resp) => resp.status(),
        Err(err) => err.as_response_error().status_code(),
    };

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let received = crm.received_requests().await.unwrap();
    assert!(received.is_empty(), "CRM was called {} times", received.len());
}

#[actix_rt::test]
async fn test_foreign_origin_rejected_on_health() {
    let crm = MockServer::start().await;
    let app = gated_app!(make_state(&crm));

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header(("Origin", "http://localhost:3001"))
        .to_request();
    let status = match test::try_call_service(&app, req).await {
        Ok(resp) => resp.status(),
        Err(err) => err.as_response_error().status_code(),
    };

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_request_without_origin_accepted() {
    let crm = MockServer::start().await;
    mount_crm_ok(&crm, 1).await;
    let app = gated_app!(make_state(&crm));

    let resp = test::call_service(&app, lead(None).to_request()).await;

    assert_eq!(resp.status(), 200);
    assert!(resp
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}

#[actix_rt::test]
async fn test_configured_frontend_origin_accepted() {
    let crm = MockServer::start().await;
    mount_crm_ok(&crm, 1).await;
    let app = gated_app!(make_state(&crm));

    let resp = test::call_service(&app, lead(Some(FRONTEND)).to_request()).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("access-control-allow-origin").unwrap(),
        FRONTEND
    );
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
}

#[actix_rt::test]
async fn test_dev_origin_accepted_on_health() {
    let crm = MockServer::start().await;
    let app = gated_app!(make_state(&crm));

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header(("Origin", "http://localhost:3000"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:3000"
    );
}

#[actix_rt::test]
async fn test_preflight_from_frontend_allowed() {
    let crm = MockServer::start().await;
    let app = gated_app!(make_state(&crm));

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/api/lead")
        .insert_header(("Origin", FRONTEND))
        .insert_header(("Access-Control-Request-Method", "POST"))
        .insert_header(("Access-Control-Request-Headers", "content-type"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("access-control-allow-origin").unwrap(),
        FRONTEND
    );
}
