//! Health endpoint tests

mod common;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};

use ipwhere::api::services::AppStartTime;
use ipwhere::api::services::health::HealthResponse;
use ipwhere::runtime::modes::configure_routes;

#[actix_web::test]
async fn test_health_reports_provider() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(common::default_provider()))
            .app_data(web::Data::new(AppStartTime::now()))
            .configure(|cfg| configure_routes(cfg, "/health")),
    )
    .await;

    let req = TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let health: HealthResponse = test::read_body_json(resp).await;
    assert_eq!(health.status, "healthy");
    assert_eq!(health.provider, "Memory");
    assert!(health.isp_enabled);
    assert!(chrono::DateTime::parse_from_rfc3339(&health.timestamp).is_ok());
}

#[actix_web::test]
async fn test_ready_and_live() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(common::default_provider()))
            .app_data(web::Data::new(AppStartTime::now()))
            .configure(|cfg| configure_routes(cfg, "/status")),
    )
    .await;

    let req = TestRequest::get().uri("/status/ready").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "OK");

    let req = TestRequest::get().uri("/status/live").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // 自定义前缀后，默认路径落到 locate 的纯文本响应
    let req = TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("text/plain"));
}
