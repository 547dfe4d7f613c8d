//! Integration tests for bearer authentication and level guards

mod common;

use actix_web::{http::StatusCode, test, web, App, HttpResponse};
use chrono::Duration;
use rt_api::app::create_app;
use rt_api::middleware::auth::{AuthContext, JwtAuth};
use rt_api::middleware::role::{RequireLevel, ADMIN_LEVEL, STAFF_LEVEL};

use common::{app_state, bearer, short_lived_token_service, token_service};

#[actix_web::test]
async fn test_middleware_requires_auth_header() {
    let app = test::init_service(
        App::new()
            .wrap(JwtAuth::new(token_service()))
            .route("/protected", web::get().to(|| async { HttpResponse::Ok().body("Protected content") })),
    )
    .await;

    let req = test::TestRequest::get().uri("/protected").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "MISSING_CREDENTIALS");
    assert_eq!(body["message"], "Authorization header required");
}

#[actix_web::test]
async fn test_middleware_rejects_malformed_header() {
    let app = test::init_service(
        App::new()
            .wrap(JwtAuth::new(token_service()))
            .route("/protected", web::get().to(|| async { HttpResponse::Ok().finish() })),
    )
    .await;

    for value in ["Token abc", "Bearer", "Bearer a b"] {
        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header(("Authorization", value))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{}", value);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Invalid authorization format");
    }
}

#[actix_web::test]
async fn test_middleware_rejects_invalid_token() {
    let app = test::init_service(
        App::new()
            .wrap(JwtAuth::new(token_service()))
            .route("/protected", web::get().to(|| async { HttpResponse::Ok().finish() })),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(bearer("invalid-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "UNAUTHORIZED");
    assert_eq!(body["message"], "Invalid or expired token");
}

#[actix_web::test]
async fn test_rejection_is_localised() {
    let app = test::init_service(
        App::new()
            .wrap(JwtAuth::new(token_service()))
            .route("/protected", web::get().to(|| async { HttpResponse::Ok().finish() })),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Accept-Language", "id-ID,id;q=0.9"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Header Authorization diperlukan");
}

#[actix_web::test]
async fn test_token_from_other_secret_is_rejected() {
    let foreign = rt_core::TokenService::new(rt_core::TokenServiceConfig::new("someone-else"))
        .unwrap()
        .issue(1, "admin", ADMIN_LEVEL)
        .unwrap();
    let app = test::init_service(create_app(app_state(&token_service()))).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/profile")
        .insert_header(bearer(&foreign))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_expired_token_is_rejected() {
    let service = short_lived_token_service(Duration::seconds(1));
    let token = service.issue(4, "warga", 3).unwrap();
    let app = test::init_service(create_app(app_state(&service))).await;

    actix_rt::time::sleep(std::time::Duration::from_secs(2)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/profile")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_public_paths_skip_authentication() {
    let service = token_service();
    let app = test::init_service(create_app(app_state(&service))).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["revoked_tokens"], 0);

    let req = test::TestRequest::get().uri("/api/docs").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["authenticated_as"].is_null());
}

#[actix_web::test]
async fn test_unmounted_paths_are_not_public() {
    let service = token_service();
    let app = test::init_service(create_app(app_state(&service))).await;

    let req = test::TestRequest::post().uri("/api/v1/auth/login").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_optional_auth_reports_caller_on_public_path() {
    let service = token_service();
    let token = service.issue(9, "Bu Sekretaris", STAFF_LEVEL).unwrap();
    let app = test::init_service(create_app(app_state(&service))).await;

    let req = test::TestRequest::get()
        .uri("/api/docs")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["authenticated_as"], "Bu Sekretaris");
}

#[actix_web::test]
async fn test_profile_echoes_token_identity() {
    let service = token_service();
    let token = service.issue(21, "Pak Budi", 3).unwrap();
    let app = test::init_service(create_app(app_state(&service))).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/profile")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["user_id"], 21);
    assert_eq!(body["username"], "Pak Budi");
    assert_eq!(body["level_id"], 3);
}

#[actix_web::test]
async fn test_auth_context_extractor_without_middleware() {
    async fn protected_handler(auth: AuthContext) -> HttpResponse {
        HttpResponse::Ok().json(serde_json::json!({ "user_id": auth.user_id }))
    }

    let app = test::init_service(App::new().route("/protected", web::get().to(protected_handler))).await;

    let req = test::TestRequest::get().uri("/protected").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_level_guard_rejects_lower_level() {
    let service = token_service();
    let token = service.issue(30, "warga", 3).unwrap();
    let app = test::init_service(create_app(app_state(&service))).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/revocations")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INSUFFICIENT_PERMISSIONS");
    assert_eq!(body["message"], "Insufficient permissions");
}

#[actix_web::test]
async fn test_level_guard_admits_admin() {
    let service = token_service();
    let admin = service.issue(1, "Pak RT", ADMIN_LEVEL).unwrap();
    let other = service.issue(2, "warga", 3).unwrap();
    service.revoke(&other).unwrap();
    let app = test::init_service(create_app(app_state(&service))).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/revocations")
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["revoked_tokens"], 1);
    assert!(body["next_expiry"].is_string());

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/revocations/purge")
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["purged"], 0);
    assert_eq!(body["remaining"], 1);
}

#[actix_web::test]
async fn test_level_guard_without_authentication() {
    let app = test::init_service(
        App::new()
            .wrap(RequireLevel::new([ADMIN_LEVEL, STAFF_LEVEL]))
            .route("/staff", web::get().to(|| async { HttpResponse::Ok().finish() })),
    )
    .await;

    let req = test::TestRequest::get().uri("/staff").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
