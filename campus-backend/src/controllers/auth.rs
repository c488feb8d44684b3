use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use super::require_admin;
use crate::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
struct LoginResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl LoginResponse {
    fn error(msg: &str) -> Self {
        Self {
            success: false,
            token: None,
            expires_at: None,
            error: Some(msg.to_string()),
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .route("/validate", web::get().to(validate)),
    );
}

/// Byte comparison that does not stop at the first mismatch.
fn credentials_match(given: &str, expected: &str) -> bool {
    let (a, b) = (given.as_bytes(), expected.as_bytes());
    let mut diff = a.len() ^ b.len();
    for i in 0..a.len().max(b.len()) {
        diff |= (*a.get(i).unwrap_or(&0) ^ *b.get(i).unwrap_or(&0)) as usize;
    }
    diff == 0
}

async fn login(state: web::Data<AppState>, body: web::Json<LoginRequest>) -> impl Responder {
    let Some(expected_password) = state.config.admin_password.as_deref() else {
        log::warn!("[AUTH] Login attempted but ADMIN_PASSWORD is not set");
        return HttpResponse::ServiceUnavailable()
            .json(LoginResponse::error("Admin login is not configured"));
    };

    let user_ok = credentials_match(body.username.trim(), &state.config.admin_username);
    let pass_ok = credentials_match(&body.password, expected_password);
    if !(user_ok && pass_ok) {
        log::warn!("[AUTH] Rejected login for '{}'", body.username.trim());
        return HttpResponse::Unauthorized().json(LoginResponse::error("Invalid username or password"));
    }

    match state.db.create_session() {
        Ok(session) => {
            log::info!("[AUTH] Admin session created");
            HttpResponse::Ok().json(LoginResponse {
                success: true,
                token: Some(session.token),
                expires_at: Some(session.expires_at.to_rfc3339()),
                error: None,
            })
        }
        Err(e) => {
            log::error!("Failed to create session: {}", e);
            HttpResponse::InternalServerError().json(LoginResponse::error("Internal server error"))
        }
    }
}

async fn logout(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.trim_start_matches("Bearer ").trim().to_string());

    if let Some(token) = token {
        if let Err(e) = state.db.delete_session(&token) {
            log::error!("Failed to delete session: {}", e);
        }
    }
    HttpResponse::Ok().json(serde_json::json!({ "success": true }))
}

async fn validate(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    match require_admin(&state, &req) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "valid": true })),
        Err(resp) => resp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::test_support::test_state;
    use crate::mail::test_support::FakeMailer;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_credentials_match() {
        assert!(credentials_match("admin", "admin"));
        assert!(!credentials_match("admin", "admin2"));
        assert!(!credentials_match("", "x"));
    }

    #[actix_web::test]
    async fn test_login_then_validate_then_logout() {
        let (_dir, state, _) = test_state(FakeMailer::ok());
        let app = test::init_service(App::new().app_data(state.clone()).configure(config)).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({ "username": "admin", "password": "wrong" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({ "username": "admin", "password": "correct horse" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let token = body["token"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri("/api/auth/validate")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        let req = test::TestRequest::post()
            .uri("/api/auth/logout")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get()
            .uri("/api/auth/validate")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 401);
    }
}
