use actix_web::{web, HttpRequest, HttpResponse};

use super::require_admin;
use crate::error::respond;
use crate::models::{ContactInput, EnrollmentInput};
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/contact").route(web::post().to(submit_contact)))
        .service(web::resource("/api/enrollment").route(web::post().to(submit_enrollment)))
        .service(web::resource("/api/admin/contact").route(web::get().to(list_contact)))
        .service(web::resource("/api/admin/enrollment").route(web::get().to(list_enrollment)));
}

async fn submit_contact(state: web::Data<AppState>, body: web::Json<ContactInput>) -> HttpResponse {
    respond(
        state.actions.submit_contact(body.into_inner()).await,
        "Thank you! Your message has been sent.",
    )
}

async fn submit_enrollment(
    state: web::Data<AppState>,
    body: web::Json<EnrollmentInput>,
) -> HttpResponse {
    respond(
        state.actions.submit_enrollment(body.into_inner()).await,
        "Thank you for your interest! Our admissions team will contact you soon.",
    )
}

async fn list_contact(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &req) {
        return resp;
    }
    respond(state.actions.list_contact_submissions(), "Contact submissions")
}

async fn list_enrollment(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &req) {
        return resp;
    }
    respond(state.actions.list_enrollment_inquiries(), "Enrollment inquiries")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::test_support::{admin_header, test_state};
    use crate::mail::test_support::FakeMailer;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    fn contact() -> Value {
        json!({
            "name": "Taylor",
            "email": "taylor@example.com",
            "subject": "Transcripts",
            "message": "How do I request my transcript?"
        })
    }

    #[actix_web::test]
    async fn test_mail_failure_reports_api_message() {
        let (_dir, state, _) = test_state(FakeMailer::failing("Domain is not verified"));
        let app = test::init_service(App::new().app_data(state.clone()).configure(config)).await;
        let req = test::TestRequest::post().uri("/api/contact").set_json(contact()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 502);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "success": false, "message": "Domain is not verified" }));
    }

    #[actix_web::test]
    async fn test_contact_round_trip_to_admin_list() {
        let (_dir, state, mailer) = test_state(FakeMailer::ok());
        let app = test::init_service(App::new().app_data(state.clone()).configure(config)).await;
        let req = test::TestRequest::post().uri("/api/contact").set_json(contact()).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert_eq!(mailer.sent().len(), 1);

        let req = test::TestRequest::get().uri("/api/admin/contact").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 401);

        let req = test::TestRequest::get()
            .uri("/api/admin/contact")
            .insert_header(admin_header(&state))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"][0]["subject"], "Transcripts");
    }
}
