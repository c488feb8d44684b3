use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;

use super::{cached_json, require_admin};
use crate::error::respond;
use crate::models::JobPostingInput;
use crate::AppState;

/// New top-to-bottom order, every posting's id exactly once.
#[derive(Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<String>,
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/careers").route(web::get().to(list_careers)))
        .service(
            web::scope("/api/admin/careers")
                .route("", web::post().to(create_career))
                .route("/reorder", web::post().to(reorder_careers))
                .route("/{id}", web::put().to(update_career))
                .route("/{id}", web::delete().to(delete_career)),
        );
}

async fn list_careers(state: web::Data<AppState>) -> impl Responder {
    cached_json(&state, "/careers", || state.db.list_careers())
}

async fn create_career(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<JobPostingInput>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &req) {
        return resp;
    }
    respond(state.actions.create_career(body.into_inner()).await, "Job posting created")
}

async fn update_career(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<JobPostingInput>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &req) {
        return resp;
    }
    respond(
        state.actions.update_career(&path.into_inner(), body.into_inner()).await,
        "Job posting updated",
    )
}

async fn delete_career(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &req) {
        return resp;
    }
    respond(state.actions.delete_career(&path.into_inner()).await, "Job posting deleted")
}

async fn reorder_careers(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<ReorderRequest>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &req) {
        return resp;
    }
    respond(
        state.actions.reorder_careers(body.into_inner().ids).await,
        "Job postings reordered",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::test_support::{admin_header, test_state};
    use crate::mail::test_support::FakeMailer;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_reorder_over_http() {
        let (_dir, state, _) = test_state(FakeMailer::ok());
        let app = test::init_service(App::new().app_data(state.clone()).configure(config)).await;
        let auth = admin_header(&state);

        let mut ids = Vec::new();
        for title in ["Bursar", "Groundskeeper", "Tutor"] {
            let req = test::TestRequest::post()
                .uri("/api/admin/careers")
                .insert_header(auth.clone())
                .set_json(json!({ "title": title, "date": "2025-06-01", "description": "Apply" }))
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            ids.push(body["data"]["id"].as_str().unwrap().to_string());
        }
        ids.rotate_left(1);

        let req = test::TestRequest::post()
            .uri("/api/admin/careers/reorder")
            .insert_header(auth.clone())
            .set_json(json!({ "ids": ids }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);

        let req = test::TestRequest::get().uri("/api/careers").to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        let titles: Vec<_> = listed
            .as_array()
            .unwrap()
            .iter()
            .map(|p| (p["title"].as_str().unwrap().to_string(), p["order"].as_i64().unwrap()))
            .collect();
        assert_eq!(
            titles,
            vec![
                ("Groundskeeper".to_string(), 0),
                ("Tutor".to_string(), 1),
                ("Bursar".to_string(), 2)
            ]
        );

        let req = test::TestRequest::post()
            .uri("/api/admin/careers/reorder")
            .insert_header(auth)
            .set_json(json!({ "ids": ["ghost"] }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);
    }
}
