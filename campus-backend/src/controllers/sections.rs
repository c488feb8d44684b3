use actix_web::{web, HttpRequest, HttpResponse, Responder};
use std::str::FromStr;

use super::careers::ReorderRequest;
use super::{cached_json, require_admin};
use crate::error::{respond, ActionError};
use crate::models::{SectionKind, SiteSectionInput};
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/sections/{kind}").route(web::get().to(list_sections)))
        .service(
            web::scope("/api/admin/sections/{kind}")
                .route("", web::post().to(create_section))
                .route("/reorder", web::post().to(reorder_sections))
                .route("/{id}", web::put().to(update_section))
                .route("/{id}", web::delete().to(delete_section)),
        );
}

fn parse_kind(raw: &str) -> Result<SectionKind, HttpResponse> {
    SectionKind::from_str(raw)
        .map_err(|_| ActionError::NotFound(format!("Section list '{}'", raw)).into_response())
}

async fn list_sections(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let kind = match parse_kind(&path.into_inner()) {
        Ok(kind) => kind,
        Err(resp) => return resp,
    };
    let page = format!("{}#{}", kind.page_path(), kind);
    cached_json(&state, &page, || state.db.list_sections(kind))
}

async fn create_section(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<SiteSectionInput>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &req) {
        return resp;
    }
    let kind = match parse_kind(&path.into_inner()) {
        Ok(kind) => kind,
        Err(resp) => return resp,
    };
    respond(state.actions.create_section(kind, body.into_inner()).await, "Section created")
}

async fn update_section(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(String, String)>,
    body: web::Json<SiteSectionInput>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &req) {
        return resp;
    }
    let (kind, id) = path.into_inner();
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(resp) => return resp,
    };
    respond(
        state.actions.update_section(kind, &id, body.into_inner()).await,
        "Section updated",
    )
}

async fn delete_section(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &req) {
        return resp;
    }
    let (kind, id) = path.into_inner();
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(resp) => return resp,
    };
    respond(state.actions.delete_section(kind, &id).await, "Section deleted")
}

async fn reorder_sections(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<ReorderRequest>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &req) {
        return resp;
    }
    let kind = match parse_kind(&path.into_inner()) {
        Ok(kind) => kind,
        Err(resp) => return resp,
    };
    respond(
        state.actions.reorder_sections(kind, body.into_inner().ids).await,
        "Sections reordered",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::test_support::test_state;
    use crate::mail::test_support::FakeMailer;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_unknown_kind_is_404() {
        let (_dir, state, _) = test_state(FakeMailer::ok());
        let app = test::init_service(App::new().app_data(state.clone()).configure(config)).await;
        let req = test::TestRequest::get().uri("/api/sections/alumni_feed").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);

        let req = test::TestRequest::get().uri("/api/sections/student_life").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, serde_json::json!([]));
    }
}
