use actix_web::{web, HttpRequest, HttpResponse, Responder};

use super::{cached_json, require_admin};
use crate::error::{respond, ActionError};
use crate::models::AcademicProgramInput;
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/academics")
            .route("", web::get().to(list_programs))
            .route("/{slug}", web::get().to(get_program)),
    )
    .service(
        web::scope("/api/admin/academics")
            .route("", web::post().to(create_program))
            .route("/{id}", web::put().to(update_program))
            .route("/{id}", web::delete().to(delete_program)),
    );
}

async fn list_programs(state: web::Data<AppState>) -> impl Responder {
    cached_json(&state, "/academics", || state.db.list_academic_programs())
}

async fn get_program(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let slug = path.into_inner();
    cached_json(&state, &format!("/academics/{}", slug), || {
        state
            .db
            .get_academic_program_by_slug(&slug)?
            .ok_or_else(|| ActionError::NotFound("Program".to_string()))
    })
}

async fn create_program(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<AcademicProgramInput>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &req) {
        return resp;
    }
    respond(
        state.actions.create_academic_program(body.into_inner()).await,
        "Program created",
    )
}

async fn update_program(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<AcademicProgramInput>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &req) {
        return resp;
    }
    respond(
        state
            .actions
            .update_academic_program(&path.into_inner(), body.into_inner())
            .await,
        "Program updated",
    )
}

async fn delete_program(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &req) {
        return resp;
    }
    respond(
        state.actions.delete_academic_program(&path.into_inner()).await,
        "Program deleted",
    )
}
