use actix_web::{web, HttpRequest, HttpResponse, Responder};

use super::{cached_json, require_admin};
use crate::error::respond;
use crate::models::{AlumniStoryInput, AlumniUpdateInput};
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/alumni")
            .route("/stories", web::get().to(list_stories))
            .route("/updates", web::post().to(submit_update)),
    )
    .service(
        web::scope("/api/admin/alumni")
            .route("/stories", web::post().to(create_story))
            .route("/stories/{id}", web::put().to(update_story))
            .route("/stories/{id}", web::delete().to(delete_story))
            .route("/updates", web::get().to(list_updates)),
    );
}

async fn list_stories(state: web::Data<AppState>) -> impl Responder {
    cached_json(&state, "/alumni#stories", || state.db.list_alumni_stories())
}

async fn submit_update(state: web::Data<AppState>, body: web::Json<AlumniUpdateInput>) -> HttpResponse {
    respond(
        state.actions.submit_alumni_update(body.into_inner()).await,
        "Thanks for sharing your news!",
    )
}

async fn create_story(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<AlumniStoryInput>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &req) {
        return resp;
    }
    respond(state.actions.create_alumni_story(body.into_inner()).await, "Story published")
}

async fn update_story(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<AlumniStoryInput>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &req) {
        return resp;
    }
    respond(
        state.actions.update_alumni_story(&path.into_inner(), body.into_inner()).await,
        "Story updated",
    )
}

async fn delete_story(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &req) {
        return resp;
    }
    respond(state.actions.delete_alumni_story(&path.into_inner()).await, "Story deleted")
}

async fn list_updates(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &req) {
        return resp;
    }
    respond(state.db.list_alumni_updates(), "Alumni updates")
}
