use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;

use super::{cached_json, require_admin};
use crate::error::{respond, ActionError};
use crate::models::NewsInput;
use crate::AppState;

#[derive(Deserialize)]
pub struct NewsQuery {
    pub category: Option<String>,
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/news")
            .route("", web::get().to(list_news))
            .route("/featured", web::get().to(get_featured))
            .route("/{slug}", web::get().to(get_by_slug)),
    )
    .service(
        web::scope("/api/admin/news")
            .route("", web::post().to(create_news))
            .route("/{id}", web::get().to(get_by_id))
            .route("/{id}", web::put().to(update_news))
            .route("/{id}", web::delete().to(delete_news)),
    );
}

async fn list_news(state: web::Data<AppState>, query: web::Query<NewsQuery>) -> impl Responder {
    let category = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());
    let page = match category {
        Some(c) => format!("/news?category={}", c),
        None => "/news".to_string(),
    };
    cached_json(&state, &page, || state.db.list_news(category))
}

async fn get_featured(state: web::Data<AppState>) -> impl Responder {
    cached_json(&state, "/#featured-news", || state.db.get_featured_news())
}

async fn get_by_slug(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let slug = path.into_inner();
    cached_json(&state, &format!("/news/{}", slug), || {
        state
            .db
            .get_news_by_slug(&slug)?
            .ok_or_else(|| ActionError::NotFound("Article".to_string()))
    })
}

/// Uncached read for the admin edit form.
async fn get_by_id(state: web::Data<AppState>, req: HttpRequest, path: web::Path<String>) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &req) {
        return resp;
    }
    let result = state
        .db
        .get_news(&path.into_inner())
        .and_then(|item| item.ok_or_else(|| ActionError::NotFound("Article".to_string())));
    respond(result, "Article")
}

async fn create_news(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<NewsInput>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &req) {
        return resp;
    }
    respond(state.actions.create_news(body.into_inner()).await, "Article created")
}

async fn update_news(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<NewsInput>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &req) {
        return resp;
    }
    respond(
        state.actions.update_news(&path.into_inner(), body.into_inner()).await,
        "Article updated",
    )
}

async fn delete_news(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &req) {
        return resp;
    }
    respond(state.actions.delete_news(&path.into_inner()).await, "Article deleted")
}
