pub mod academics;
pub mod alumni;
pub mod auth;
pub mod careers;
pub mod chat;
pub mod health;
pub mod media;
pub mod news;
pub mod sections;
pub mod site_content;
pub mod submissions;
pub mod upload;

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;

use crate::error::{ActionError, ActionResponse};
use crate::AppState;

/// Check the admin Bearer token. The `Err` side is the response to return as-is.
pub(crate) fn require_admin(state: &web::Data<AppState>, req: &HttpRequest) -> Result<(), HttpResponse> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.trim_start_matches("Bearer ").trim().to_string())
        .filter(|t| !t.is_empty());

    let token = match token {
        Some(t) => t,
        None => {
            return Err(HttpResponse::Unauthorized()
                .json(ActionResponse::failure("No authorization token provided")));
        }
    };

    match state.db.validate_session(&token) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(HttpResponse::Unauthorized()
            .json(ActionResponse::failure("Invalid or expired session"))),
        Err(e) => {
            log::error!("Failed to validate session: {}", e);
            Err(HttpResponse::InternalServerError()
                .json(ActionResponse::failure("Internal server error")))
        }
    }
}

/// Serve a public read from the page cache, loading and caching it on a miss.
pub(crate) fn cached_json<T, F>(state: &web::Data<AppState>, page: &str, load: F) -> HttpResponse
where
    T: Serialize,
    F: FnOnce() -> Result<T, ActionError>,
{
    let result = state
        .actions
        .cache
        .get_or_try_insert(page, || load().and_then(|value| Ok(serde_json::to_value(value)?)));
    match result {
        Ok(value) => HttpResponse::Ok().json(value.as_ref()),
        Err(e) => e.into_response(),
    }
}
