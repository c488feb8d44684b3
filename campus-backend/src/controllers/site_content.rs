use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::Value;

use super::{cached_json, require_admin};
use crate::actions::content_page_path;
use crate::error::respond;
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/site-content/{key}").route(web::get().to(get_content)))
        .service(
            web::resource("/api/admin/site-content/{key}").route(web::put().to(put_content)),
        );
}

async fn get_content(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let key = path.into_inner();
    let page = format!("{}#content:{}", content_page_path(&key), key);
    cached_json(&state, &page, || state.actions.get_site_content(&key))
}

async fn put_content(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &req) {
        return resp;
    }
    respond(
        state.actions.put_site_content(&path.into_inner(), body.into_inner()).await,
        "Content saved",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::test_support::{admin_header, test_state};
    use crate::mail::test_support::FakeMailer;
    use actix_web::{test, App};
    use serde_json::json;

    #[actix_web::test]
    async fn test_put_invalidates_cached_read() {
        let (_dir, state, _) = test_state(FakeMailer::ok());
        let app = test::init_service(App::new().app_data(state.clone()).configure(config)).await;
        let auth = admin_header(&state);

        let put = |title: &str| {
            test::TestRequest::put()
                .uri("/api/admin/site-content/scholarships")
                .insert_header(auth.clone())
                .set_json(json!({ "title": title }))
                .to_request()
        };

        test::call_service(&app, put("Merit awards")).await;
        let req = test::TestRequest::get().uri("/api/site-content/scholarships").to_request();
        let first: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(first["title"], "Merit awards");

        test::call_service(&app, put("Need-based aid")).await;
        let req = test::TestRequest::get().uri("/api/site-content/scholarships").to_request();
        let second: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(second["title"], "Need-based aid");
    }
}
