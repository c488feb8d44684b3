use actix_files::NamedFile;
use actix_web::{web, HttpRequest, HttpResponse};

use crate::error::ActionResponse;
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/media/{path:.*}").route(web::get().to(serve_media)));
}

/// Reject empty, hidden, or parent-directory segments before touching the disk.
fn is_safe_relative_path(path: &str) -> bool {
    !path.is_empty()
        && !path.contains('\\')
        && path
            .split('/')
            .all(|segment| !segment.is_empty() && !segment.starts_with('.'))
}

/// Serve a stored upload. Content type comes from the file extension.
async fn serve_media(state: web::Data<AppState>, req: HttpRequest, path: web::Path<String>) -> HttpResponse {
    let relative = path.into_inner();
    if !is_safe_relative_path(&relative) {
        return HttpResponse::BadRequest().json(ActionResponse::failure("Invalid path"));
    }

    let root = &state.config.media_dir;
    let not_found = || HttpResponse::NotFound().json(ActionResponse::failure("File not found"));

    let canonical_root = match root.canonicalize() {
        Ok(p) => p,
        Err(_) => return not_found(),
    };
    let canonical_file = match root.join(&relative).canonicalize() {
        Ok(p) => p,
        Err(_) => return not_found(),
    };
    if !canonical_file.starts_with(&canonical_root) {
        return HttpResponse::Forbidden().json(ActionResponse::failure("Access denied"));
    }
    if !canonical_file.is_file() {
        return not_found();
    }

    match NamedFile::open_async(&canonical_file).await {
        Ok(file) => file.into_response(&req),
        Err(e) => {
            log::error!("[MEDIA] Failed to open {}: {}", relative, e);
            not_found()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::test_support::test_state;
    use crate::mail::test_support::FakeMailer;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_is_safe_relative_path() {
        assert!(is_safe_relative_path("news-images/a.png"));
        assert!(!is_safe_relative_path("../secrets.env"));
        assert!(!is_safe_relative_path("news-images/.hidden"));
        assert!(!is_safe_relative_path("a//b.png"));
        assert!(!is_safe_relative_path(""));
    }

    #[actix_web::test]
    async fn test_serves_stored_file_with_content_type() {
        let (_dir, state, _) = test_state(FakeMailer::ok());
        let folder = state.config.media_dir.join("careers");
        std::fs::create_dir_all(&folder).unwrap();
        std::fs::write(folder.join("banner.png"), b"png-bytes").unwrap();

        let app = test::init_service(App::new().app_data(state.clone()).configure(config)).await;
        let req = test::TestRequest::get().uri("/media/careers/banner.png").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert_eq!(resp.headers().get("content-type").unwrap(), "image/png");
        assert_eq!(test::read_body(resp).await.as_ref(), b"png-bytes");

        let req = test::TestRequest::get().uri("/media/careers/missing.png").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);
    }
}
