use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use futures_util::StreamExt;
use serde::Serialize;

use super::require_admin;
use crate::AppState;

const DEFAULT_FOLDER: &str = "images";
const MAX_FOLDER_FIELD: usize = 256;

#[derive(Serialize)]
struct UploadResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl UploadResponse {
    fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            url: None,
            path: None,
            error: Some(msg.into()),
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/upload").route(web::post().to(upload)));
}

/// Only images and videos are accepted.
fn is_allowed_media(content_type: &str) -> bool {
    let ct = content_type.to_ascii_lowercase();
    ct.starts_with("image/") || ct.starts_with("video/")
}

/// Extension for the stored name: the original one when it looks sane,
/// otherwise the MIME subtype (`image/svg+xml` -> `svg`).
fn pick_extension(original_name: Option<&str>, content_type: &str) -> String {
    let sane = |ext: &str| {
        !ext.is_empty() && ext.len() <= 10 && ext.chars().all(|c| c.is_ascii_alphanumeric())
    };
    if let Some(ext) = original_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| sane(ext.as_str()))
    {
        return ext;
    }
    let subtype = content_type
        .split('/')
        .nth(1)
        .unwrap_or("")
        .split(|c: char| c == '+' || c == ';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    match subtype.as_str() {
        "jpeg" => "jpg".to_string(),
        "quicktime" => "mov".to_string(),
        s if sane(s) => s.to_string(),
        _ => "bin".to_string(),
    }
}

async fn upload(state: web::Data<AppState>, req: HttpRequest, mut payload: Multipart) -> impl Responder {
    if let Err(resp) = require_admin(&state, &req) {
        return resp;
    }

    let max_bytes = state.config.max_upload_bytes;
    let mut file: Option<(Vec<u8>, String, Option<String>)> = None;
    let mut folder: Option<String> = None;

    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(field) => field,
            Err(e) => {
                return HttpResponse::BadRequest()
                    .json(UploadResponse::error(format!("Failed to process multipart: {}", e)));
            }
        };

        let field_name = field.name().to_string();
        match field_name.as_str() {
            "file" => {
                let content_type = field
                    .content_type()
                    .map(|ct| ct.to_string())
                    .unwrap_or_default();
                if !is_allowed_media(&content_type) {
                    log::warn!("[UPLOAD] Rejected file with type '{}'", content_type);
                    return HttpResponse::BadRequest()
                        .json(UploadResponse::error("Only image and video files are allowed"));
                }
                let filename = field.content_disposition().get_filename().map(|s| s.to_string());

                let mut data = Vec::new();
                while let Some(chunk) = field.next().await {
                    match chunk {
                        Ok(bytes) => {
                            data.extend_from_slice(&bytes);
                            if data.len() > max_bytes {
                                return HttpResponse::PayloadTooLarge().json(UploadResponse::error(
                                    format!("File exceeds {}MB limit", max_bytes / (1024 * 1024)),
                                ));
                            }
                        }
                        Err(e) => {
                            return HttpResponse::BadRequest()
                                .json(UploadResponse::error(format!("Failed to read file: {}", e)));
                        }
                    }
                }
                file = Some((data, content_type, filename));
            }
            "folder" => {
                let mut raw = Vec::new();
                while let Some(chunk) = field.next().await {
                    match chunk {
                        Ok(bytes) => {
                            raw.extend_from_slice(&bytes);
                            if raw.len() > MAX_FOLDER_FIELD {
                                return HttpResponse::BadRequest()
                                    .json(UploadResponse::error("Folder name is too long"));
                            }
                        }
                        Err(e) => {
                            return HttpResponse::BadRequest()
                                .json(UploadResponse::error(format!("Failed to read folder: {}", e)));
                        }
                    }
                }
                folder = Some(String::from_utf8_lossy(&raw).trim().to_string());
            }
            _ => {}
        }
    }

    let Some((data, content_type, filename)) = file else {
        return HttpResponse::BadRequest().json(UploadResponse::error("No file provided"));
    };
    if data.is_empty() {
        return HttpResponse::BadRequest().json(UploadResponse::error("Uploaded file is empty"));
    }

    let folder = folder
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| DEFAULT_FOLDER.to_string());
    let stored_name = format!(
        "{}.{}",
        uuid::Uuid::new_v4(),
        pick_extension(filename.as_deref(), &content_type)
    );

    match state.actions.store.put(&folder, &stored_name, data).await {
        Ok(object) => {
            log::info!("[UPLOAD] Stored {} as {}", filename.as_deref().unwrap_or("upload"), object.path);
            HttpResponse::Ok().json(UploadResponse {
                success: true,
                url: Some(object.url),
                path: Some(object.path),
                error: None,
            })
        }
        Err(e) if e.is_validation() => HttpResponse::BadRequest().json(UploadResponse::error(e.to_string())),
        Err(e) => {
            log::error!("[UPLOAD] Failed to store upload: {}", e);
            HttpResponse::InternalServerError().json(UploadResponse::error(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::test_support::{admin_header, test_state};
    use crate::mail::test_support::FakeMailer;
    use actix_web::{test, App};
    use serde_json::Value;

    const BOUNDARY: &str = "----campusboundary";

    fn multipart_body(folder: Option<&str>, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        if let Some(folder) = folder {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"folder\"\r\n\r\n{}\r\n",
                    BOUNDARY, folder
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, filename, content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    fn upload_request(auth: (&'static str, String), body: Vec<u8>) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/api/upload")
            .insert_header(auth)
            .insert_header((
                "Content-Type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(body)
    }

    #[actix_web::test]
    async fn test_pick_extension() {
        assert_eq!(pick_extension(Some("Campus Photo.JPG"), "image/jpeg"), "jpg");
        assert_eq!(pick_extension(Some("no-extension"), "image/svg+xml"), "svg");
        assert_eq!(pick_extension(None, "video/quicktime"), "mov");
        assert_eq!(pick_extension(Some("weird.p@ng"), "image/png"), "png");
    }

    #[actix_web::test]
    async fn test_image_is_stored_under_folder() {
        let (_dir, state, _) = test_state(FakeMailer::ok());
        let app = test::init_service(App::new().app_data(state.clone()).configure(config)).await;
        let body = multipart_body(Some("news-images"), "hall.png", "image/png", b"\x89PNG fake");
        let resp: Value =
            test::call_and_read_body_json(&app, upload_request(admin_header(&state), body).to_request()).await;

        assert_eq!(resp["success"], true);
        let path = resp["path"].as_str().unwrap();
        assert!(path.starts_with("news-images/") && path.ends_with(".png"), "{}", path);
        assert_eq!(resp["url"].as_str().unwrap(), format!("/media/{}", path));
        assert!(state.config.media_dir.join(path).exists());
    }

    #[actix_web::test]
    async fn test_non_media_type_is_rejected_and_nothing_stored() {
        let (_dir, state, _) = test_state(FakeMailer::ok());
        let app = test::init_service(App::new().app_data(state.clone()).configure(config)).await;
        let body = multipart_body(None, "notes.pdf", "application/pdf", b"%PDF-1.7");
        let resp = test::call_service(&app, upload_request(admin_header(&state), body).to_request()).await;

        assert_eq!(resp.status(), 400);
        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json["success"], false);
        assert!(!state.config.media_dir.exists());
    }

    #[actix_web::test]
    async fn test_oversize_upload_is_413() {
        let (_dir, state, _) = test_state(FakeMailer::ok());
        let app = test::init_service(App::new().app_data(state.clone()).configure(config)).await;
        let big = vec![0u8; state.config.max_upload_bytes + 1];
        let body = multipart_body(None, "clip.mp4", "video/mp4", &big);
        let resp = test::call_service(&app, upload_request(admin_header(&state), body).to_request()).await;
        assert_eq!(resp.status(), 413);
    }
}
