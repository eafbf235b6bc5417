use crate::api::shared::ApiError;
use crate::config::AppConfig;
use crate::services::catalog::{NewVideo, VideoCatalog};
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures::TryStreamExt;
use serde::Deserialize;
use serde_json::json;
use std::path::Path;

/// Filename extensions accepted for poster uploads.
const IMAGE_EXTENSIONS: [&str; 9] = [
    "jpg", "jpeg", "png", "svg", "bmp", "tiff", "webp", "eps", "gif",
];

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/videos")
            .route("", web::post().to(upload_video))
            .route("", web::get().to(list_videos))
            .route("/{id}", web::get().to(get_video))
            .route("/{id}/comments", web::post().to(add_comment))
            .route("/{id}/likes", web::put().to(like_video))
            .route("/{id}/views", web::put().to(count_view))
            .route(
                "/{id}/comments/{comment_id}/likes",
                web::put().to(like_comment),
            )
            .route("/{id}/comments/{comment_id}", web::delete().to(delete_comment)),
    );
}

pub async fn list_videos(catalog: web::Data<VideoCatalog>) -> HttpResponse {
    HttpResponse::Ok().json(catalog.list())
}

pub async fn get_video(
    path: web::Path<String>,
    catalog: web::Data<VideoCatalog>,
) -> Result<HttpResponse, ApiError> {
    let video = catalog.get(&path)?;
    Ok(HttpResponse::Ok().json(video))
}

pub async fn upload_video(
    mut payload: Multipart,
    catalog: web::Data<VideoCatalog>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, ApiError> {
    let mut poster_file: Option<(String, Vec<u8>)> = None;
    let mut title = String::new();
    let mut description = String::new();

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field
            .content_disposition()
            .ok_or_else(|| ApiError::bad_request("Malformed form field"))?;
        let field_name = content_disposition
            .get_name()
            .ok_or_else(|| ApiError::bad_request("No field name"))?;

        match field_name {
            "posterImage" => {
                let filename = content_disposition
                    .get_filename()
                    .ok_or_else(|| ApiError::bad_request("No filename"))?
                    .to_owned();

                let mut data = Vec::new();
                while let Some(chunk) = field.try_next().await? {
                    data.extend_from_slice(&chunk);
                }
                poster_file = Some((filename, data));
            }
            "title" => {
                let mut value = String::new();
                while let Some(chunk) = field.try_next().await? {
                    value.push_str(&String::from_utf8_lossy(&chunk));
                }
                title = value;
            }
            "description" => {
                let mut value = String::new();
                while let Some(chunk) = field.try_next().await? {
                    value.push_str(&String::from_utf8_lossy(&chunk));
                }
                description = value;
            }
            _ => {
                // Skip unknown fields
                while (field.try_next().await?).is_some() {}
            }
        }
    }

    let (filename, data) =
        poster_file.ok_or_else(|| ApiError::bad_request("No poster image provided"))?;
    let ext = image_extension(&filename)
        .ok_or_else(|| ApiError::bad_request("Only image files are allowed!"))?;

    let stored_name = catalog.next_poster_filename(&ext);
    let target = Path::new(&config.storage.images_dir).join(&stored_name);
    tokio::fs::write(&target, &data).await.map_err(|e| {
        log::error!("Failed to store poster {}: {}", target.display(), e);
        ApiError::internal("Failed to store the poster image")
    })?;

    let video = catalog.create(NewVideo {
        title,
        description,
        poster: Some(format!("/{stored_name}")),
    })?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Video uploaded successfully",
        "videoId": video.id,
        "imagePath": video.image,
    })))
}

#[derive(Debug, Deserialize)]
pub struct NewComment {
    #[serde(default)]
    name: String,
    #[serde(default)]
    comment: String,
}

pub async fn add_comment(
    path: web::Path<String>,
    body: web::Json<NewComment>,
    catalog: web::Data<VideoCatalog>,
) -> Result<HttpResponse, ApiError> {
    let comment = catalog.add_comment(&path, &body.name, &body.comment)?;
    Ok(HttpResponse::Created().json(comment))
}

pub async fn like_video(
    path: web::Path<String>,
    catalog: web::Data<VideoCatalog>,
) -> Result<HttpResponse, ApiError> {
    let video = catalog.like_video(&path)?;
    Ok(HttpResponse::Ok().json(video))
}

pub async fn count_view(
    path: web::Path<String>,
    catalog: web::Data<VideoCatalog>,
) -> Result<HttpResponse, ApiError> {
    let video = catalog.record_view(&path)?;
    Ok(HttpResponse::Ok().json(video))
}

pub async fn like_comment(
    path: web::Path<(String, String)>,
    catalog: web::Data<VideoCatalog>,
) -> Result<HttpResponse, ApiError> {
    let (video_id, comment_id) = path.into_inner();
    let likes = catalog.like_comment(&video_id, &comment_id)?;
    Ok(HttpResponse::Ok().json(json!({ "likes": likes })))
}

pub async fn delete_comment(
    path: web::Path<(String, String)>,
    catalog: web::Data<VideoCatalog>,
) -> Result<HttpResponse, ApiError> {
    let (video_id, comment_id) = path.into_inner();
    catalog.delete_comment(&video_id, &comment_id)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Lowercased extension of an accepted image filename, or `None` when the
/// file is not one of the allowed image types.
fn image_extension(filename: &str) -> Option<String> {
    let ext = Path::new(filename).extension()?.to_str()?.to_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}
