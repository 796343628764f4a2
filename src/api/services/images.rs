//! QR image routes

use std::sync::Arc;

use actix_web::http::header;
use actix_web::{HttpResponse, web};

use super::path_id;
use crate::api::constants::CACHE_IMMUTABLE;
use crate::errors::DailyQrError;
use crate::services::qr_image::{LARGE_SCALE, THUMBNAIL_SCALE};
use crate::services::{ImageService, Scheduler};
use crate::utils::today;

pub struct ImageRouteService {}

impl ImageRouteService {
    pub async fn handle_thumbnail(
        path: web::Path<String>,
        scheduler: web::Data<Arc<Scheduler>>,
        images: web::Data<Arc<ImageService>>,
    ) -> Result<HttpResponse, DailyQrError> {
        Self::serve(&path, THUMBNAIL_SCALE, &scheduler, &images).await
    }

    pub async fn handle_large(
        path: web::Path<String>,
        scheduler: web::Data<Arc<Scheduler>>,
        images: web::Data<Arc<ImageService>>,
    ) -> Result<HttpResponse, DailyQrError> {
        Self::serve(&path, LARGE_SCALE, &scheduler, &images).await
    }

    async fn serve(
        raw_id: &str,
        scale: u32,
        scheduler: &Scheduler,
        images: &ImageService,
    ) -> Result<HttpResponse, DailyQrError> {
        let id = path_id(raw_id)?;
        // 未生效的条目不出图，避免提前泄露
        let entry = scheduler.resolve_by_id(id, today()).await?;
        let png = images.png_for(entry.id, scale).await?;

        Ok(HttpResponse::Ok()
            .insert_header((header::CACHE_CONTROL, CACHE_IMMUTABLE))
            .content_type("image/png")
            .body(png))
    }
}

pub fn image_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/img/{id}", web::get().to(ImageRouteService::handle_thumbnail))
        .route("/large/{id}", web::get().to(ImageRouteService::handle_large));
}
