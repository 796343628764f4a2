//! Public HTML pages

use std::sync::Arc;

use actix_web::{HttpResponse, web};

use super::{html_response, path_id, templates};
use crate::api::constants::{CACHE_IMMUTABLE, CACHE_SHORT};
use crate::config::StaticConfig;
use crate::errors::DailyQrError;
use crate::services::Scheduler;
use crate::utils::today;

pub struct PageService {}

impl PageService {
    /// `/{id}`: landing page of a live entry
    pub async fn handle_landing(
        path: web::Path<String>,
        scheduler: web::Data<Arc<Scheduler>>,
        config: web::Data<Arc<StaticConfig>>,
    ) -> Result<HttpResponse, DailyQrError> {
        let id = path_id(&path)?;
        let entry = scheduler.resolve_by_id(id, today()).await?;

        Ok(html_response(
            CACHE_IMMUTABLE,
            templates::landing_page(&entry, config.server.base_url()),
        ))
    }

    pub async fn handle_about(
        config: web::Data<Arc<StaticConfig>>,
    ) -> Result<HttpResponse, DailyQrError> {
        Ok(html_response(
            CACHE_IMMUTABLE,
            templates::about_page(config.server.base_url()),
        ))
    }

    pub async fn handle_archive(
        scheduler: web::Data<Arc<Scheduler>>,
    ) -> Result<HttpResponse, DailyQrError> {
        let entries = scheduler.list_archive(today()).await?;
        Ok(html_response(CACHE_SHORT, templates::archive_page(&entries)))
    }
}

/// `/{id}` 会匹配任意单段路径，必须最后注册
pub fn page_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/about", web::get().to(PageService::handle_about))
        .route("/archive", web::get().to(PageService::handle_archive));
}

pub fn landing_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{id}", web::get().to(PageService::handle_landing));
}
