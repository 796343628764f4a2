//! sitemap.xml and robots.txt

use std::sync::Arc;

use actix_web::http::header;
use actix_web::{HttpResponse, web};

use super::templates;
use crate::api::constants::{CACHE_DAY, CACHE_SHORT};
use crate::config::StaticConfig;
use crate::errors::DailyQrError;
use crate::services::Scheduler;
use crate::utils::today;

pub struct SeoService {}

impl SeoService {
    pub async fn handle_sitemap(
        scheduler: web::Data<Arc<Scheduler>>,
        config: web::Data<Arc<StaticConfig>>,
    ) -> Result<HttpResponse, DailyQrError> {
        let entries = scheduler.list_archive(today()).await?;
        let xml = templates::sitemap(&entries, config.server.base_url());

        Ok(HttpResponse::Ok()
            .insert_header((header::CACHE_CONTROL, CACHE_SHORT))
            .content_type("application/xml; charset=utf-8")
            .body(xml.into_string()))
    }

    pub async fn handle_robots(config: web::Data<Arc<StaticConfig>>) -> HttpResponse {
        HttpResponse::Ok()
            .insert_header((header::CACHE_CONTROL, CACHE_DAY))
            .content_type("text/plain; charset=utf-8")
            .body(templates::robots_txt(config.server.base_url()))
    }
}

pub fn seo_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/sitemap.xml", web::get().to(SeoService::handle_sitemap))
        .route("/robots.txt", web::get().to(SeoService::handle_robots));
}
