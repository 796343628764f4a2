pub mod admin;
pub mod assets;
pub mod images;
pub mod pages;
pub mod redirect;
pub mod seo;
pub mod templates;

pub use admin::{AdminService, CookieBuilder, admin_routes};
pub use assets::{AssetService, asset_routes};
pub use images::{ImageRouteService, image_routes};
pub use pages::{PageService, landing_routes, page_routes};
pub use redirect::{RedirectService, redirect_routes};
pub use seo::{SeoService, seo_routes};

use actix_web::HttpResponse;
use actix_web::http::header;

use crate::errors::DailyQrError;
use crate::utils::parse_entry_id;

/// 路径里的 id 不是十进制整数时按 404 处理
pub(crate) fn path_id(raw: &str) -> Result<i64, DailyQrError> {
    parse_entry_id(raw).ok_or_else(|| DailyQrError::not_found(format!("invalid entry id: {}", raw)))
}

pub(crate) fn html_response(cache_control: &'static str, body: maud::Markup) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, cache_control))
        .content_type("text/html; charset=utf-8")
        .body(body.into_string())
}

pub(crate) fn see_other(cache_control: &'static str, location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .insert_header((header::CACHE_CONTROL, cache_control))
        .finish()
}

/// 未匹配的路由
pub async fn not_found() -> Result<HttpResponse, DailyQrError> {
    Err(DailyQrError::not_found("no such route"))
}
