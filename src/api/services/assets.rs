use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use rust_embed::Embed;
use tracing::{debug, trace};

use crate::api::constants::CACHE_DAY;
use crate::errors::DailyQrError;

// 编译时嵌入 static/ 目录
#[derive(Embed)]
#[folder = "static/"]
struct StaticAssets;

pub struct AssetService;

impl AssetService {
    /// 处理静态资源文件
    pub async fn handle_static(req: HttpRequest) -> Result<HttpResponse, DailyQrError> {
        let path = req.match_info().query("path");
        trace!("Serving static file: {}", path);

        match StaticAssets::get(path) {
            Some(content) => Ok(HttpResponse::Ok()
                .insert_header((header::CACHE_CONTROL, CACHE_DAY))
                .content_type(Self::get_content_type(path))
                .body(content.data.into_owned())),
            None => {
                debug!("Static file not found: {}", path);
                Err(DailyQrError::not_found(format!("static file {}", path)))
            }
        }
    }

    /// 根据文件扩展名确定 Content-Type
    fn get_content_type(path: &str) -> &'static str {
        match path.rsplit('.').next() {
            Some("css") => "text/css; charset=utf-8",
            Some("js") => "application/javascript",
            Some("png") => "image/png",
            Some("ico") => "image/x-icon",
            Some("svg") => "image/svg+xml",
            Some("txt") => "text/plain; charset=utf-8",
            _ => "application/octet-stream",
        }
    }
}

pub fn asset_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/static/{path:.*}", web::get().to(AssetService::handle_static));
}
