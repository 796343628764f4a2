//! HTTP surface
//!
//! Route registration order matters: `/{id}` matches any single segment, so
//! it goes last.

pub mod constants;
pub mod middleware;
pub mod services;

use actix_web::web;

use services::{
    admin_routes, asset_routes, image_routes, landing_routes, page_routes, redirect_routes,
    seo_routes,
};

/// 注册全部路由
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(asset_routes)
        .configure(seo_routes)
        .configure(admin_routes)
        .configure(page_routes)
        .configure(image_routes)
        .configure(redirect_routes)
        .configure(landing_routes)
        .default_service(web::to(services::not_found));
}
