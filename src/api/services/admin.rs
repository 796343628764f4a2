//! Admin pages
//!
//! The only credential is the `admin` cookie checked by [`AccessGate`].
//! Failing the gate is never an error: the login form is shown instead, and
//! `POST /admin/add` bounces back to `/admin` without touching the store.

use std::sync::Arc;

use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use tracing::{info, warn};

use super::{html_response, see_other, templates};
use crate::api::constants::CACHE_NO_STORE;
use crate::config::{AdminConfig, SameSitePolicy, StaticConfig};
use crate::errors::DailyQrError;
use crate::services::{ADMIN_COOKIE_NAME, AccessGate, EnqueueRequest, Scheduler};
use crate::utils::today;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct AddForm {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub private: String,
}

/// Cookie 构建器
pub struct CookieBuilder {
    same_site: SameSite,
    secure: bool,
    max_age_days: u64,
}

impl CookieBuilder {
    pub fn from_config(config: &AdminConfig) -> Self {
        let same_site = match config.cookie_same_site {
            SameSitePolicy::Strict => SameSite::Strict,
            SameSitePolicy::None => SameSite::None,
            SameSitePolicy::Lax => SameSite::Lax,
        };

        Self {
            same_site,
            secure: config.cookie_secure,
            max_age_days: config.cookie_max_age_days,
        }
    }

    fn build_cookie_base(
        &self,
        value: String,
        max_age: actix_web::cookie::time::Duration,
    ) -> Cookie<'static> {
        let mut cookie = Cookie::new(ADMIN_COOKIE_NAME, value);
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_secure(self.secure);
        cookie.set_same_site(self.same_site);
        cookie.set_max_age(max_age);
        cookie
    }

    /// 会话 cookie 直接保存原始密码，每次请求由 gate 重新哈希
    pub fn build_session_cookie(&self, password: String) -> Cookie<'static> {
        self.build_cookie_base(
            password,
            actix_web::cookie::time::Duration::days(self.max_age_days as i64),
        )
    }

    pub fn build_expired_cookie(&self) -> Cookie<'static> {
        self.build_cookie_base(String::new(), actix_web::cookie::time::Duration::ZERO)
    }
}

pub struct AdminService {}

impl AdminService {
    fn is_admin(req: &HttpRequest, gate: &AccessGate) -> bool {
        let cookie = req.cookie(ADMIN_COOKIE_NAME);
        gate.is_authorized(cookie.as_ref().map(|c| c.value()))
    }

    pub async fn handle_admin(
        req: HttpRequest,
        gate: web::Data<AccessGate>,
        scheduler: web::Data<Arc<Scheduler>>,
    ) -> Result<HttpResponse, DailyQrError> {
        if !Self::is_admin(&req, &gate) {
            return Ok(html_response(CACHE_NO_STORE, templates::login_page()));
        }

        let today = today();
        let queue = scheduler.list_queue(today).await?;
        Ok(html_response(
            CACHE_NO_STORE,
            templates::admin_page(&today.format("%Y-%m-%d").to_string(), &queue),
        ))
    }

    pub async fn handle_login(
        form: web::Form<LoginForm>,
        config: web::Data<Arc<StaticConfig>>,
    ) -> HttpResponse {
        let cookie =
            CookieBuilder::from_config(&config.admin).build_session_cookie(form.into_inner().password);

        HttpResponse::SeeOther()
            .cookie(cookie)
            .insert_header((header::LOCATION, "/admin"))
            .insert_header((header::CACHE_CONTROL, CACHE_NO_STORE))
            .finish()
    }

    pub async fn handle_logout(config: web::Data<Arc<StaticConfig>>) -> HttpResponse {
        let cookie = CookieBuilder::from_config(&config.admin).build_expired_cookie();

        HttpResponse::SeeOther()
            .cookie(cookie)
            .insert_header((header::LOCATION, "/admin"))
            .insert_header((header::CACHE_CONTROL, CACHE_NO_STORE))
            .finish()
    }

    pub async fn handle_add(
        req: HttpRequest,
        form: web::Form<AddForm>,
        gate: web::Data<AccessGate>,
        scheduler: web::Data<Arc<Scheduler>>,
    ) -> Result<HttpResponse, DailyQrError> {
        if !Self::is_admin(&req, &gate) {
            warn!("Rejected unauthenticated enqueue");
            return Ok(see_other(CACHE_NO_STORE, "/admin"));
        }

        let form = form.into_inner();
        let entry = scheduler
            .enqueue(
                EnqueueRequest {
                    target: form.url,
                    comment: form.comment,
                    visibility: form.private,
                },
                today(),
            )
            .await?;

        info!("Admin queued entry #{} for {}", entry.id, entry.active_at);
        Ok(see_other(CACHE_NO_STORE, "/admin"))
    }
}

pub fn admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/admin", web::get().to(AdminService::handle_admin))
        .route("/admin/login", web::post().to(AdminService::handle_login))
        .route("/admin/logout", web::post().to(AdminService::handle_logout))
        .route("/admin/add", web::post().to(AdminService::handle_add));
}
