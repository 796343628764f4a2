//! Redirect routes
//!
//! `/` sends visitors to whatever is live today; `/l/{id}` is the URL baked
//! into each QR code and forwards to the entry's target.

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use tracing::{error, trace};

use super::{path_id, see_other};
use crate::api::constants::{CACHE_IMMUTABLE, CACHE_SHORT};
use crate::errors::DailyQrError;
use crate::services::Scheduler;
use crate::utils::today;

pub struct RedirectService {}

impl RedirectService {
    pub async fn handle_index(
        scheduler: web::Data<Arc<Scheduler>>,
    ) -> Result<HttpResponse, DailyQrError> {
        let entry = scheduler.resolve_active(today()).await?;
        trace!("Today's entry is #{}", entry.id);
        Ok(see_other(CACHE_SHORT, &format!("/{}", entry.id)))
    }

    pub async fn handle_link(
        path: web::Path<String>,
        scheduler: web::Data<Arc<Scheduler>>,
    ) -> Result<HttpResponse, DailyQrError> {
        let id = path_id(&path)?;
        let entry = scheduler.resolve_by_id(id, today()).await?;

        match entry.target.as_deref() {
            Some(target) => Ok(see_other(CACHE_IMMUTABLE, target)),
            None => {
                error!("Entry #{} has no target", entry.id);
                Err(DailyQrError::database_operation(format!(
                    "entry {} has no target",
                    entry.id
                )))
            }
        }
    }
}

pub fn redirect_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(RedirectService::handle_index))
        .route("/l/{id}", web::get().to(RedirectService::handle_link));
}
