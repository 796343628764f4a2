//! Daily scheduling service
//!
//! Every entry owns exactly one calendar day. New entries are appended the
//! day after the most recent one; a schedule that fell behind restarts at
//! today instead of filling the gap. Reads resolve "what is live" lazily from
//! the day passed in, there is no timer.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use tracing::{debug, error, info};

use crate::errors::{DailyQrError, Result};
use crate::storage::{Entry, NewEntry, SeaOrmStorage};
use crate::utils::url_validator::validate_url;

/// Day for a new entry given the most recently created entry's day.
///
/// - empty store: `today`
/// - otherwise the day after `latest`, but never before `today`
pub fn next_activation_day(latest: Option<NaiveDate>, today: NaiveDate) -> Result<NaiveDate> {
    let Some(latest) = latest else {
        return Ok(today);
    };

    let next = latest
        .checked_add_days(Days::new(1))
        .ok_or_else(|| DailyQrError::validation(format!("no day after {}", latest)))?;

    // 不回填空档
    Ok(next.max(today))
}

/// Request to queue a new entry
#[derive(Debug, Clone, Default)]
pub struct EnqueueRequest {
    pub target: String,
    pub comment: String,
    pub visibility: String,
}

pub struct Scheduler {
    storage: Arc<SeaOrmStorage>,
}

impl Scheduler {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// The entry live on `today`: the exact day, else the latest earlier one.
    ///
    /// An empty history is unrecoverable and reported as `NothingScheduled`.
    pub async fn resolve_active(&self, today: NaiveDate) -> Result<Entry> {
        if let Some(entry) = self.storage.find_by_active_at(today).await? {
            return Ok(entry);
        }

        match self.storage.find_latest_before(today).await? {
            Some(entry) => {
                debug!(
                    "No entry for {}, carrying forward #{} from {}",
                    today, entry.id, entry.active_at
                );
                Ok(entry)
            }
            None => {
                error!("No entry has ever been scheduled (today = {})", today);
                Err(DailyQrError::nothing_scheduled(
                    "Sorry, the site is broken real bad.",
                ))
            }
        }
    }

    /// Entry `id`, hidden as not-found until its day has come.
    pub async fn resolve_by_id(&self, id: i64, today: NaiveDate) -> Result<Entry> {
        match self.storage.get(id).await? {
            Some(entry) if entry.is_visible_on(today) => Ok(entry),
            Some(_) => {
                debug!("Entry #{} is scheduled after {}", id, today);
                Err(DailyQrError::not_found(format!("entry {} not found", id)))
            }
            None => Err(DailyQrError::not_found(format!("entry {} not found", id))),
        }
    }

    /// Everything that is or has been live.
    pub async fn list_archive(&self, today: NaiveDate) -> Result<Vec<Entry>> {
        self.storage.list_through(today).await
    }

    /// Everything not yet live.
    pub async fn list_queue(&self, today: NaiveDate) -> Result<Vec<Entry>> {
        self.storage.list_after(today).await
    }

    /// Append a new entry to the schedule.
    pub async fn enqueue(&self, req: EnqueueRequest, today: NaiveDate) -> Result<Entry> {
        let target = req.target.trim();
        validate_url(target).map_err(|e| DailyQrError::validation(e.to_string()))?;

        let draft = NewEntry {
            target: target.to_string(),
            comment: req.comment,
            visibility: req.visibility,
        };

        let entry = self
            .storage
            .append_entry(&draft, |latest| next_activation_day(latest, today))
            .await?;

        info!(
            "Queued entry #{} -> {} for {}",
            entry.id,
            draft.target,
            entry.active_at
        );
        Ok(entry)
    }
}
