//! Mutation operations for SeaOrmStorage
//!
//! Entries are append-only: the only write is [`SeaOrmStorage::append_entry`].

use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, SqlErr, TransactionTrait};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::{model_to_entry, new_entry_to_active_model};
use super::query::most_recent_model;
use crate::errors::{DailyQrError, Result};
use crate::storage::{Entry, NewEntry};

impl SeaOrmStorage {
    /// Insert `draft` on the day chosen by `schedule`.
    ///
    /// `schedule` receives the `active_at` of the entry with the greatest id
    /// (or `None` for an empty table). The lookup and the insert share one
    /// transaction; the unique index on `active_at` rejects a day that a
    /// concurrent writer booked first.
    pub async fn append_entry<F>(&self, draft: &NewEntry, schedule: F) -> Result<Entry>
    where
        F: FnOnce(Option<NaiveDate>) -> Result<NaiveDate>,
    {
        let txn =
            self.db.begin().await.map_err(|e| {
                DailyQrError::database_operation(format!("开始事务失败: {}", e))
            })?;

        let latest = most_recent_model(&txn).await?;

        // 出错时 txn 被 drop，自动回滚
        let active_at = schedule(latest.map(|m| m.active_at))?;

        let model = new_entry_to_active_model(draft, active_at)
            .insert(&txn)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => DailyQrError::database_operation(
                    format!("{} 已被其他条目占用", active_at),
                ),
                _ => DailyQrError::database_operation(format!("插入条目失败: {}", e)),
            })?;

        txn.commit()
            .await
            .map_err(|e| DailyQrError::database_operation(format!("提交事务失败: {}", e)))?;

        info!("Entry {} scheduled for {}", model.id, model.active_at);
        Ok(model_to_entry(model))
    }
}
