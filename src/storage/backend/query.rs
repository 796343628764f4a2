//! Query operations for SeaOrmStorage
//!
//! Read-only access to the `entries` table. Errors propagate to the caller;
//! nothing here is retried.

use chrono::NaiveDate;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::trace;

use super::SeaOrmStorage;
use super::converters::model_to_entry;
use crate::errors::Result;
use crate::storage::Entry;

use migration::entities::entry;

impl SeaOrmStorage {
    pub async fn get(&self, id: i64) -> Result<Option<Entry>> {
        let model = entry::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(model_to_entry))
    }

    /// 精确匹配某一天
    pub async fn find_by_active_at(&self, day: NaiveDate) -> Result<Option<Entry>> {
        let model = entry::Entity::find()
            .filter(entry::Column::ActiveAt.eq(day))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_entry))
    }

    /// `active_at` 严格早于 `day` 的最近一条
    pub async fn find_latest_before(&self, day: NaiveDate) -> Result<Option<Entry>> {
        let model = entry::Entity::find()
            .filter(entry::Column::ActiveAt.lt(day))
            .order_by_desc(entry::Column::ActiveAt)
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_entry))
    }

    /// id 最大的一条（最近入队）
    pub async fn find_most_recent(&self) -> Result<Option<Entry>> {
        let model = most_recent_model(&self.db).await?;
        Ok(model.map(model_to_entry))
    }

    /// 所有 `active_at <= day` 的条目，按 id 升序
    pub async fn list_through(&self, day: NaiveDate) -> Result<Vec<Entry>> {
        let models = entry::Entity::find()
            .filter(entry::Column::ActiveAt.lte(day))
            .order_by_asc(entry::Column::Id)
            .all(&self.db)
            .await?;
        trace!("list_through({}) -> {} entries", day, models.len());
        Ok(models.into_iter().map(model_to_entry).collect())
    }

    /// 所有 `active_at > day` 的条目，按 id 升序
    pub async fn list_after(&self, day: NaiveDate) -> Result<Vec<Entry>> {
        let models = entry::Entity::find()
            .filter(entry::Column::ActiveAt.gt(day))
            .order_by_asc(entry::Column::Id)
            .all(&self.db)
            .await?;
        trace!("list_after({}) -> {} entries", day, models.len());
        Ok(models.into_iter().map(model_to_entry).collect())
    }
}

/// id 最大的一行，连接或事务均可
pub(super) async fn most_recent_model<C>(conn: &C) -> Result<Option<entry::Model>>
where
    C: ConnectionTrait,
{
    Ok(entry::Entity::find()
        .order_by_desc(entry::Column::Id)
        .one(conn)
        .await?)
}
