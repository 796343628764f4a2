use chrono::NaiveDate;

use crate::storage::{Entry, NewEntry};
use migration::entities::entry;

/// 将 Sea-ORM Model 转换为 Entry
pub fn model_to_entry(model: entry::Model) -> Entry {
    Entry {
        id: model.id,
        active_at: model.active_at,
        target: model.target,
        comment: model.comment,
        visibility: model.visibility,
    }
}

/// 将待入队条目转换为 ActiveModel（id 由数据库分配）
pub fn new_entry_to_active_model(draft: &NewEntry, active_at: NaiveDate) -> entry::ActiveModel {
    use sea_orm::ActiveValue::*;

    entry::ActiveModel {
        id: NotSet,
        active_at: Set(active_at),
        target: Set(Some(draft.target.clone())),
        comment: Set(draft.comment.clone()),
        visibility: Set(draft.visibility.clone()),
    }
}
