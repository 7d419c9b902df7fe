use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::{item_likes, item_reports, items};

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = items)]
pub struct ItemEntity {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price_minor: i32,
    pub status: String,
    pub reserved_by: Option<Uuid>,
    pub reserved_at: Option<DateTime<Utc>>,
    pub sold_to: Option<Uuid>,
    pub sold_at: Option<DateTime<Utc>>,
    pub likes_count: i32,
    pub reports_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = items)]
pub struct InsertItemEntity {
    pub seller_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price_minor: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = items)]
pub struct UpdateItemChangeset {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price_minor: Option<i32>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = item_reports)]
pub struct ItemReportEntity {
    pub id: Uuid,
    pub item_id: Uuid,
    pub reporter_id: Uuid,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = item_reports)]
pub struct InsertItemReportEntity {
    pub item_id: Uuid,
    pub reporter_id: Uuid,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = item_likes)]
pub struct InsertItemLikeEntity {
    pub item_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}
