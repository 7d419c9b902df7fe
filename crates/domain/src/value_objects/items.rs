use serde::Deserialize;
use uuid::Uuid;

use crate::value_objects::enums::{item_statuses::ItemStatus, sort_order::SortOrder};

#[derive(Debug, Clone, Deserialize)]
pub struct InsertItemModel {
    pub title: String,
    pub description: String,
    pub category: String,
    pub price_minor: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateItemModel {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price_minor: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportItemModel {
    pub reason: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListItemsFilter {
    pub category: Option<String>,
    pub status: Option<ItemStatus>,
    pub seller_id: Option<Uuid>,
    /// Case-insensitive substring match on the title.
    pub search: Option<String>,
    #[serde(default)]
    pub sort_order: SortOrder,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
