use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::entities::items::{
    InsertItemEntity, InsertItemReportEntity, ItemEntity, UpdateItemChangeset,
};
use crate::value_objects::{enums::item_statuses::ItemStatus, items::ListItemsFilter};

#[async_trait]
#[automock]
pub trait ItemRepository {
    async fn insert(&self, item_entity: InsertItemEntity) -> Result<ItemEntity>;
    async fn find_by_id(&self, item_id: Uuid) -> Result<Option<ItemEntity>>;
    async fn list(&self, filter: &ListItemsFilter) -> Result<Vec<ItemEntity>>;
    async fn update(&self, item_id: Uuid, changes: UpdateItemChangeset) -> Result<ItemEntity>;
    async fn delete(&self, item_id: Uuid) -> Result<()>;
    async fn set_status(&self, item_id: Uuid, status: ItemStatus) -> Result<()>;
    async fn has_reported(&self, item_id: Uuid, reporter_id: Uuid) -> Result<bool>;
    /// Inserts the report and bumps the item's counter in one transaction.
    async fn insert_report(&self, report_entity: InsertItemReportEntity) -> Result<()>;
    /// Returns whether the item is liked by the user after the toggle.
    async fn toggle_like(&self, item_id: Uuid, user_id: Uuid) -> Result<bool>;
    async fn list_reported(&self, min_reports: i32) -> Result<Vec<ItemEntity>>;
}
