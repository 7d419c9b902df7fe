use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::entities::{items::ItemEntity, talent_products::TalentProductEntity};

#[async_trait]
#[automock]
pub trait WishlistRepository {
    /// Returns false when the entry already existed.
    async fn add_item(&self, user_id: Uuid, item_id: Uuid) -> Result<bool>;
    async fn remove_item(&self, user_id: Uuid, item_id: Uuid) -> Result<bool>;
    async fn add_talent_product(&self, user_id: Uuid, talent_product_id: Uuid) -> Result<bool>;
    async fn remove_talent_product(
        &self,
        user_id: Uuid,
        talent_product_id: Uuid,
    ) -> Result<bool>;
    async fn list_items(&self, user_id: Uuid) -> Result<Vec<ItemEntity>>;
    async fn list_talent_products(&self, user_id: Uuid) -> Result<Vec<TalentProductEntity>>;
}
