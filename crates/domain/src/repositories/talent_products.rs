use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::entities::talent_products::{
    InsertTalentProductEntity, TalentProductEntity, UpdateTalentProductChangeset,
};
use crate::value_objects::{
    enums::talent_statuses::TalentStatus, talent_products::ListTalentProductsFilter,
};

#[async_trait]
#[automock]
pub trait TalentProductRepository {
    async fn insert(&self, entity: InsertTalentProductEntity) -> Result<TalentProductEntity>;
    async fn find_by_id(&self, talent_product_id: Uuid) -> Result<Option<TalentProductEntity>>;
    /// Loads the listing and increments its view counter.
    async fn find_and_bump_views(
        &self,
        talent_product_id: Uuid,
    ) -> Result<Option<TalentProductEntity>>;
    async fn list(&self, filter: &ListTalentProductsFilter) -> Result<Vec<TalentProductEntity>>;
    async fn update(
        &self,
        talent_product_id: Uuid,
        changes: UpdateTalentProductChangeset,
    ) -> Result<TalentProductEntity>;
    async fn set_status(&self, talent_product_id: Uuid, status: TalentStatus) -> Result<()>;
}
