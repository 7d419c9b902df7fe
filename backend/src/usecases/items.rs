use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::{
    entities::items::{InsertItemEntity, InsertItemReportEntity, ItemEntity, UpdateItemChangeset},
    repositories::items::ItemRepository,
    value_objects::{
        enums::item_statuses::ItemStatus,
        items::{InsertItemModel, ListItemsFilter, ReportItemModel, UpdateItemModel},
    },
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::axum_http::error_responses::AppError;

#[derive(Debug, Clone, Serialize)]
pub struct ItemDto {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price_minor: i32,
    pub status: String,
    pub likes_count: i32,
    pub reports_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ItemEntity> for ItemDto {
    fn from(entity: ItemEntity) -> Self {
        Self {
            id: entity.id,
            seller_id: entity.seller_id,
            title: entity.title,
            description: entity.description,
            category: entity.category,
            price_minor: entity.price_minor,
            status: entity.status,
            likes_count: entity.likes_count,
            reports_count: entity.reports_count,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LikeDto {
    pub liked: bool,
}

pub struct ItemUseCase<T>
where
    T: ItemRepository + Send + Sync + 'static,
{
    item_repository: Arc<T>,
}

impl<T> ItemUseCase<T>
where
    T: ItemRepository + Send + Sync + 'static,
{
    pub fn new(item_repository: Arc<T>) -> Self {
        Self { item_repository }
    }

    pub async fn create(&self, seller_id: Uuid, model: InsertItemModel) -> Result<ItemDto, AppError> {
        if model.title.trim().is_empty() {
            return Err(AppError::BadRequest("Title is required".to_string()));
        }
        if model.price_minor <= 0 {
            return Err(AppError::BadRequest("Price must be positive".to_string()));
        }

        let now = Utc::now();
        let item = self
            .item_repository
            .insert(InsertItemEntity {
                seller_id,
                title: model.title.trim().to_string(),
                description: model.description,
                category: model.category,
                price_minor: model.price_minor,
                status: ItemStatus::Available.to_string(),
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(item_id = %item.id, %seller_id, "items: listed");
        Ok(ItemDto::from(item))
    }

    pub async fn get(&self, item_id: Uuid) -> Result<ItemDto, AppError> {
        let item = self.find_existing(item_id).await?;
        Ok(ItemDto::from(item))
    }

    pub async fn list(&self, filter: ListItemsFilter) -> Result<Vec<ItemDto>, AppError> {
        let items = self.item_repository.list(&filter).await?;
        Ok(items.into_iter().map(ItemDto::from).collect())
    }

    pub async fn update(
        &self,
        item_id: Uuid,
        caller_id: Uuid,
        model: UpdateItemModel,
    ) -> Result<ItemDto, AppError> {
        let item = self.find_existing(item_id).await?;
        if item.seller_id != caller_id {
            return Err(AppError::Forbidden(
                "Only the seller can update this listing".to_string(),
            ));
        }
        if item.status == ItemStatus::Sold.to_string() {
            return Err(AppError::BadRequest(
                "Sold listings can no longer be edited".to_string(),
            ));
        }
        if let Some(price_minor) = model.price_minor {
            if price_minor <= 0 {
                return Err(AppError::BadRequest("Price must be positive".to_string()));
            }
        }

        let updated = self
            .item_repository
            .update(
                item_id,
                UpdateItemChangeset {
                    title: model.title,
                    description: model.description,
                    category: model.category,
                    price_minor: model.price_minor,
                    updated_at: Utc::now(),
                },
            )
            .await?;

        Ok(ItemDto::from(updated))
    }

    pub async fn delete(&self, item_id: Uuid, caller_id: Uuid) -> Result<(), AppError> {
        let item = self.find_existing(item_id).await?;
        if item.seller_id != caller_id {
            return Err(AppError::Forbidden(
                "Only the seller can delete this listing".to_string(),
            ));
        }
        if item.status == ItemStatus::Reserved.to_string()
            || item.status == ItemStatus::Sold.to_string()
        {
            return Err(AppError::Conflict(
                "Listings with an order in progress cannot be deleted".to_string(),
            ));
        }

        self.item_repository.delete(item_id).await?;
        info!(%item_id, "items: deleted");
        Ok(())
    }

    pub async fn report(
        &self,
        item_id: Uuid,
        reporter_id: Uuid,
        model: ReportItemModel,
    ) -> Result<(), AppError> {
        if model.reason.trim().is_empty() {
            return Err(AppError::BadRequest("A reason is required".to_string()));
        }

        let item = self.find_existing(item_id).await?;
        if item.seller_id == reporter_id {
            return Err(AppError::BadRequest(
                "You cannot report your own listing".to_string(),
            ));
        }
        if self.item_repository.has_reported(item_id, reporter_id).await? {
            return Err(AppError::BadRequest(
                "You have already reported this item".to_string(),
            ));
        }

        self.item_repository
            .insert_report(InsertItemReportEntity {
                item_id,
                reporter_id,
                reason: model.reason.trim().to_string(),
                created_at: Utc::now(),
            })
            .await?;

        info!(%item_id, %reporter_id, "items: reported");
        Ok(())
    }

    pub async fn toggle_like(&self, item_id: Uuid, user_id: Uuid) -> Result<LikeDto, AppError> {
        self.find_existing(item_id).await?;
        let liked = self.item_repository.toggle_like(item_id, user_id).await?;
        Ok(LikeDto { liked })
    }

    async fn find_existing(&self, item_id: Uuid) -> Result<ItemEntity, AppError> {
        self.item_repository
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Item not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::repositories::items::MockItemRepository;
    use mockall::predicate::eq;

    fn sample_item(seller_id: Uuid, status: ItemStatus) -> ItemEntity {
        let now = Utc::now();
        ItemEntity {
            id: Uuid::new_v4(),
            seller_id,
            title: "Desk lamp".to_string(),
            description: "Barely used".to_string(),
            category: "furniture".to_string(),
            price_minor: 45000,
            status: status.to_string(),
            reserved_by: None,
            reserved_at: None,
            sold_to: None,
            sold_at: None,
            likes_count: 0,
            reports_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn create_rejects_non_positive_price() {
        let item_repo = MockItemRepository::new();
        let usecase = ItemUseCase::new(Arc::new(item_repo));

        let result = usecase
            .create(
                Uuid::new_v4(),
                InsertItemModel {
                    title: "Desk lamp".to_string(),
                    description: String::new(),
                    category: "furniture".to_string(),
                    price_minor: 0,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn update_requires_ownership() {
        let seller_id = Uuid::new_v4();
        let item = sample_item(seller_id, ItemStatus::Available);
        let item_id = item.id;

        let mut item_repo = MockItemRepository::new();
        item_repo
            .expect_find_by_id()
            .with(eq(item_id))
            .returning(move |_| {
                let item = item.clone();
                Box::pin(async move { Ok(Some(item)) })
            });

        let usecase = ItemUseCase::new(Arc::new(item_repo));
        let result = usecase
            .update(item_id, Uuid::new_v4(), UpdateItemModel::default())
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn delete_rejects_reserved_item() {
        let seller_id = Uuid::new_v4();
        let item = sample_item(seller_id, ItemStatus::Reserved);
        let item_id = item.id;

        let mut item_repo = MockItemRepository::new();
        item_repo.expect_find_by_id().returning(move |_| {
            let item = item.clone();
            Box::pin(async move { Ok(Some(item)) })
        });

        let usecase = ItemUseCase::new(Arc::new(item_repo));
        let result = usecase.delete(item_id, seller_id).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn report_rejects_duplicate() {
        let seller_id = Uuid::new_v4();
        let reporter_id = Uuid::new_v4();
        let item = sample_item(seller_id, ItemStatus::Available);
        let item_id = item.id;

        let mut item_repo = MockItemRepository::new();
        item_repo.expect_find_by_id().returning(move |_| {
            let item = item.clone();
            Box::pin(async move { Ok(Some(item)) })
        });
        item_repo
            .expect_has_reported()
            .with(eq(item_id), eq(reporter_id))
            .returning(|_, _| Box::pin(async { Ok(true) }));

        let usecase = ItemUseCase::new(Arc::new(item_repo));
        let result = usecase
            .report(
                item_id,
                reporter_id,
                ReportItemModel {
                    reason: "spam".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn report_rejects_own_listing() {
        let seller_id = Uuid::new_v4();
        let item = sample_item(seller_id, ItemStatus::Available);
        let item_id = item.id;

        let mut item_repo = MockItemRepository::new();
        item_repo.expect_find_by_id().returning(move |_| {
            let item = item.clone();
            Box::pin(async move { Ok(Some(item)) })
        });

        let usecase = ItemUseCase::new(Arc::new(item_repo));
        let result = usecase
            .report(
                item_id,
                seller_id,
                ReportItemModel {
                    reason: "spam".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
