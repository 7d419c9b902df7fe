use std::sync::Arc;

use domain::repositories::{
    items::ItemRepository, talent_products::TalentProductRepository,
    wishlists::WishlistRepository,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    axum_http::error_responses::AppError,
    usecases::{items::ItemDto, talent_products::TalentProductDto},
};

#[derive(Debug, Serialize)]
pub struct WishlistDto {
    pub items: Vec<ItemDto>,
    pub talent_products: Vec<TalentProductDto>,
}

pub struct WishlistUseCase<W, I, T>
where
    W: WishlistRepository + Send + Sync + 'static,
    I: ItemRepository + Send + Sync + 'static,
    T: TalentProductRepository + Send + Sync + 'static,
{
    wishlist_repository: Arc<W>,
    item_repository: Arc<I>,
    talent_product_repository: Arc<T>,
}

impl<W, I, T> WishlistUseCase<W, I, T>
where
    W: WishlistRepository + Send + Sync + 'static,
    I: ItemRepository + Send + Sync + 'static,
    T: TalentProductRepository + Send + Sync + 'static,
{
    pub fn new(
        wishlist_repository: Arc<W>,
        item_repository: Arc<I>,
        talent_product_repository: Arc<T>,
    ) -> Self {
        Self {
            wishlist_repository,
            item_repository,
            talent_product_repository,
        }
    }

    pub async fn get(&self, user_id: Uuid) -> Result<WishlistDto, AppError> {
        let items = self.wishlist_repository.list_items(user_id).await?;
        let talent_products = self
            .wishlist_repository
            .list_talent_products(user_id)
            .await?;

        Ok(WishlistDto {
            items: items.into_iter().map(ItemDto::from).collect(),
            talent_products: talent_products
                .into_iter()
                .map(TalentProductDto::from)
                .collect(),
        })
    }

    pub async fn add_item(&self, user_id: Uuid, item_id: Uuid) -> Result<(), AppError> {
        self.item_repository
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Item not found".to_string()))?;

        if !self.wishlist_repository.add_item(user_id, item_id).await? {
            return Err(AppError::Conflict(
                "Item is already in your wishlist".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn remove_item(&self, user_id: Uuid, item_id: Uuid) -> Result<(), AppError> {
        if !self.wishlist_repository.remove_item(user_id, item_id).await? {
            return Err(AppError::NotFound(
                "Item is not in your wishlist".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn add_talent_product(
        &self,
        user_id: Uuid,
        talent_product_id: Uuid,
    ) -> Result<(), AppError> {
        self.talent_product_repository
            .find_by_id(talent_product_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Talent listing not found".to_string()))?;

        if !self
            .wishlist_repository
            .add_talent_product(user_id, talent_product_id)
            .await?
        {
            return Err(AppError::Conflict(
                "Talent listing is already in your wishlist".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn remove_talent_product(
        &self,
        user_id: Uuid,
        talent_product_id: Uuid,
    ) -> Result<(), AppError> {
        if !self
            .wishlist_repository
            .remove_talent_product(user_id, talent_product_id)
            .await?
        {
            return Err(AppError::NotFound(
                "Talent listing is not in your wishlist".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::{
        entities::items::ItemEntity,
        repositories::{
            items::MockItemRepository, talent_products::MockTalentProductRepository,
            wishlists::MockWishlistRepository,
        },
        value_objects::enums::item_statuses::ItemStatus,
    };
    use mockall::predicate::eq;

    fn sample_item() -> ItemEntity {
        let now = Utc::now();
        ItemEntity {
            id: Uuid::new_v4(),
            seller_id: Uuid::new_v4(),
            title: "Textbook".to_string(),
            description: String::new(),
            category: "books".to_string(),
            price_minor: 30000,
            status: ItemStatus::Available.to_string(),
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
    async fn add_item_rejects_duplicate() {
        let user_id = Uuid::new_v4();
        let item = sample_item();
        let item_id = item.id;

        let mut item_repo = MockItemRepository::new();
        item_repo.expect_find_by_id().returning(move |_| {
            let item = item.clone();
            Box::pin(async move { Ok(Some(item)) })
        });

        let mut wishlist_repo = MockWishlistRepository::new();
        wishlist_repo
            .expect_add_item()
            .with(eq(user_id), eq(item_id))
            .returning(|_, _| Box::pin(async { Ok(false) }));

        let usecase = WishlistUseCase::new(
            Arc::new(wishlist_repo),
            Arc::new(item_repo),
            Arc::new(MockTalentProductRepository::new()),
        );
        let result = usecase.add_item(user_id, item_id).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn remove_item_maps_missing_entry_to_not_found() {
        let mut wishlist_repo = MockWishlistRepository::new();
        wishlist_repo
            .expect_remove_item()
            .returning(|_, _| Box::pin(async { Ok(false) }));

        let usecase = WishlistUseCase::new(
            Arc::new(wishlist_repo),
            Arc::new(MockItemRepository::new()),
            Arc::new(MockTalentProductRepository::new()),
        );
        let result = usecase.remove_item(Uuid::new_v4(), Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
