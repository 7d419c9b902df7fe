use std::sync::Arc;

use domain::{
    repositories::{items::ItemRepository, users::UserRepository},
    value_objects::enums::item_statuses::ItemStatus,
};
use tracing::info;
use uuid::Uuid;

use crate::{axum_http::error_responses::AppError, usecases::items::ItemDto};

const DEFAULT_MIN_REPORTS: i32 = 1;

pub struct AdminUseCase<I, U>
where
    I: ItemRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    item_repository: Arc<I>,
    user_repository: Arc<U>,
}

impl<I, U> AdminUseCase<I, U>
where
    I: ItemRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(item_repository: Arc<I>, user_repository: Arc<U>) -> Self {
        Self {
            item_repository,
            user_repository,
        }
    }

    pub async fn reported_items(&self, min_reports: Option<i32>) -> Result<Vec<ItemDto>, AppError> {
        let min_reports = min_reports.unwrap_or(DEFAULT_MIN_REPORTS).max(1);
        let items = self.item_repository.list_reported(min_reports).await?;
        Ok(items.into_iter().map(ItemDto::from).collect())
    }

    pub async fn deactivate_item(&self, item_id: Uuid) -> Result<(), AppError> {
        self.item_repository
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Item not found".to_string()))?;

        self.item_repository
            .set_status(item_id, ItemStatus::Inactive)
            .await?;

        info!(%item_id, "admin: item deactivated");
        Ok(())
    }

    pub async fn deactivate_user(&self, user_id: Uuid) -> Result<(), AppError> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        self.user_repository.set_active(user_id, false).await?;

        info!(%user_id, "admin: user deactivated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::repositories::{items::MockItemRepository, users::MockUserRepository};
    use mockall::predicate::eq;

    #[tokio::test]
    async fn deactivate_item_requires_existing_item() {
        let mut item_repo = MockItemRepository::new();
        item_repo
            .expect_find_by_id()
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = AdminUseCase::new(Arc::new(item_repo), Arc::new(MockUserRepository::new()));
        let result = usecase.deactivate_item(Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn reported_items_clamps_min_reports_to_one() {
        let mut item_repo = MockItemRepository::new();
        item_repo
            .expect_list_reported()
            .with(eq(1))
            .times(1)
            .returning(|_| Box::pin(async { Ok(vec![]) }));

        let usecase = AdminUseCase::new(Arc::new(item_repo), Arc::new(MockUserRepository::new()));
        let items = usecase.reported_items(Some(0)).await.unwrap();

        assert!(items.is_empty());
    }
}
