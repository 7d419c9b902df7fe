use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Utc};
use domain::{
    entities::talent_products::{
        InsertTalentProductEntity, TalentProductEntity, UpdateTalentProductChangeset,
    },
    repositories::talent_products::TalentProductRepository,
    value_objects::{
        enums::talent_statuses::TalentStatus,
        talent_products::{
            InsertTalentProductModel, ListTalentProductsFilter, PackageOffer,
            SetTalentAvailabilityModel, UpdateTalentProductModel,
        },
    },
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::axum_http::error_responses::AppError;

#[derive(Debug, Clone, Serialize)]
pub struct TalentProductDto {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub base_price_minor: i32,
    pub status: String,
    pub packages: Vec<PackageOffer>,
    pub views_count: i32,
    pub orders_count: i32,
    pub rating_avg: f64,
    pub rating_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TalentProductEntity> for TalentProductDto {
    fn from(entity: TalentProductEntity) -> Self {
        Self {
            id: entity.id,
            seller_id: entity.seller_id,
            title: entity.title,
            description: entity.description,
            category: entity.category,
            base_price_minor: entity.base_price_minor,
            status: entity.status,
            packages: entity.packages,
            views_count: entity.views_count,
            orders_count: entity.orders_count,
            rating_avg: entity.rating_avg,
            rating_count: entity.rating_count,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

fn validate_packages(packages: &[PackageOffer]) -> Result<(), AppError> {
    for package in packages {
        if package.name.trim().is_empty() {
            return Err(AppError::BadRequest("Package name is required".to_string()));
        }
        if package.price_minor <= 0 {
            return Err(AppError::BadRequest(
                "Package price must be positive".to_string(),
            ));
        }
        if package.delivery_days <= 0 {
            return Err(AppError::BadRequest(
                "Package delivery days must be positive".to_string(),
            ));
        }
    }
    Ok(())
}

pub struct TalentProductUseCase<T>
where
    T: TalentProductRepository + Send + Sync + 'static,
{
    talent_product_repository: Arc<T>,
}

impl<T> TalentProductUseCase<T>
where
    T: TalentProductRepository + Send + Sync + 'static,
{
    pub fn new(talent_product_repository: Arc<T>) -> Self {
        Self {
            talent_product_repository,
        }
    }

    pub async fn create(
        &self,
        seller_id: Uuid,
        model: InsertTalentProductModel,
    ) -> Result<TalentProductDto, AppError> {
        if model.title.trim().is_empty() {
            return Err(AppError::BadRequest("Title is required".to_string()));
        }
        if model.base_price_minor <= 0 {
            return Err(AppError::BadRequest(
                "Base price must be positive".to_string(),
            ));
        }
        validate_packages(&model.packages)?;

        let packages =
            serde_json::to_value(&model.packages).context("Failed to serialize packages")?;
        let now = Utc::now();
        let created = self
            .talent_product_repository
            .insert(InsertTalentProductEntity {
                seller_id,
                title: model.title.trim().to_string(),
                description: model.description,
                category: model.category,
                base_price_minor: model.base_price_minor,
                status: TalentStatus::Available.to_string(),
                packages,
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(talent_product_id = %created.id, %seller_id, "talent_products: listed");
        Ok(TalentProductDto::from(created))
    }

    /// Public detail view; every hit bumps the view counter.
    pub async fn get(&self, talent_product_id: Uuid) -> Result<TalentProductDto, AppError> {
        let talent_product = self
            .talent_product_repository
            .find_and_bump_views(talent_product_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Talent listing not found".to_string()))?;

        Ok(TalentProductDto::from(talent_product))
    }

    pub async fn list(
        &self,
        filter: ListTalentProductsFilter,
    ) -> Result<Vec<TalentProductDto>, AppError> {
        let listings = self.talent_product_repository.list(&filter).await?;
        Ok(listings.into_iter().map(TalentProductDto::from).collect())
    }

    pub async fn update(
        &self,
        talent_product_id: Uuid,
        caller_id: Uuid,
        model: UpdateTalentProductModel,
    ) -> Result<TalentProductDto, AppError> {
        let existing = self.find_existing(talent_product_id).await?;
        if existing.seller_id != caller_id {
            return Err(AppError::Forbidden(
                "Only the seller can update this listing".to_string(),
            ));
        }
        if let Some(base_price_minor) = model.base_price_minor {
            if base_price_minor <= 0 {
                return Err(AppError::BadRequest(
                    "Base price must be positive".to_string(),
                ));
            }
        }
        let packages = match &model.packages {
            Some(packages) => {
                validate_packages(packages)?;
                Some(serde_json::to_value(packages).context("Failed to serialize packages")?)
            }
            None => None,
        };

        let updated = self
            .talent_product_repository
            .update(
                talent_product_id,
                UpdateTalentProductChangeset {
                    title: model.title,
                    description: model.description,
                    category: model.category,
                    base_price_minor: model.base_price_minor,
                    packages,
                    updated_at: Utc::now(),
                },
            )
            .await?;

        Ok(TalentProductDto::from(updated))
    }

    pub async fn set_availability(
        &self,
        talent_product_id: Uuid,
        caller_id: Uuid,
        model: SetTalentAvailabilityModel,
    ) -> Result<(), AppError> {
        let existing = self.find_existing(talent_product_id).await?;
        if existing.seller_id != caller_id {
            return Err(AppError::Forbidden(
                "Only the seller can change availability".to_string(),
            ));
        }

        self.talent_product_repository
            .set_status(talent_product_id, model.status)
            .await?;

        info!(%talent_product_id, status = %model.status, "talent_products: availability changed");
        Ok(())
    }

    async fn find_existing(
        &self,
        talent_product_id: Uuid,
    ) -> Result<TalentProductEntity, AppError> {
        self.talent_product_repository
            .find_by_id(talent_product_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Talent listing not found".to_string()))
    }
}
