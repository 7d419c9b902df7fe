use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, TimeZone, Utc};
use domain::{
    entities::commissions::{CommissionEntity, InsertCommissionEntity},
    repositories::commissions::CommissionRepository,
    value_objects::{
        commissions::{CategoryBreakdown, TopSeller, UpdateCommissionStatusModel},
        enums::commission_statuses::CommissionStatus,
    },
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::axum_http::error_responses::AppError;

const TOP_SELLERS_LIMIT: i64 = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommissionModel {
    pub year: i32,
    pub month: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommissionDto {
    pub id: Uuid,
    pub batch_id: String,
    pub year: i32,
    pub month: i32,
    pub total_sales_minor: i64,
    pub total_commission_minor: i64,
    pub total_seller_payout_minor: i64,
    pub payments_count: i64,
    pub category_breakdown: Vec<CategoryBreakdown>,
    pub top_sellers: Vec<TopSeller>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<CommissionEntity> for CommissionDto {
    fn from(entity: CommissionEntity) -> Self {
        Self {
            id: entity.id,
            batch_id: entity.batch_id,
            year: entity.year,
            month: entity.month,
            total_sales_minor: entity.total_sales_minor,
            total_commission_minor: entity.total_commission_minor,
            total_seller_payout_minor: entity.total_seller_payout_minor,
            payments_count: entity.payments_count,
            category_breakdown: entity.category_breakdown,
            top_sellers: entity.top_sellers,
            status: entity.status,
            created_at: entity.created_at,
        }
    }
}

fn month_window(year: i32, month: i32) -> Result<(DateTime<Utc>, DateTime<Utc>), AppError> {
    let start = Utc
        .with_ymd_and_hms(year, month as u32, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| AppError::BadRequest("Invalid year or month".to_string()))?;

    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = Utc
        .with_ymd_and_hms(next_year, next_month as u32, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| AppError::BadRequest("Invalid year or month".to_string()))?;

    Ok((start, end))
}

pub struct CommissionUseCase<T>
where
    T: CommissionRepository + Send + Sync + 'static,
{
    commission_repository: Arc<T>,
}

impl<T> CommissionUseCase<T>
where
    T: CommissionRepository + Send + Sync + 'static,
{
    pub fn new(commission_repository: Arc<T>) -> Self {
        Self {
            commission_repository,
        }
    }

    /// Aggregates released payments for the month into one batch row.
    pub async fn create_monthly(
        &self,
        model: CreateCommissionModel,
    ) -> Result<CommissionDto, AppError> {
        if !(1..=12).contains(&model.month) {
            return Err(AppError::BadRequest(
                "Month must be between 1 and 12".to_string(),
            ));
        }
        if !(2000..=2100).contains(&model.year) {
            return Err(AppError::BadRequest("Year is out of range".to_string()));
        }

        if self
            .commission_repository
            .exists_for_period(model.year, model.month)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "A commission batch already exists for {:04}-{:02}",
                model.year, model.month
            )));
        }

        let (period_start, period_end) = month_window(model.year, model.month)?;

        let totals = self
            .commission_repository
            .summarize_period(period_start, period_end)
            .await?;
        let category_breakdown = self
            .commission_repository
            .category_breakdown(period_start, period_end)
            .await?;
        let top_sellers = self
            .commission_repository
            .top_sellers(period_start, period_end, TOP_SELLERS_LIMIT)
            .await?;

        let now = Utc::now();
        let created = self
            .commission_repository
            .insert(InsertCommissionEntity {
                batch_id: format!("BATCH-{:04}{:02}", model.year, model.month),
                year: model.year,
                month: model.month,
                total_sales_minor: totals.total_sales_minor,
                total_commission_minor: totals.total_commission_minor,
                total_seller_payout_minor: totals.total_seller_payout_minor,
                payments_count: totals.payments_count,
                category_breakdown: serde_json::to_value(&category_breakdown)
                    .context("Failed to serialize category breakdown")?,
                top_sellers: serde_json::to_value(&top_sellers)
                    .context("Failed to serialize top sellers")?,
                status: CommissionStatus::Calculated.to_string(),
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(batch_id = %created.batch_id, "commissions: monthly batch created");
        Ok(CommissionDto::from(created))
    }

    pub async fn list(&self) -> Result<Vec<CommissionDto>, AppError> {
        let batches = self.commission_repository.list().await?;
        Ok(batches.into_iter().map(CommissionDto::from).collect())
    }

    pub async fn get(&self, commission_id: Uuid) -> Result<CommissionDto, AppError> {
        let batch = self
            .commission_repository
            .find_by_id(commission_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Commission batch not found".to_string()))?;

        Ok(CommissionDto::from(batch))
    }

    pub async fn update_status(
        &self,
        commission_id: Uuid,
        model: UpdateCommissionStatusModel,
    ) -> Result<CommissionDto, AppError> {
        let batch = self
            .commission_repository
            .find_by_id(commission_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Commission batch not found".to_string()))?;

        let from = CommissionStatus::from_str(&batch.status)?;
        if !from.can_advance_to(model.status) {
            return Err(AppError::BadRequest(format!(
                "Commission batch cannot go from {} to {}",
                from, model.status
            )));
        }

        let updated = self
            .commission_repository
            .update_status(commission_id, from, model.status)
            .await?
            .ok_or_else(|| {
                AppError::Conflict("Commission batch status changed underneath you".to_string())
            })?;

        info!(%commission_id, status = %model.status, "commissions: batch status advanced");
        Ok(CommissionDto::from(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{
        repositories::commissions::MockCommissionRepository,
        value_objects::commissions::PeriodTotals,
    };
    use mockall::predicate::eq;

    fn sample_batch(year: i32, month: i32, status: CommissionStatus) -> CommissionEntity {
        let now = Utc::now();
        CommissionEntity {
            id: Uuid::new_v4(),
            batch_id: format!("BATCH-{:04}{:02}", year, month),
            year,
            month,
            total_sales_minor: 500000,
            total_commission_minor: 15000,
            total_seller_payout_minor: 485000,
            payments_count: 5,
            category_breakdown: vec![],
            top_sellers: vec![],
            status: status.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn create_monthly_rejects_month_out_of_range() {
        let commission_repo = MockCommissionRepository::new();
        let usecase = CommissionUseCase::new(Arc::new(commission_repo));

        let result = usecase
            .create_monthly(CreateCommissionModel {
                year: 2025,
                month: 13,
            })
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn create_monthly_rejects_duplicate_period() {
        let mut commission_repo = MockCommissionRepository::new();
        commission_repo
            .expect_exists_for_period()
            .with(eq(2025), eq(3))
            .returning(|_, _| Box::pin(async { Ok(true) }));

        let usecase = CommissionUseCase::new(Arc::new(commission_repo));
        let result = usecase
            .create_monthly(CreateCommissionModel {
                year: 2025,
                month: 3,
            })
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn create_monthly_builds_batch_over_calendar_month() {
        let mut commission_repo = MockCommissionRepository::new();
        commission_repo
            .expect_exists_for_period()
            .returning(|_, _| Box::pin(async { Ok(false) }));

        let expected_start = Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap();
        let expected_end = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();

        commission_repo
            .expect_summarize_period()
            .with(eq(expected_start), eq(expected_end))
            .returning(|_, _| {
                Box::pin(async {
                    Ok(PeriodTotals {
                        total_sales_minor: 500000,
                        total_commission_minor: 15000,
                        total_seller_payout_minor: 485000,
                        payments_count: 5,
                    })
                })
            });
        commission_repo
            .expect_category_breakdown()
            .with(eq(expected_start), eq(expected_end))
            .returning(|_, _| Box::pin(async { Ok(vec![]) }));
        commission_repo
            .expect_top_sellers()
            .with(eq(expected_start), eq(expected_end), eq(10))
            .returning(|_, _, _| Box::pin(async { Ok(vec![]) }));
        commission_repo
            .expect_insert()
            .withf(|entity| {
                entity.batch_id == "BATCH-202512"
                    && entity.total_sales_minor == 500000
                    && entity.status == "calculated"
            })
            .times(1)
            .returning(|entity| {
                Box::pin(async move {
                    let now = Utc::now();
                    Ok(CommissionEntity {
                        id: Uuid::new_v4(),
                        batch_id: entity.batch_id,
                        year: entity.year,
                        month: entity.month,
                        total_sales_minor: entity.total_sales_minor,
                        total_commission_minor: entity.total_commission_minor,
                        total_seller_payout_minor: entity.total_seller_payout_minor,
                        payments_count: entity.payments_count,
                        category_breakdown: vec![],
                        top_sellers: vec![],
                        status: entity.status,
                        created_at: now,
                        updated_at: now,
                    })
                })
            });

        let usecase = CommissionUseCase::new(Arc::new(commission_repo));
        let batch = usecase
            .create_monthly(CreateCommissionModel {
                year: 2025,
                month: 12,
            })
            .await
            .unwrap();

        assert_eq!(batch.batch_id, "BATCH-202512");
        assert_eq!(batch.payments_count, 5);
    }

    #[tokio::test]
    async fn update_status_rejects_backward_move() {
        let batch = sample_batch(2025, 3, CommissionStatus::Paid);
        let batch_id = batch.id;

        let mut commission_repo = MockCommissionRepository::new();
        commission_repo.expect_find_by_id().returning(move |_| {
            let batch = batch.clone();
            Box::pin(async move { Ok(Some(batch)) })
        });

        let usecase = CommissionUseCase::new(Arc::new(commission_repo));
        let result = usecase
            .update_status(
                batch_id,
                UpdateCommissionStatusModel {
                    status: CommissionStatus::Calculated,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn update_status_rejects_skipping_processed() {
        let batch = sample_batch(2025, 3, CommissionStatus::Calculated);
        let batch_id = batch.id;

        let mut commission_repo = MockCommissionRepository::new();
        commission_repo.expect_find_by_id().returning(move |_| {
            let batch = batch.clone();
            Box::pin(async move { Ok(Some(batch)) })
        });

        let usecase = CommissionUseCase::new(Arc::new(commission_repo));
        let result = usecase
            .update_status(
                batch_id,
                UpdateCommissionStatusModel {
                    status: CommissionStatus::Paid,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
