use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::entities::commissions::{CommissionEntity, InsertCommissionEntity};
use crate::value_objects::{
    commissions::{CategoryBreakdown, PeriodTotals, TopSeller},
    enums::commission_statuses::CommissionStatus,
};

#[async_trait]
#[automock]
pub trait CommissionRepository {
    async fn exists_for_period(&self, year: i32, month: i32) -> Result<bool>;
    /// Totals over payments with released escrow created inside the window.
    async fn summarize_period(
        &self,
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
    ) -> Result<PeriodTotals>;
    async fn category_breakdown(
        &self,
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
    ) -> Result<Vec<CategoryBreakdown>>;
    async fn top_sellers(
        &self,
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<TopSeller>>;
    async fn insert(&self, commission_entity: InsertCommissionEntity) -> Result<CommissionEntity>;
    async fn list(&self) -> Result<Vec<CommissionEntity>>;
    async fn find_by_id(&self, commission_id: Uuid) -> Result<Option<CommissionEntity>>;
    /// Compare-and-swap on the current status; `None` when it had moved.
    async fn update_status(
        &self,
        commission_id: Uuid,
        from: CommissionStatus,
        to: CommissionStatus,
    ) -> Result<Option<CommissionEntity>>;
}
