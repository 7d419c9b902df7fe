use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{
    dsl::{count_star, sum},
    insert_into,
    prelude::*,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::commissions::{CommissionEntity, CommissionRow, InsertCommissionEntity},
    repositories::commissions::CommissionRepository,
    schema::{commissions, items, orders, payments, talent_products},
    value_objects::{
        commissions::{CategoryBreakdown, PeriodTotals, TopSeller},
        enums::{
            commission_statuses::CommissionStatus, escrow_statuses::EscrowStatus,
            payment_statuses::PaymentStatus,
        },
    },
};

pub struct CommissionPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl CommissionPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

type CategoryRow = (String, Option<i64>, Option<i64>, i64);

fn merge_category_rows(buckets: &mut BTreeMap<String, CategoryBreakdown>, rows: Vec<CategoryRow>) {
    for (category, sales, commission, count) in rows {
        let entry = buckets
            .entry(category.clone())
            .or_insert_with(|| CategoryBreakdown {
                category,
                total_sales_minor: 0,
                total_commission_minor: 0,
                payments_count: 0,
            });
        entry.total_sales_minor += sales.unwrap_or(0);
        entry.total_commission_minor += commission.unwrap_or(0);
        entry.payments_count += count;
    }
}

#[async_trait]
impl CommissionRepository for CommissionPostgres {
    async fn exists_for_period(&self, year: i32, month: i32) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let exists = diesel::select(diesel::dsl::exists(
            commissions::table
                .filter(commissions::year.eq(year))
                .filter(commissions::month.eq(month)),
        ))
        .get_result::<bool>(&mut conn)?;

        Ok(exists)
    }

    async fn summarize_period(
        &self,
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
    ) -> Result<PeriodTotals> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let (sales, commission, payout, count) = payments::table
            .filter(payments::status.eq(PaymentStatus::Completed.to_string()))
            .filter(payments::escrow_status.eq(EscrowStatus::Released.to_string()))
            .filter(payments::created_at.ge(period_start))
            .filter(payments::created_at.lt(period_end))
            .select((
                sum(payments::total_amount_minor),
                sum(payments::platform_commission_minor),
                sum(payments::seller_amount_minor),
                count_star(),
            ))
            .first::<(Option<i64>, Option<i64>, Option<i64>, i64)>(&mut conn)?;

        Ok(PeriodTotals {
            total_sales_minor: sales.unwrap_or(0),
            total_commission_minor: commission.unwrap_or(0),
            total_seller_payout_minor: payout.unwrap_or(0),
            payments_count: count,
        })
    }

    async fn category_breakdown(
        &self,
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
    ) -> Result<Vec<CategoryBreakdown>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let item_rows = payments::table
            .inner_join(orders::table.on(payments::order_id.eq(orders::id)))
            .inner_join(items::table.on(orders::item_id.eq(items::id.nullable())))
            .filter(payments::status.eq(PaymentStatus::Completed.to_string()))
            .filter(payments::escrow_status.eq(EscrowStatus::Released.to_string()))
            .filter(payments::created_at.ge(period_start))
            .filter(payments::created_at.lt(period_end))
            .group_by(items::category)
            .select((
                items::category,
                sum(payments::total_amount_minor),
                sum(payments::platform_commission_minor),
                count_star(),
            ))
            .load::<CategoryRow>(&mut conn)?;

        let talent_rows = payments::table
            .inner_join(orders::table.on(payments::order_id.eq(orders::id)))
            .inner_join(
                talent_products::table
                    .on(orders::talent_product_id.eq(talent_products::id.nullable())),
            )
            .filter(payments::status.eq(PaymentStatus::Completed.to_string()))
            .filter(payments::escrow_status.eq(EscrowStatus::Released.to_string()))
            .filter(payments::created_at.ge(period_start))
            .filter(payments::created_at.lt(period_end))
            .group_by(talent_products::category)
            .select((
                talent_products::category,
                sum(payments::total_amount_minor),
                sum(payments::platform_commission_minor),
                count_star(),
            ))
            .load::<CategoryRow>(&mut conn)?;

        // Item and talent listings can share category names; merge them.
        let mut buckets = BTreeMap::new();
        merge_category_rows(&mut buckets, item_rows);
        merge_category_rows(&mut buckets, talent_rows);

        Ok(buckets.into_values().collect())
    }

    async fn top_sellers(
        &self,
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<TopSeller>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = payments::table
            .filter(payments::status.eq(PaymentStatus::Completed.to_string()))
            .filter(payments::escrow_status.eq(EscrowStatus::Released.to_string()))
            .filter(payments::created_at.ge(period_start))
            .filter(payments::created_at.lt(period_end))
            .group_by(payments::seller_id)
            .select((
                payments::seller_id,
                sum(payments::total_amount_minor),
                sum(payments::platform_commission_minor),
                count_star(),
            ))
            .order(sum(payments::total_amount_minor).desc())
            .limit(limit)
            .load::<(Uuid, Option<i64>, Option<i64>, i64)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(seller_id, sales, commission, count)| TopSeller {
                seller_id,
                total_sales_minor: sales.unwrap_or(0),
                total_commission_minor: commission.unwrap_or(0),
                payments_count: count,
            })
            .collect())
    }

    async fn insert(&self, commission_entity: InsertCommissionEntity) -> Result<CommissionEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = insert_into(commissions::table)
            .values(&commission_entity)
            .returning(CommissionRow::as_returning())
            .get_result::<CommissionRow>(&mut conn)?;

        Ok(row.into())
    }

    async fn list(&self) -> Result<Vec<CommissionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = commissions::table
            .order((commissions::year.desc(), commissions::month.desc()))
            .select(CommissionRow::as_select())
            .load::<CommissionRow>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, commission_id: Uuid) -> Result<Option<CommissionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = commissions::table
            .find(commission_id)
            .select(CommissionRow::as_select())
            .first::<CommissionRow>(&mut conn)
            .optional()?;

        Ok(row.map(Into::into))
    }

    async fn update_status(
        &self,
        commission_id: Uuid,
        from: CommissionStatus,
        to: CommissionStatus,
    ) -> Result<Option<CommissionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = diesel::update(
            commissions::table
                .find(commission_id)
                .filter(commissions::status.eq(from.to_string())),
        )
        .set((
            commissions::status.eq(to.to_string()),
            commissions::updated_at.eq(Utc::now()),
        ))
        .returning(CommissionRow::as_returning())
        .get_result::<CommissionRow>(&mut conn)
        .optional()?;

        Ok(row.map(Into::into))
    }
}
