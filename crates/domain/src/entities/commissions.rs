use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::commissions;
use crate::value_objects::commissions::{CategoryBreakdown, TopSeller};

/// Raw row used for Diesel queries. The denormalized summaries stay as JSON
/// and are parsed on the entity.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = commissions)]
pub struct CommissionRow {
    pub id: Uuid,
    pub batch_id: String,
    pub year: i32,
    pub month: i32,
    pub total_sales_minor: i64,
    pub total_commission_minor: i64,
    pub total_seller_payout_minor: i64,
    pub payments_count: i64,
    pub category_breakdown: serde_json::Value,
    pub top_sellers: serde_json::Value,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CommissionEntity {
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
    pub updated_at: DateTime<Utc>,
}

impl From<CommissionRow> for CommissionEntity {
    fn from(value: CommissionRow) -> Self {
        let category_breakdown =
            serde_json::from_value(value.category_breakdown).unwrap_or_default();
        let top_sellers = serde_json::from_value(value.top_sellers).unwrap_or_default();

        Self {
            id: value.id,
            batch_id: value.batch_id,
            year: value.year,
            month: value.month,
            total_sales_minor: value.total_sales_minor,
            total_commission_minor: value.total_commission_minor,
            total_seller_payout_minor: value.total_seller_payout_minor,
            payments_count: value.payments_count,
            category_breakdown,
            top_sellers,
            status: value.status,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = commissions)]
pub struct InsertCommissionEntity {
    pub batch_id: String,
    pub year: i32,
    pub month: i32,
    pub total_sales_minor: i64,
    pub total_commission_minor: i64,
    pub total_seller_payout_minor: i64,
    pub payments_count: i64,
    pub category_breakdown: serde_json::Value,
    pub top_sellers: serde_json::Value,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
