use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::enums::commission_statuses::CommissionStatus;

/// Period totals aggregated over released payments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodTotals {
    pub total_sales_minor: i64,
    pub total_commission_minor: i64,
    pub total_seller_payout_minor: i64,
    pub payments_count: i64,
}

/// Per-category slice of a monthly batch. Stored as JSONB on the row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryBreakdown {
    pub category: String,
    pub total_sales_minor: i64,
    pub total_commission_minor: i64,
    pub payments_count: i64,
}

/// Top-seller slice of a monthly batch. Stored as JSONB on the row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopSeller {
    pub seller_id: Uuid,
    pub total_sales_minor: i64,
    pub total_commission_minor: i64,
    pub payments_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCommissionStatusModel {
    pub status: CommissionStatus,
}
