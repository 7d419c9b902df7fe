use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::payments;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = payments)]
pub struct PaymentEntity {
    pub id: Uuid,
    pub order_id: Uuid,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub total_amount_minor: i32,
    pub commission_rate_bps: i32,
    pub platform_commission_minor: i32,
    pub seller_amount_minor: i32,
    pub status: String,
    pub escrow_status: String,
    pub provider_order_ref: Option<String>,
    pub provider_payment_ref: Option<String>,
    pub delivery_confirmed_at: Option<DateTime<Utc>>,
    pub dispute_reason: Option<String>,
    pub disputed_at: Option<DateTime<Utc>>,
    pub refund_amount_minor: Option<i32>,
    pub refund_reason: Option<String>,
    pub refunded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = payments)]
pub struct InsertPaymentEntity {
    pub order_id: Uuid,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub total_amount_minor: i32,
    pub commission_rate_bps: i32,
    pub platform_commission_minor: i32,
    pub seller_amount_minor: i32,
    pub status: String,
    pub escrow_status: String,
    pub provider_order_ref: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
