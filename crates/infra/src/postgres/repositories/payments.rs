use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{insert_into, prelude::*, result::Error as DieselError};
use std::sync::Arc;
use uuid::Uuid;

use crate::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::{
        orders::OrderEntity,
        payments::{InsertPaymentEntity, PaymentEntity},
    },
    repositories::payments::PaymentRepository,
    schema::{items, orders, payments, talent_products},
    value_objects::enums::{
        escrow_statuses::EscrowStatus, item_statuses::ItemStatus, order_statuses::OrderStatus,
        order_types::OrderType, payment_statuses::PaymentStatus,
    },
};

pub struct PaymentPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PaymentPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PaymentRepository for PaymentPostgres {
    async fn insert(&self, payment_entity: InsertPaymentEntity) -> Result<PaymentEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let payment = insert_into(payments::table)
            .values(&payment_entity)
            .returning(PaymentEntity::as_returning())
            .get_result::<PaymentEntity>(&mut conn)?;

        Ok(payment)
    }

    async fn find_by_id(&self, payment_id: Uuid) -> Result<Option<PaymentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let payment = payments::table
            .find(payment_id)
            .select(PaymentEntity::as_select())
            .first::<PaymentEntity>(&mut conn)
            .optional()?;

        Ok(payment)
    }

    async fn find_by_order(&self, order_id: Uuid) -> Result<Option<PaymentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let payment = payments::table
            .filter(payments::order_id.eq(order_id))
            .select(PaymentEntity::as_select())
            .first::<PaymentEntity>(&mut conn)
            .optional()?;

        Ok(payment)
    }

    async fn find_by_provider_order_ref(
        &self,
        provider_order_ref: &str,
    ) -> Result<Option<PaymentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let payment = payments::table
            .filter(payments::provider_order_ref.eq(provider_order_ref))
            .select(PaymentEntity::as_select())
            .first::<PaymentEntity>(&mut conn)
            .optional()?;

        Ok(payment)
    }

    async fn mark_checkout_completed(
        &self,
        payment_id: Uuid,
        provider_payment_ref: String,
    ) -> Result<Option<PaymentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = conn.transaction::<PaymentEntity, DieselError, _>(|conn| {
            let now = Utc::now();

            let payment = diesel::update(
                payments::table
                    .find(payment_id)
                    .filter(payments::status.eq(PaymentStatus::Pending.to_string())),
            )
            .set((
                payments::status.eq(PaymentStatus::Completed.to_string()),
                payments::provider_payment_ref.eq(Some(provider_payment_ref.clone())),
                payments::updated_at.eq(now),
            ))
            .returning(PaymentEntity::as_returning())
            .get_result::<PaymentEntity>(conn)
            .optional()?
            .ok_or(DieselError::RollbackTransaction)?;

            let moved = diesel::update(
                orders::table
                    .find(payment.order_id)
                    .filter(orders::status.eq(OrderStatus::Pending.to_string())),
            )
            .set((
                orders::status.eq(OrderStatus::Paid.to_string()),
                orders::updated_at.eq(now),
            ))
            .execute(conn)?;

            // Both writes or neither: the order leaving `pending` while the
            // payment still looked pending rolls everything back.
            if moved == 0 {
                return Err(DieselError::RollbackTransaction);
            }

            Ok(payment)
        });

        match result {
            Ok(payment) => Ok(Some(payment)),
            Err(DieselError::RollbackTransaction) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn release_escrow(&self, payment_id: Uuid) -> Result<Option<PaymentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let payment = conn.transaction::<Option<PaymentEntity>, anyhow::Error, _>(|conn| {
            let now = Utc::now();

            let updated = diesel::update(
                payments::table
                    .find(payment_id)
                    .filter(payments::status.eq(PaymentStatus::Completed.to_string()))
                    .filter(payments::escrow_status.eq(EscrowStatus::Held.to_string())),
            )
            .set((
                payments::escrow_status.eq(EscrowStatus::Released.to_string()),
                payments::delivery_confirmed_at.eq(Some(now)),
                payments::updated_at.eq(now),
            ))
            .returning(PaymentEntity::as_returning())
            .get_result::<PaymentEntity>(conn)
            .optional()?;

            let Some(payment) = updated else {
                return Ok(None);
            };

            let order = orders::table
                .find(payment.order_id)
                .select(OrderEntity::as_select())
                .first::<OrderEntity>(conn)?;

            // Confirming delivery also completes a delivered order.
            if order.status == OrderStatus::Delivered.as_str() {
                diesel::update(
                    orders::table
                        .find(order.id)
                        .filter(orders::status.eq(OrderStatus::Delivered.to_string())),
                )
                .set((
                    orders::status.eq(OrderStatus::Completed.to_string()),
                    orders::updated_at.eq(now),
                ))
                .execute(conn)?;

                if order.order_type == OrderType::Item.as_str() {
                    if let Some(item_id) = order.item_id {
                        diesel::update(items::table.find(item_id))
                            .set((
                                items::status.eq(ItemStatus::Sold.to_string()),
                                items::sold_to.eq(Some(order.buyer_id)),
                                items::sold_at.eq(Some(now)),
                                items::updated_at.eq(now),
                            ))
                            .execute(conn)?;
                    }
                } else if let Some(talent_product_id) = order.talent_product_id {
                    diesel::update(talent_products::table.find(talent_product_id))
                        .set((
                            talent_products::orders_count
                                .eq(talent_products::orders_count + 1),
                            talent_products::updated_at.eq(now),
                        ))
                        .execute(conn)?;
                }
            }

            Ok(Some(payment))
        })?;

        Ok(payment)
    }

    async fn raise_dispute(
        &self,
        payment_id: Uuid,
        reason: String,
    ) -> Result<Option<PaymentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let now = Utc::now();

        let payment = diesel::update(
            payments::table
                .find(payment_id)
                .filter(payments::status.eq(PaymentStatus::Completed.to_string()))
                .filter(payments::escrow_status.eq(EscrowStatus::Held.to_string())),
        )
        .set((
            payments::status.eq(PaymentStatus::Disputed.to_string()),
            payments::dispute_reason.eq(Some(reason)),
            payments::disputed_at.eq(Some(now)),
            payments::updated_at.eq(now),
        ))
        .returning(PaymentEntity::as_returning())
        .get_result::<PaymentEntity>(&mut conn)
        .optional()?;

        Ok(payment)
    }

    async fn record_refund(
        &self,
        payment_id: Uuid,
        amount_minor: i32,
        reason: String,
    ) -> Result<Option<PaymentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let payment = conn.transaction::<Option<PaymentEntity>, anyhow::Error, _>(|conn| {
            let now = Utc::now();

            let refundable = vec![
                PaymentStatus::Completed.to_string(),
                PaymentStatus::Disputed.to_string(),
            ];

            let updated = diesel::update(
                payments::table
                    .find(payment_id)
                    .filter(payments::status.eq_any(refundable))
                    .filter(payments::escrow_status.eq(EscrowStatus::Held.to_string())),
            )
            .set((
                payments::status.eq(PaymentStatus::Refunded.to_string()),
                payments::escrow_status.eq(EscrowStatus::Refunded.to_string()),
                payments::refund_amount_minor.eq(Some(amount_minor)),
                payments::refund_reason.eq(Some(reason.clone())),
                payments::refunded_at.eq(Some(now)),
                payments::updated_at.eq(now),
            ))
            .returning(PaymentEntity::as_returning())
            .get_result::<PaymentEntity>(conn)
            .optional()?;

            let Some(payment) = updated else {
                return Ok(None);
            };

            let order = orders::table
                .find(payment.order_id)
                .select(OrderEntity::as_select())
                .first::<OrderEntity>(conn)?;

            diesel::update(orders::table.find(order.id))
                .set((
                    orders::status.eq(OrderStatus::Refunded.to_string()),
                    orders::updated_at.eq(now),
                ))
                .execute(conn)?;

            // A refunded item order frees the item for sale again.
            if order.order_type == OrderType::Item.as_str() {
                if let Some(item_id) = order.item_id {
                    diesel::update(items::table.find(item_id))
                        .set((
                            items::status.eq(ItemStatus::Available.to_string()),
                            items::reserved_by.eq(None::<Uuid>),
                            items::reserved_at.eq(None::<chrono::DateTime<Utc>>),
                            items::updated_at.eq(now),
                        ))
                        .execute(conn)?;
                }
            }

            Ok(Some(payment))
        })?;

        Ok(payment)
    }
}
