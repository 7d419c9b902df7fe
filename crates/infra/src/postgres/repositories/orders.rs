use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{insert_into, prelude::*};
use std::sync::Arc;
use uuid::Uuid;

use crate::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::orders::{
        InsertOrderEntity, InsertOrderMessageEntity, OrderEntity, OrderMessageEntity,
    },
    repositories::orders::OrderRepository,
    schema::{items, order_messages, orders, talent_products},
    value_objects::{
        enums::{item_statuses::ItemStatus, order_statuses::OrderStatus},
        orders::{ListOrdersFilter, OrderRoleFilter, OrderSideEffect},
    },
};

pub struct OrderPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl OrderPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

fn apply_side_effect(conn: &mut PgConnection, side_effect: OrderSideEffect) -> Result<()> {
    let now = Utc::now();

    match side_effect {
        OrderSideEffect::None => {}
        OrderSideEffect::ReleaseItem { item_id } => {
            diesel::update(items::table.find(item_id))
                .set((
                    items::status.eq(ItemStatus::Available.to_string()),
                    items::reserved_by.eq(None::<Uuid>),
                    items::reserved_at.eq(None::<chrono::DateTime<Utc>>),
                    items::updated_at.eq(now),
                ))
                .execute(conn)?;
        }
        OrderSideEffect::MarkItemSold { item_id, buyer_id } => {
            diesel::update(items::table.find(item_id))
                .set((
                    items::status.eq(ItemStatus::Sold.to_string()),
                    items::sold_to.eq(Some(buyer_id)),
                    items::sold_at.eq(Some(now)),
                    items::updated_at.eq(now),
                ))
                .execute(conn)?;
        }
        OrderSideEffect::BumpTalentOrders { talent_product_id } => {
            diesel::update(talent_products::table.find(talent_product_id))
                .set((
                    talent_products::orders_count.eq(talent_products::orders_count + 1),
                    talent_products::updated_at.eq(now),
                ))
                .execute(conn)?;
        }
    }

    Ok(())
}

#[async_trait]
impl OrderRepository for OrderPostgres {
    async fn create_item_order(
        &self,
        order_entity: InsertOrderEntity,
        item_id: Uuid,
    ) -> Result<Option<OrderEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let order = conn.transaction::<Option<OrderEntity>, anyhow::Error, _>(|conn| {
            let now = Utc::now();

            let reserved = diesel::update(
                items::table
                    .find(item_id)
                    .filter(items::status.eq(ItemStatus::Available.to_string())),
            )
            .set((
                items::status.eq(ItemStatus::Reserved.to_string()),
                items::reserved_by.eq(Some(order_entity.buyer_id)),
                items::reserved_at.eq(Some(now)),
                items::updated_at.eq(now),
            ))
            .execute(conn)?;

            // Zero rows means a concurrent buyer got there first.
            if reserved == 0 {
                return Ok(None);
            }

            let order = insert_into(orders::table)
                .values(&order_entity)
                .returning(OrderEntity::as_returning())
                .get_result::<OrderEntity>(conn)?;

            Ok(Some(order))
        })?;

        Ok(order)
    }

    async fn create_talent_order(&self, order_entity: InsertOrderEntity) -> Result<OrderEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let order = insert_into(orders::table)
            .values(&order_entity)
            .returning(OrderEntity::as_returning())
            .get_result::<OrderEntity>(&mut conn)?;

        Ok(order)
    }

    async fn find_by_id(&self, order_id: Uuid) -> Result<Option<OrderEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let order = orders::table
            .find(order_id)
            .select(OrderEntity::as_select())
            .first::<OrderEntity>(&mut conn)
            .optional()?;

        Ok(order)
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        filter: &ListOrdersFilter,
    ) -> Result<Vec<OrderEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = orders::table
            .select(OrderEntity::as_select())
            .order(orders::created_at.desc())
            .into_boxed();

        query = match filter.role {
            Some(OrderRoleFilter::Buyer) => query.filter(orders::buyer_id.eq(user_id)),
            Some(OrderRoleFilter::Seller) => query.filter(orders::seller_id.eq(user_id)),
            None => query.filter(
                orders::buyer_id
                    .eq(user_id)
                    .or(orders::seller_id.eq(user_id)),
            ),
        };

        if let Some(status) = &filter.status {
            query = query.filter(orders::status.eq(status.to_string()));
        }

        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        if let Some(offset) = filter.offset {
            query = query.offset(offset);
        }

        let results = query.load::<OrderEntity>(&mut conn)?;

        Ok(results)
    }

    async fn transition_status(
        &self,
        order_id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
        cancel_reason: Option<String>,
        side_effect: OrderSideEffect,
    ) -> Result<Option<OrderEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let order = conn.transaction::<Option<OrderEntity>, anyhow::Error, _>(|conn| {
            let updated = diesel::update(
                orders::table
                    .find(order_id)
                    .filter(orders::status.eq(from.to_string())),
            )
            .set((
                orders::status.eq(to.to_string()),
                orders::cancel_reason.eq(cancel_reason.clone()),
                orders::updated_at.eq(Utc::now()),
            ))
            .returning(OrderEntity::as_returning())
            .get_result::<OrderEntity>(conn)
            .optional()?;

            // Zero rows means the order left `from` under us; nothing was
            // written, so the caller sees a clean conflict.
            let Some(order) = updated else {
                return Ok(None);
            };

            apply_side_effect(conn, side_effect)?;

            Ok(Some(order))
        })?;

        Ok(order)
    }

    async fn insert_message(
        &self,
        message_entity: InsertOrderMessageEntity,
    ) -> Result<OrderMessageEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let message = insert_into(order_messages::table)
            .values(&message_entity)
            .returning(OrderMessageEntity::as_returning())
            .get_result::<OrderMessageEntity>(&mut conn)?;

        Ok(message)
    }

    async fn list_messages(&self, order_id: Uuid) -> Result<Vec<OrderMessageEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let messages = order_messages::table
            .filter(order_messages::order_id.eq(order_id))
            .order(order_messages::created_at.asc())
            .select(OrderMessageEntity::as_select())
            .load::<OrderMessageEntity>(&mut conn)?;

        Ok(messages)
    }

    async fn mark_messages_read(&self, order_id: Uuid, reader_id: Uuid) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let updated = diesel::update(
            order_messages::table
                .filter(order_messages::order_id.eq(order_id))
                .filter(order_messages::sender_id.ne(reader_id))
                .filter(order_messages::is_read.eq(false)),
        )
        .set(order_messages::is_read.eq(true))
        .execute(&mut conn)?;

        Ok(updated)
    }
}
