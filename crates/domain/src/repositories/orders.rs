use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::entities::orders::{
    InsertOrderEntity, InsertOrderMessageEntity, OrderEntity, OrderMessageEntity,
};
use crate::value_objects::{
    enums::order_statuses::OrderStatus,
    orders::{ListOrdersFilter, OrderSideEffect},
};

#[async_trait]
#[automock]
pub trait OrderRepository {
    /// Reserves the item (compare-and-swap on `available`) and inserts the
    /// order in one transaction. `None` means the item was already taken.
    async fn create_item_order(
        &self,
        order_entity: InsertOrderEntity,
        item_id: Uuid,
    ) -> Result<Option<OrderEntity>>;
    async fn create_talent_order(&self, order_entity: InsertOrderEntity) -> Result<OrderEntity>;
    async fn find_by_id(&self, order_id: Uuid) -> Result<Option<OrderEntity>>;
    async fn list_for_user(
        &self,
        user_id: Uuid,
        filter: &ListOrdersFilter,
    ) -> Result<Vec<OrderEntity>>;
    /// Moves the order `from -> to` (compare-and-swap on `from`) and applies
    /// the listing side effect in the same transaction. `None` means the
    /// order was no longer in `from`.
    async fn transition_status(
        &self,
        order_id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
        cancel_reason: Option<String>,
        side_effect: OrderSideEffect,
    ) -> Result<Option<OrderEntity>>;
    async fn insert_message(
        &self,
        message_entity: InsertOrderMessageEntity,
    ) -> Result<OrderMessageEntity>;
    async fn list_messages(&self, order_id: Uuid) -> Result<Vec<OrderMessageEntity>>;
    /// Marks every message not sent by `reader_id` as read.
    async fn mark_messages_read(&self, order_id: Uuid, reader_id: Uuid) -> Result<usize>;
}
