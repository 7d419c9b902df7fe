use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::{
    entities::orders::{
        InsertOrderEntity, InsertOrderMessageEntity, OrderEntity, OrderMessageEntity,
    },
    repositories::{
        items::ItemRepository, orders::OrderRepository,
        talent_products::TalentProductRepository,
    },
    value_objects::{
        enums::{
            item_statuses::ItemStatus, order_statuses::OrderStatus, order_types::OrderType,
            talent_statuses::TalentStatus,
        },
        order_transitions::{OrderActor, TransitionError, check_transition},
        orders::{
            InsertOrderMessageModel, InsertOrderModel, ListOrdersFilter, OrderSideEffect,
            UpdateOrderStatusModel,
        },
    },
};
use rand::{Rng, distributions::Alphanumeric};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::axum_http::error_responses::AppError;

const ORDER_NUMBER_SUFFIX_LEN: usize = 8;

#[derive(Debug, Clone, Serialize)]
pub struct OrderDto {
    pub id: Uuid,
    pub order_number: String,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub order_type: String,
    pub item_id: Option<Uuid>,
    pub talent_product_id: Option<Uuid>,
    pub amount_minor: i32,
    pub payment_method: String,
    pub status: String,
    pub cancel_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OrderEntity> for OrderDto {
    fn from(entity: OrderEntity) -> Self {
        Self {
            id: entity.id,
            order_number: entity.order_number,
            buyer_id: entity.buyer_id,
            seller_id: entity.seller_id,
            order_type: entity.order_type,
            item_id: entity.item_id,
            talent_product_id: entity.talent_product_id,
            amount_minor: entity.amount_minor,
            payment_method: entity.payment_method,
            status: entity.status,
            cancel_reason: entity.cancel_reason,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderMessageDto {
    pub id: Uuid,
    pub order_id: Uuid,
    pub sender_id: Uuid,
    pub body: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<OrderMessageEntity> for OrderMessageDto {
    fn from(entity: OrderMessageEntity) -> Self {
        Self {
            id: entity.id,
            order_id: entity.order_id,
            sender_id: entity.sender_id,
            body: entity.body,
            is_read: entity.is_read,
            created_at: entity.created_at,
        }
    }
}

fn generate_order_number() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ORDER_NUMBER_SUFFIX_LEN)
        .map(char::from)
        .collect();

    format!("ORD-{}", suffix.to_uppercase())
}

pub struct OrderUseCase<O, I, T>
where
    O: OrderRepository + Send + Sync + 'static,
    I: ItemRepository + Send + Sync + 'static,
    T: TalentProductRepository + Send + Sync + 'static,
{
    order_repository: Arc<O>,
    item_repository: Arc<I>,
    talent_product_repository: Arc<T>,
}

impl<O, I, T> OrderUseCase<O, I, T>
where
    O: OrderRepository + Send + Sync + 'static,
    I: ItemRepository + Send + Sync + 'static,
    T: TalentProductRepository + Send + Sync + 'static,
{
    pub fn new(
        order_repository: Arc<O>,
        item_repository: Arc<I>,
        talent_product_repository: Arc<T>,
    ) -> Self {
        Self {
            order_repository,
            item_repository,
            talent_product_repository,
        }
    }

    pub async fn create(
        &self,
        buyer_id: Uuid,
        model: InsertOrderModel,
    ) -> Result<OrderDto, AppError> {
        match model.order_type {
            OrderType::Item => self.create_item_order(buyer_id, model).await,
            OrderType::Talent => self.create_talent_order(buyer_id, model).await,
        }
    }

    async fn create_item_order(
        &self,
        buyer_id: Uuid,
        model: InsertOrderModel,
    ) -> Result<OrderDto, AppError> {
        let item_id = model.item_id.ok_or_else(|| {
            AppError::BadRequest("item_id is required for item orders".to_string())
        })?;

        let item = self
            .item_repository
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Item not found".to_string()))?;

        if item.seller_id == buyer_id {
            return Err(AppError::BadRequest(
                "You cannot buy your own listing".to_string(),
            ));
        }
        if item.status != ItemStatus::Available.to_string() {
            return Err(AppError::Conflict("Item is not available".to_string()));
        }

        let now = Utc::now();
        let entity = InsertOrderEntity {
            order_number: generate_order_number(),
            buyer_id,
            seller_id: item.seller_id,
            order_type: OrderType::Item.to_string(),
            item_id: Some(item_id),
            talent_product_id: None,
            amount_minor: item.price_minor,
            payment_method: model.payment_method.to_string(),
            status: OrderStatus::Pending.to_string(),
            created_at: now,
            updated_at: now,
        };

        // The reserve itself is a compare-and-swap; a concurrent buyer
        // loses here even though the read above saw `available`.
        let order = self
            .order_repository
            .create_item_order(entity, item_id)
            .await?
            .ok_or_else(|| {
                warn!(%item_id, %buyer_id, "orders: item taken by a concurrent order");
                AppError::Conflict("Item was just taken by another buyer".to_string())
            })?;

        info!(order_id = %order.id, %item_id, "orders: item order created");
        Ok(OrderDto::from(order))
    }

    async fn create_talent_order(
        &self,
        buyer_id: Uuid,
        model: InsertOrderModel,
    ) -> Result<OrderDto, AppError> {
        let talent_product_id = model.talent_product_id.ok_or_else(|| {
            AppError::BadRequest("talent_product_id is required for talent orders".to_string())
        })?;

        let talent_product = self
            .talent_product_repository
            .find_by_id(talent_product_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Talent listing not found".to_string()))?;

        if talent_product.seller_id == buyer_id {
            return Err(AppError::BadRequest(
                "You cannot order your own service".to_string(),
            ));
        }
        if talent_product.status != TalentStatus::Available.to_string() {
            return Err(AppError::Conflict(
                "This talent is not taking orders right now".to_string(),
            ));
        }

        let now = Utc::now();
        let order = self
            .order_repository
            .create_talent_order(InsertOrderEntity {
                order_number: generate_order_number(),
                buyer_id,
                seller_id: talent_product.seller_id,
                order_type: OrderType::Talent.to_string(),
                item_id: None,
                talent_product_id: Some(talent_product_id),
                amount_minor: talent_product.base_price_minor,
                payment_method: model.payment_method.to_string(),
                status: OrderStatus::Pending.to_string(),
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(order_id = %order.id, %talent_product_id, "orders: talent order created");
        Ok(OrderDto::from(order))
    }

    pub async fn get(&self, order_id: Uuid, caller_id: Uuid) -> Result<OrderDto, AppError> {
        let order = self.find_for_participant(order_id, caller_id).await?;
        Ok(OrderDto::from(order))
    }

    pub async fn list(
        &self,
        caller_id: Uuid,
        filter: ListOrdersFilter,
    ) -> Result<Vec<OrderDto>, AppError> {
        let orders = self.order_repository.list_for_user(caller_id, &filter).await?;
        Ok(orders.into_iter().map(OrderDto::from).collect())
    }

    pub async fn update_status(
        &self,
        order_id: Uuid,
        caller_id: Uuid,
        model: UpdateOrderStatusModel,
    ) -> Result<OrderDto, AppError> {
        let order = self.find_for_participant(order_id, caller_id).await?;
        let actor = if order.buyer_id == caller_id {
            OrderActor::Buyer
        } else {
            OrderActor::Seller
        };

        let from = OrderStatus::from_str(&order.status)?;
        let to = model.status;

        check_transition(from, to, actor).map_err(|err| match err {
            TransitionError::InvalidTransition => AppError::BadRequest(format!(
                "Order cannot go from {} to {}",
                from, to
            )),
            TransitionError::ActorNotAllowed => AppError::Forbidden(format!(
                "Your role in this order cannot mark it {}",
                to
            )),
        })?;

        let cancel_reason = match to {
            OrderStatus::Cancelled => model.cancel_reason,
            _ => None,
        };
        let side_effect = listing_side_effect(&order, to);

        let updated = self
            .order_repository
            .transition_status(order_id, from, to, cancel_reason, side_effect)
            .await?
            .ok_or_else(|| {
                warn!(%order_id, %from, %to, "orders: concurrent status change lost the race");
                AppError::Conflict("Order status changed underneath you, reload and retry".to_string())
            })?;

        info!(%order_id, %from, %to, "orders: status changed");
        Ok(OrderDto::from(updated))
    }

    pub async fn add_message(
        &self,
        order_id: Uuid,
        caller_id: Uuid,
        model: InsertOrderMessageModel,
    ) -> Result<OrderMessageDto, AppError> {
        if model.body.trim().is_empty() {
            return Err(AppError::BadRequest("Message body is required".to_string()));
        }

        self.find_for_participant(order_id, caller_id).await?;
        let message = self
            .order_repository
            .insert_message(InsertOrderMessageEntity {
                order_id,
                sender_id: caller_id,
                body: model.body.trim().to_string(),
                is_read: false,
                created_at: Utc::now(),
            })
            .await?;

        Ok(OrderMessageDto::from(message))
    }

    /// Listing the thread also marks the other side's messages as read.
    pub async fn list_messages(
        &self,
        order_id: Uuid,
        caller_id: Uuid,
    ) -> Result<Vec<OrderMessageDto>, AppError> {
        self.find_for_participant(order_id, caller_id).await?;
        self.order_repository
            .mark_messages_read(order_id, caller_id)
            .await?;

        let messages = self.order_repository.list_messages(order_id).await?;
        Ok(messages.into_iter().map(OrderMessageDto::from).collect())
    }

    async fn find_for_participant(
        &self,
        order_id: Uuid,
        caller_id: Uuid,
    ) -> Result<OrderEntity, AppError> {
        let order = self
            .order_repository
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

        if order.buyer_id != caller_id && order.seller_id != caller_id {
            return Err(AppError::Forbidden(
                "You are not a participant in this order".to_string(),
            ));
        }

        Ok(order)
    }
}

fn listing_side_effect(order: &OrderEntity, to: OrderStatus) -> OrderSideEffect {
    match (to, order.item_id, order.talent_product_id) {
        (OrderStatus::Cancelled, Some(item_id), _) => OrderSideEffect::ReleaseItem { item_id },
        (OrderStatus::Completed, Some(item_id), _) => OrderSideEffect::MarkItemSold {
            item_id,
            buyer_id: order.buyer_id,
        },
        (OrderStatus::Completed, None, Some(talent_product_id)) => {
            OrderSideEffect::BumpTalentOrders { talent_product_id }
        }
        _ => OrderSideEffect::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{
        entities::items::ItemEntity,
        repositories::{
            items::MockItemRepository, orders::MockOrderRepository,
            talent_products::MockTalentProductRepository,
        },
        value_objects::enums::payment_methods::PaymentMethod,
    };
    use mockall::predicate::eq;

    fn sample_item(seller_id: Uuid, status: ItemStatus) -> ItemEntity {
        let now = Utc::now();
        ItemEntity {
            id: Uuid::new_v4(),
            seller_id,
            title: "Bike".to_string(),
            description: String::new(),
            category: "sports".to_string(),
            price_minor: 250000,
            status: status.to_string(),
            reserved_by: None,
            reserved_at: None,
            sold_to: None,
            sold_at: None,
            likes_count: 0,
            reports_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_order(buyer_id: Uuid, seller_id: Uuid, status: OrderStatus) -> OrderEntity {
        let now = Utc::now();
        OrderEntity {
            id: Uuid::new_v4(),
            order_number: "ORD-TEST0001".to_string(),
            buyer_id,
            seller_id,
            order_type: OrderType::Item.to_string(),
            item_id: Some(Uuid::new_v4()),
            talent_product_id: None,
            amount_minor: 250000,
            payment_method: PaymentMethod::Razorpay.to_string(),
            status: status.to_string(),
            cancel_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn usecase(
        order_repo: MockOrderRepository,
        item_repo: MockItemRepository,
    ) -> OrderUseCase<MockOrderRepository, MockItemRepository, MockTalentProductRepository> {
        OrderUseCase::new(
            Arc::new(order_repo),
            Arc::new(item_repo),
            Arc::new(MockTalentProductRepository::new()),
        )
    }

    #[tokio::test]
    async fn create_rejects_buying_own_item() {
        let buyer_id = Uuid::new_v4();
        let item = sample_item(buyer_id, ItemStatus::Available);
        let item_id = item.id;

        let mut item_repo = MockItemRepository::new();
        item_repo
            .expect_find_by_id()
            .with(eq(item_id))
            .returning(move |_| {
                let item = item.clone();
                Box::pin(async move { Ok(Some(item)) })
            });

        let result = usecase(MockOrderRepository::new(), item_repo)
            .create(
                buyer_id,
                InsertOrderModel {
                    order_type: OrderType::Item,
                    item_id: Some(item_id),
                    talent_product_id: None,
                    payment_method: PaymentMethod::Razorpay,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn create_maps_lost_reservation_race_to_conflict() {
        let buyer_id = Uuid::new_v4();
        let item = sample_item(Uuid::new_v4(), ItemStatus::Available);
        let item_id = item.id;

        let mut item_repo = MockItemRepository::new();
        item_repo.expect_find_by_id().returning(move |_| {
            let item = item.clone();
            Box::pin(async move { Ok(Some(item)) })
        });

        let mut order_repo = MockOrderRepository::new();
        order_repo
            .expect_create_item_order()
            .returning(|_, _| Box::pin(async { Ok(None) }));

        let result = usecase(order_repo, item_repo)
            .create(
                buyer_id,
                InsertOrderModel {
                    order_type: OrderType::Item,
                    item_id: Some(item_id),
                    talent_product_id: None,
                    payment_method: PaymentMethod::Cash,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn update_status_rejects_invalid_transition() {
        let buyer_id = Uuid::new_v4();
        let order = sample_order(buyer_id, Uuid::new_v4(), OrderStatus::Pending);
        let order_id = order.id;

        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_find_by_id().returning(move |_| {
            let order = order.clone();
            Box::pin(async move { Ok(Some(order)) })
        });

        let result = usecase(order_repo, MockItemRepository::new())
            .update_status(
                order_id,
                buyer_id,
                UpdateOrderStatusModel {
                    status: OrderStatus::Completed,
                    cancel_reason: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn update_status_rejects_wrong_actor() {
        let seller_id = Uuid::new_v4();
        let order = sample_order(Uuid::new_v4(), seller_id, OrderStatus::Pending);
        let order_id = order.id;

        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_find_by_id().returning(move |_| {
            let order = order.clone();
            Box::pin(async move { Ok(Some(order)) })
        });

        // Only the buyer may mark an order paid.
        let result = usecase(order_repo, MockItemRepository::new())
            .update_status(
                order_id,
                seller_id,
                UpdateOrderStatusModel {
                    status: OrderStatus::Paid,
                    cancel_reason: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn update_status_rejects_non_participant() {
        let order = sample_order(Uuid::new_v4(), Uuid::new_v4(), OrderStatus::Pending);
        let order_id = order.id;

        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_find_by_id().returning(move |_| {
            let order = order.clone();
            Box::pin(async move { Ok(Some(order)) })
        });

        let result = usecase(order_repo, MockItemRepository::new())
            .update_status(
                order_id,
                Uuid::new_v4(),
                UpdateOrderStatusModel {
                    status: OrderStatus::Cancelled,
                    cancel_reason: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn update_status_maps_cas_miss_to_conflict() {
        let buyer_id = Uuid::new_v4();
        let order = sample_order(buyer_id, Uuid::new_v4(), OrderStatus::Pending);
        let order_id = order.id;

        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_find_by_id().returning(move |_| {
            let order = order.clone();
            Box::pin(async move { Ok(Some(order)) })
        });
        order_repo
            .expect_transition_status()
            .returning(|_, _, _, _, _| Box::pin(async { Ok(None) }));

        let result = usecase(order_repo, MockItemRepository::new())
            .update_status(
                order_id,
                buyer_id,
                UpdateOrderStatusModel {
                    status: OrderStatus::Paid,
                    cancel_reason: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn cancelling_item_order_releases_the_item() {
        let buyer_id = Uuid::new_v4();
        let order = sample_order(buyer_id, Uuid::new_v4(), OrderStatus::Pending);
        let order_id = order.id;
        let item_id = order.item_id.unwrap();

        let mut order_repo = MockOrderRepository::new();
        {
            let order = order.clone();
            order_repo.expect_find_by_id().returning(move |_| {
                let order = order.clone();
                Box::pin(async move { Ok(Some(order)) })
            });
        }
        order_repo
            .expect_transition_status()
            .with(
                eq(order_id),
                eq(OrderStatus::Pending),
                eq(OrderStatus::Cancelled),
                eq(Some("changed my mind".to_string())),
                eq(OrderSideEffect::ReleaseItem { item_id }),
            )
            .times(1)
            .returning(move |_, _, _, _, _| {
                let mut updated = order.clone();
                updated.status = OrderStatus::Cancelled.to_string();
                Box::pin(async move { Ok(Some(updated)) })
            });

        let result = usecase(order_repo, MockItemRepository::new())
            .update_status(
                order_id,
                buyer_id,
                UpdateOrderStatusModel {
                    status: OrderStatus::Cancelled,
                    cancel_reason: Some("changed my mind".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(result.status, OrderStatus::Cancelled.to_string());
    }
}
