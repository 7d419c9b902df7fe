use serde::Deserialize;
use uuid::Uuid;

use crate::value_objects::enums::{
    order_statuses::OrderStatus, order_types::OrderType, payment_methods::PaymentMethod,
};

#[derive(Debug, Clone, Deserialize)]
pub struct InsertOrderModel {
    pub order_type: OrderType,
    pub item_id: Option<Uuid>,
    pub talent_product_id: Option<Uuid>,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderStatusModel {
    pub status: OrderStatus,
    pub cancel_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsertOrderMessageModel {
    pub body: String,
}

/// Listing write that must land in the same transaction as a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSideEffect {
    None,
    /// Cancelled item order: the item goes back to `available`.
    ReleaseItem { item_id: Uuid },
    /// Completed item order: the item is marked sold to the buyer.
    MarkItemSold { item_id: Uuid, buyer_id: Uuid },
    /// Completed talent order: bump the listing's order counter.
    BumpTalentOrders { talent_product_id: Uuid },
}

/// Which side of the order the caller wants listed.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderRoleFilter {
    Buyer,
    Seller,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListOrdersFilter {
    pub role: Option<OrderRoleFilter>,
    pub status: Option<OrderStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
