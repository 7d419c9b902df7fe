use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCheckoutModel {
    pub order_id: Uuid,
}

/// Gateway callback payload forwarded by the client after checkout.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyCheckoutModel {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisputePaymentModel {
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefundPaymentModel {
    pub amount_minor: i32,
    pub reason: String,
}

/// Gateway-side order created ahead of client checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GatewayOrder {
    pub provider_order_id: String,
    pub amount_minor: i32,
    pub currency: String,
}

/// Gateway-side refund acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GatewayRefund {
    pub provider_refund_id: String,
    pub amount_minor: i32,
}
