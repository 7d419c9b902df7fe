use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::value_objects::payments::{GatewayOrder, GatewayRefund};

/// Port over the payment gateway so use cases stay testable offline.
#[async_trait]
#[automock]
pub trait PaymentGateway {
    /// Public key the client needs to open checkout.
    fn key_id(&self) -> String;
    async fn create_order(
        &self,
        amount_minor: i32,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder>;
    /// Checks the checkout callback signature; no state is touched on failure.
    fn verify_checkout_signature(
        &self,
        provider_order_id: &str,
        provider_payment_id: &str,
        signature: &str,
    ) -> Result<()>;
    async fn refund(&self, provider_payment_ref: &str, amount_minor: i32)
        -> Result<GatewayRefund>;
}
