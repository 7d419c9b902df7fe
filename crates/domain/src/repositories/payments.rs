use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::entities::payments::{InsertPaymentEntity, PaymentEntity};

#[async_trait]
#[automock]
pub trait PaymentRepository {
    async fn insert(&self, payment_entity: InsertPaymentEntity) -> Result<PaymentEntity>;
    async fn find_by_id(&self, payment_id: Uuid) -> Result<Option<PaymentEntity>>;
    async fn find_by_order(&self, order_id: Uuid) -> Result<Option<PaymentEntity>>;
    async fn find_by_provider_order_ref(
        &self,
        provider_order_ref: &str,
    ) -> Result<Option<PaymentEntity>>;
    /// Marks the payment `completed` and the order `paid` in one
    /// transaction, both compare-and-swap. `None` means either row had
    /// already moved on.
    async fn mark_checkout_completed(
        &self,
        payment_id: Uuid,
        provider_payment_ref: String,
    ) -> Result<Option<PaymentEntity>>;
    /// Releases escrow (`held -> released`) and, when the order is
    /// `delivered`, completes it with its listing side effect, all in one
    /// transaction. `None` means escrow was not held anymore.
    async fn release_escrow(&self, payment_id: Uuid) -> Result<Option<PaymentEntity>>;
    /// Flags the payment `disputed` while escrow is still held.
    async fn raise_dispute(
        &self,
        payment_id: Uuid,
        reason: String,
    ) -> Result<Option<PaymentEntity>>;
    /// Records a gateway refund: payment `refunded`, escrow `refunded`, and
    /// the order `refunded`, in one transaction.
    async fn record_refund(
        &self,
        payment_id: Uuid,
        amount_minor: i32,
        reason: String,
    ) -> Result<Option<PaymentEntity>>;
}
