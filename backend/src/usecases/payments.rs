use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::{
    entities::payments::{InsertPaymentEntity, PaymentEntity},
    repositories::{
        orders::OrderRepository, payment_gateway::PaymentGateway, payments::PaymentRepository,
    },
    value_objects::{
        commission_math::{DEFAULT_COMMISSION_RATE_BPS, split_payment},
        enums::{
            escrow_statuses::EscrowStatus, order_statuses::OrderStatus,
            payment_methods::PaymentMethod, payment_statuses::PaymentStatus,
        },
        payments::{
            CreateCheckoutModel, DisputePaymentModel, RefundPaymentModel, VerifyCheckoutModel,
        },
    },
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::axum_http::error_responses::AppError;

const CHECKOUT_CURRENCY: &str = "INR";

#[derive(Debug, Clone, Serialize)]
pub struct PaymentDto {
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
}

impl From<PaymentEntity> for PaymentDto {
    fn from(entity: PaymentEntity) -> Self {
        Self {
            id: entity.id,
            order_id: entity.order_id,
            buyer_id: entity.buyer_id,
            seller_id: entity.seller_id,
            total_amount_minor: entity.total_amount_minor,
            commission_rate_bps: entity.commission_rate_bps,
            platform_commission_minor: entity.platform_commission_minor,
            seller_amount_minor: entity.seller_amount_minor,
            status: entity.status,
            escrow_status: entity.escrow_status,
            provider_order_ref: entity.provider_order_ref,
            provider_payment_ref: entity.provider_payment_ref,
            delivery_confirmed_at: entity.delivery_confirmed_at,
            dispute_reason: entity.dispute_reason,
            disputed_at: entity.disputed_at,
            refund_amount_minor: entity.refund_amount_minor,
            refund_reason: entity.refund_reason,
            refunded_at: entity.refunded_at,
            created_at: entity.created_at,
        }
    }
}

/// Everything the client needs to open the gateway's checkout widget.
#[derive(Debug, Serialize)]
pub struct CheckoutDto {
    pub key_id: String,
    pub provider_order_id: String,
    pub amount_minor: i32,
    pub currency: String,
}

pub struct PaymentUseCase<P, O, G>
where
    P: PaymentRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    payment_repository: Arc<P>,
    order_repository: Arc<O>,
    payment_gateway: Arc<G>,
}

impl<P, O, G> PaymentUseCase<P, O, G>
where
    P: PaymentRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    pub fn new(payment_repository: Arc<P>, order_repository: Arc<O>, payment_gateway: Arc<G>) -> Self {
        Self {
            payment_repository,
            order_repository,
            payment_gateway,
        }
    }

    pub async fn create_checkout(
        &self,
        caller_id: Uuid,
        model: CreateCheckoutModel,
    ) -> Result<CheckoutDto, AppError> {
        let order = self
            .order_repository
            .find_by_id(model.order_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

        if order.buyer_id != caller_id {
            return Err(AppError::Forbidden(
                "Only the buyer can pay for this order".to_string(),
            ));
        }
        if order.status != OrderStatus::Pending.to_string() {
            return Err(AppError::BadRequest(
                "Only pending orders can be paid".to_string(),
            ));
        }
        if order.payment_method != PaymentMethod::Razorpay.to_string() {
            return Err(AppError::BadRequest(
                "This order is not set up for gateway checkout".to_string(),
            ));
        }
        if self
            .payment_repository
            .find_by_order(order.id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "A payment already exists for this order".to_string(),
            ));
        }

        let gateway_order = self
            .payment_gateway
            .create_order(order.amount_minor, CHECKOUT_CURRENCY, &order.order_number)
            .await?;

        let split = split_payment(order.amount_minor, DEFAULT_COMMISSION_RATE_BPS);
        let now = Utc::now();
        self.payment_repository
            .insert(InsertPaymentEntity {
                order_id: order.id,
                buyer_id: order.buyer_id,
                seller_id: order.seller_id,
                total_amount_minor: order.amount_minor,
                commission_rate_bps: DEFAULT_COMMISSION_RATE_BPS,
                platform_commission_minor: split.platform_commission_minor,
                seller_amount_minor: split.seller_amount_minor,
                status: PaymentStatus::Pending.to_string(),
                escrow_status: EscrowStatus::Held.to_string(),
                provider_order_ref: Some(gateway_order.provider_order_id.clone()),
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(order_id = %order.id, "payments: checkout created");
        Ok(CheckoutDto {
            key_id: self.payment_gateway.key_id(),
            provider_order_id: gateway_order.provider_order_id,
            amount_minor: gateway_order.amount_minor,
            currency: gateway_order.currency,
        })
    }

    pub async fn verify_checkout(
        &self,
        caller_id: Uuid,
        model: VerifyCheckoutModel,
    ) -> Result<PaymentDto, AppError> {
        let payment = self
            .payment_repository
            .find_by_provider_order_ref(&model.razorpay_order_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("No payment matches this gateway order".to_string())
            })?;

        if payment.buyer_id != caller_id {
            return Err(AppError::Forbidden(
                "Only the buyer can verify this payment".to_string(),
            ));
        }

        // Nothing is written unless the signature checks out.
        if let Err(err) = self.payment_gateway.verify_checkout_signature(
            &model.razorpay_order_id,
            &model.razorpay_payment_id,
            &model.razorpay_signature,
        ) {
            warn!(payment_id = %payment.id, error = %err, "payments: signature verification failed");
            return Err(AppError::BadRequest(
                "Payment signature verification failed".to_string(),
            ));
        }

        let completed = self
            .payment_repository
            .mark_checkout_completed(payment.id, model.razorpay_payment_id)
            .await?
            .ok_or_else(|| {
                AppError::Conflict("Payment or order already moved on".to_string())
            })?;

        info!(payment_id = %completed.id, "payments: checkout verified, escrow held");
        Ok(PaymentDto::from(completed))
    }

    /// Buyer confirms delivery; escrow is released to the seller and a
    /// delivered order completes in the same transaction.
    pub async fn confirm_delivery(
        &self,
        payment_id: Uuid,
        caller_id: Uuid,
    ) -> Result<PaymentDto, AppError> {
        let payment = self.find_existing(payment_id).await?;
        if payment.buyer_id != caller_id {
            return Err(AppError::Forbidden(
                "Only the buyer can confirm delivery".to_string(),
            ));
        }

        let released = self
            .payment_repository
            .release_escrow(payment_id)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest("Escrow is not held for this payment".to_string())
            })?;

        info!(%payment_id, "payments: escrow released");
        Ok(PaymentDto::from(released))
    }

    pub async fn dispute(
        &self,
        payment_id: Uuid,
        caller_id: Uuid,
        model: DisputePaymentModel,
    ) -> Result<PaymentDto, AppError> {
        if model.reason.trim().is_empty() {
            return Err(AppError::BadRequest("A dispute reason is required".to_string()));
        }

        let payment = self.find_existing(payment_id).await?;
        if payment.buyer_id != caller_id && payment.seller_id != caller_id {
            return Err(AppError::Forbidden(
                "You are not a participant in this payment".to_string(),
            ));
        }

        let disputed = self
            .payment_repository
            .raise_dispute(payment_id, model.reason.trim().to_string())
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(
                    "Only completed payments with escrow held can be disputed".to_string(),
                )
            })?;

        info!(%payment_id, "payments: dispute raised");
        Ok(PaymentDto::from(disputed))
    }

    /// Admin-only. Refundability is checked before the gateway is touched, so
    /// a released or already-refunded payment never triggers a provider
    /// refund; the repository re-checks the same condition when it records,
    /// which catches a concurrent release.
    pub async fn refund(
        &self,
        payment_id: Uuid,
        model: RefundPaymentModel,
    ) -> Result<PaymentDto, AppError> {
        if model.reason.trim().is_empty() {
            return Err(AppError::BadRequest("A refund reason is required".to_string()));
        }

        let payment = self.find_existing(payment_id).await?;
        let refundable = (payment.status == PaymentStatus::Completed.to_string()
            || payment.status == PaymentStatus::Disputed.to_string())
            && payment.escrow_status == EscrowStatus::Held.to_string();
        if !refundable {
            return Err(AppError::BadRequest(
                "Only completed or disputed payments with escrow held can be refunded".to_string(),
            ));
        }
        if model.amount_minor <= 0 || model.amount_minor > payment.total_amount_minor {
            return Err(AppError::BadRequest(format!(
                "Refund amount must be between 1 and {}",
                payment.total_amount_minor
            )));
        }
        let provider_payment_ref = payment.provider_payment_ref.as_deref().ok_or_else(|| {
            AppError::BadRequest("Payment was never captured by the gateway".to_string())
        })?;

        let gateway_refund = self
            .payment_gateway
            .refund(provider_payment_ref, model.amount_minor)
            .await?;

        let refunded = self
            .payment_repository
            .record_refund(
                payment_id,
                model.amount_minor,
                model.reason.trim().to_string(),
            )
            .await?
            .ok_or_else(|| {
                AppError::Conflict("Payment is not in a refundable state".to_string())
            })?;

        info!(
            %payment_id,
            provider_refund_id = %gateway_refund.provider_refund_id,
            "payments: refund recorded"
        );
        Ok(PaymentDto::from(refunded))
    }

    pub async fn get_by_order(
        &self,
        order_id: Uuid,
        caller_id: Uuid,
    ) -> Result<PaymentDto, AppError> {
        let payment = self
            .payment_repository
            .find_by_order(order_id)
            .await?
            .ok_or_else(|| AppError::NotFound("No payment for this order".to_string()))?;

        if payment.buyer_id != caller_id && payment.seller_id != caller_id {
            return Err(AppError::Forbidden(
                "You are not a participant in this payment".to_string(),
            ));
        }

        Ok(PaymentDto::from(payment))
    }

    async fn find_existing(&self, payment_id: Uuid) -> Result<PaymentEntity, AppError> {
        self.payment_repository
            .find_by_id(payment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Payment not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{
        entities::orders::OrderEntity,
        repositories::{
            orders::MockOrderRepository, payment_gateway::MockPaymentGateway,
            payments::MockPaymentRepository,
        },
        value_objects::{
            enums::order_types::OrderType,
            payments::{GatewayOrder, GatewayRefund},
        },
    };
    use mockall::predicate::eq;

    fn sample_order(
        buyer_id: Uuid,
        status: OrderStatus,
        payment_method: PaymentMethod,
    ) -> OrderEntity {
        let now = Utc::now();
        OrderEntity {
            id: Uuid::new_v4(),
            order_number: "ORD-TEST0001".to_string(),
            buyer_id,
            seller_id: Uuid::new_v4(),
            order_type: OrderType::Item.to_string(),
            item_id: Some(Uuid::new_v4()),
            talent_product_id: None,
            amount_minor: 100000,
            payment_method: payment_method.to_string(),
            status: status.to_string(),
            cancel_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_payment(buyer_id: Uuid, status: PaymentStatus) -> PaymentEntity {
        let now = Utc::now();
        let split = split_payment(100000, DEFAULT_COMMISSION_RATE_BPS);
        PaymentEntity {
            id: Uuid::new_v4(),
            order_id: Uuid::new_v4(),
            buyer_id,
            seller_id: Uuid::new_v4(),
            total_amount_minor: 100000,
            commission_rate_bps: DEFAULT_COMMISSION_RATE_BPS,
            platform_commission_minor: split.platform_commission_minor,
            seller_amount_minor: split.seller_amount_minor,
            status: status.to_string(),
            escrow_status: EscrowStatus::Held.to_string(),
            provider_order_ref: Some("order_test123".to_string()),
            provider_payment_ref: Some("pay_test123".to_string()),
            delivery_confirmed_at: None,
            dispute_reason: None,
            disputed_at: None,
            refund_amount_minor: None,
            refund_reason: None,
            refunded_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn usecase(
        payment_repo: MockPaymentRepository,
        order_repo: MockOrderRepository,
        gateway: MockPaymentGateway,
    ) -> PaymentUseCase<MockPaymentRepository, MockOrderRepository, MockPaymentGateway> {
        PaymentUseCase::new(Arc::new(payment_repo), Arc::new(order_repo), Arc::new(gateway))
    }

    #[tokio::test]
    async fn create_checkout_stores_commission_split() {
        let buyer_id = Uuid::new_v4();
        let order = sample_order(buyer_id, OrderStatus::Pending, PaymentMethod::Razorpay);
        let order_id = order.id;

        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_find_by_id().returning(move |_| {
            let order = order.clone();
            Box::pin(async move { Ok(Some(order)) })
        });

        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_find_by_order()
            .with(eq(order_id))
            .returning(|_| Box::pin(async { Ok(None) }));
        payment_repo
            .expect_insert()
            .withf(|entity| {
                entity.total_amount_minor == 100000
                    && entity.platform_commission_minor == 3000
                    && entity.seller_amount_minor == 97000
                    && entity.escrow_status == "held"
            })
            .times(1)
            .returning(|entity| {
                Box::pin(async move {
                    let now = Utc::now();
                    Ok(PaymentEntity {
                        id: Uuid::new_v4(),
                        order_id: entity.order_id,
                        buyer_id: entity.buyer_id,
                        seller_id: entity.seller_id,
                        total_amount_minor: entity.total_amount_minor,
                        commission_rate_bps: entity.commission_rate_bps,
                        platform_commission_minor: entity.platform_commission_minor,
                        seller_amount_minor: entity.seller_amount_minor,
                        status: entity.status,
                        escrow_status: entity.escrow_status,
                        provider_order_ref: entity.provider_order_ref,
                        provider_payment_ref: None,
                        delivery_confirmed_at: None,
                        dispute_reason: None,
                        disputed_at: None,
                        refund_amount_minor: None,
                        refund_reason: None,
                        refunded_at: None,
                        created_at: now,
                        updated_at: now,
                    })
                })
            });

        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_create_order()
            .returning(|amount_minor, currency, _| {
                let currency = currency.to_string();
                Box::pin(async move {
                    Ok(GatewayOrder {
                        provider_order_id: "order_test123".to_string(),
                        amount_minor,
                        currency,
                    })
                })
            });
        gateway.expect_key_id().returning(|| "rzp_test_key".to_string());

        let checkout = usecase(payment_repo, order_repo, gateway)
            .create_checkout(buyer_id, CreateCheckoutModel { order_id })
            .await
            .unwrap();

        assert_eq!(checkout.provider_order_id, "order_test123");
        assert_eq!(checkout.key_id, "rzp_test_key");
    }

    #[tokio::test]
    async fn create_checkout_rejects_non_gateway_order() {
        let buyer_id = Uuid::new_v4();
        let order = sample_order(buyer_id, OrderStatus::Pending, PaymentMethod::Cash);
        let order_id = order.id;

        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_find_by_id().returning(move |_| {
            let order = order.clone();
            Box::pin(async move { Ok(Some(order)) })
        });

        let result = usecase(
            MockPaymentRepository::new(),
            order_repo,
            MockPaymentGateway::new(),
        )
        .create_checkout(buyer_id, CreateCheckoutModel { order_id })
        .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn verify_checkout_writes_nothing_on_bad_signature() {
        let buyer_id = Uuid::new_v4();
        let payment = sample_payment(buyer_id, PaymentStatus::Pending);

        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_find_by_provider_order_ref()
            .returning(move |_| {
                let payment = payment.clone();
                Box::pin(async move { Ok(Some(payment)) })
            });
        payment_repo.expect_mark_checkout_completed().times(0);

        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_verify_checkout_signature()
            .returning(|_, _, _| Err(anyhow::anyhow!("signature mismatch")));

        let result = usecase(payment_repo, MockOrderRepository::new(), gateway)
            .verify_checkout(
                buyer_id,
                VerifyCheckoutModel {
                    razorpay_order_id: "order_test123".to_string(),
                    razorpay_payment_id: "pay_test123".to_string(),
                    razorpay_signature: "deadbeef".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn verify_checkout_maps_cas_miss_to_conflict() {
        let buyer_id = Uuid::new_v4();
        let payment = sample_payment(buyer_id, PaymentStatus::Pending);

        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_find_by_provider_order_ref()
            .returning(move |_| {
                let payment = payment.clone();
                Box::pin(async move { Ok(Some(payment)) })
            });
        payment_repo
            .expect_mark_checkout_completed()
            .returning(|_, _| Box::pin(async { Ok(None) }));

        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_verify_checkout_signature()
            .returning(|_, _, _| Ok(()));

        let result = usecase(payment_repo, MockOrderRepository::new(), gateway)
            .verify_checkout(
                buyer_id,
                VerifyCheckoutModel {
                    razorpay_order_id: "order_test123".to_string(),
                    razorpay_payment_id: "pay_test123".to_string(),
                    razorpay_signature: "deadbeef".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn confirm_delivery_is_buyer_only() {
        let payment = sample_payment(Uuid::new_v4(), PaymentStatus::Completed);
        let payment_id = payment.id;
        let seller_id = payment.seller_id;

        let mut payment_repo = MockPaymentRepository::new();
        payment_repo.expect_find_by_id().returning(move |_| {
            let payment = payment.clone();
            Box::pin(async move { Ok(Some(payment)) })
        });

        let result = usecase(
            payment_repo,
            MockOrderRepository::new(),
            MockPaymentGateway::new(),
        )
        .confirm_delivery(payment_id, seller_id)
        .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn refund_rejects_amount_above_total() {
        let payment = sample_payment(Uuid::new_v4(), PaymentStatus::Disputed);
        let payment_id = payment.id;

        let mut payment_repo = MockPaymentRepository::new();
        payment_repo.expect_find_by_id().returning(move |_| {
            let payment = payment.clone();
            Box::pin(async move { Ok(Some(payment)) })
        });

        let result = usecase(
            payment_repo,
            MockOrderRepository::new(),
            MockPaymentGateway::new(),
        )
        .refund(
            payment_id,
            RefundPaymentModel {
                amount_minor: 100001,
                reason: "damaged".to_string(),
            },
        )
        .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn refund_after_escrow_release_never_reaches_the_gateway() {
        let mut payment = sample_payment(Uuid::new_v4(), PaymentStatus::Completed);
        payment.escrow_status = EscrowStatus::Released.to_string();
        let payment_id = payment.id;

        let mut payment_repo = MockPaymentRepository::new();
        payment_repo.expect_find_by_id().returning(move |_| {
            let payment = payment.clone();
            Box::pin(async move { Ok(Some(payment)) })
        });
        payment_repo.expect_record_refund().times(0);

        let mut gateway = MockPaymentGateway::new();
        gateway.expect_refund().times(0);

        let result = usecase(payment_repo, MockOrderRepository::new(), gateway)
            .refund(
                payment_id,
                RefundPaymentModel {
                    amount_minor: 40000,
                    reason: "damaged".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn refund_calls_gateway_before_recording() {
        let payment = sample_payment(Uuid::new_v4(), PaymentStatus::Disputed);
        let payment_id = payment.id;

        let mut payment_repo = MockPaymentRepository::new();
        {
            let payment = payment.clone();
            payment_repo.expect_find_by_id().returning(move |_| {
                let payment = payment.clone();
                Box::pin(async move { Ok(Some(payment)) })
            });
        }
        payment_repo
            .expect_record_refund()
            .with(eq(payment_id), eq(40000), eq("damaged".to_string()))
            .times(1)
            .returning(move |_, _, _| {
                let mut refunded = payment.clone();
                refunded.status = PaymentStatus::Refunded.to_string();
                refunded.refund_amount_minor = Some(40000);
                Box::pin(async move { Ok(Some(refunded)) })
            });

        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_refund()
            .with(eq("pay_test123"), eq(40000))
            .times(1)
            .returning(|_, amount_minor| {
                Box::pin(async move {
                    Ok(GatewayRefund {
                        provider_refund_id: "rfnd_test123".to_string(),
                        amount_minor,
                    })
                })
            });

        let refunded = usecase(payment_repo, MockOrderRepository::new(), gateway)
            .refund(
                payment_id,
                RefundPaymentModel {
                    amount_minor: 40000,
                    reason: "damaged".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(refunded.status, PaymentStatus::Refunded.to_string());
    }
}
