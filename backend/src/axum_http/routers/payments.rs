use crate::auth::{AdminUser, AuthUser};
use crate::axum_http::{
    api_response::{ApiResponse, created},
    error_responses::AppError,
};
use crate::config::config_model::DotEnvyConfig;
use crate::usecases::payments::PaymentUseCase;
use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use domain::{
    repositories::{
        orders::OrderRepository, payment_gateway::PaymentGateway, payments::PaymentRepository,
    },
    value_objects::payments::{
        CreateCheckoutModel, DisputePaymentModel, RefundPaymentModel, VerifyCheckoutModel,
    },
};
use infra::{
    gateway::razorpay::RazorpayClient,
    postgres::{
        postgres_connection::PgPoolSquad,
        repositories::{orders::OrderPostgres, payments::PaymentPostgres},
    },
};
use std::sync::Arc;
use uuid::Uuid;

pub fn routes(db_pool: Arc<PgPoolSquad>, config: Arc<DotEnvyConfig>) -> Router {
    let payment_repository = PaymentPostgres::new(Arc::clone(&db_pool));
    let order_repository = OrderPostgres::new(Arc::clone(&db_pool));
    let razorpay_client = RazorpayClient::new(
        config.razorpay.key_id.clone(),
        config.razorpay.key_secret.clone(),
    );
    let payment_usecase = PaymentUseCase::new(
        Arc::new(payment_repository),
        Arc::new(order_repository),
        Arc::new(razorpay_client),
    );

    Router::new()
        .route("/create-order", post(create_checkout))
        .route("/verify", post(verify_checkout))
        .route("/order/:order_id", get(get_by_order))
        .route("/:payment_id/confirm-delivery", post(confirm_delivery))
        .route("/:payment_id/dispute", post(dispute))
        .route("/:payment_id/refund", post(refund))
        .with_state(Arc::new(payment_usecase))
}

pub async fn create_checkout<P, O, G>(
    State(payment_usecase): State<Arc<PaymentUseCase<P, O, G>>>,
    auth: AuthUser,
    Json(create_checkout_model): Json<CreateCheckoutModel>,
) -> Result<impl IntoResponse, AppError>
where
    P: PaymentRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    let checkout = payment_usecase
        .create_checkout(auth.user_id, create_checkout_model)
        .await?;
    Ok(created(checkout))
}

pub async fn verify_checkout<P, O, G>(
    State(payment_usecase): State<Arc<PaymentUseCase<P, O, G>>>,
    auth: AuthUser,
    Json(verify_checkout_model): Json<VerifyCheckoutModel>,
) -> Result<impl IntoResponse, AppError>
where
    P: PaymentRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    let payment = payment_usecase
        .verify_checkout(auth.user_id, verify_checkout_model)
        .await?;
    Ok(ApiResponse::ok(payment))
}

pub async fn get_by_order<P, O, G>(
    State(payment_usecase): State<Arc<PaymentUseCase<P, O, G>>>,
    Path(order_id): Path<Uuid>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    P: PaymentRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    let payment = payment_usecase.get_by_order(order_id, auth.user_id).await?;
    Ok(ApiResponse::ok(payment))
}

pub async fn confirm_delivery<P, O, G>(
    State(payment_usecase): State<Arc<PaymentUseCase<P, O, G>>>,
    Path(payment_id): Path<Uuid>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    P: PaymentRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    let payment = payment_usecase
        .confirm_delivery(payment_id, auth.user_id)
        .await?;
    Ok(ApiResponse::ok(payment))
}

pub async fn dispute<P, O, G>(
    State(payment_usecase): State<Arc<PaymentUseCase<P, O, G>>>,
    Path(payment_id): Path<Uuid>,
    auth: AuthUser,
    Json(dispute_payment_model): Json<DisputePaymentModel>,
) -> Result<impl IntoResponse, AppError>
where
    P: PaymentRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    let payment = payment_usecase
        .dispute(payment_id, auth.user_id, dispute_payment_model)
        .await?;
    Ok(ApiResponse::ok(payment))
}

pub async fn refund<P, O, G>(
    State(payment_usecase): State<Arc<PaymentUseCase<P, O, G>>>,
    Path(payment_id): Path<Uuid>,
    _admin: AdminUser,
    Json(refund_payment_model): Json<RefundPaymentModel>,
) -> Result<impl IntoResponse, AppError>
where
    P: PaymentRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    let payment = payment_usecase
        .refund(payment_id, refund_payment_model)
        .await?;
    Ok(ApiResponse::ok(payment))
}
