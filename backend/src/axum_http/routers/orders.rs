use crate::auth::AuthUser;
use crate::axum_http::{
    api_response::{ApiResponse, created},
    error_responses::AppError,
};
use crate::usecases::orders::OrderUseCase;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post, put},
};
use domain::{
    repositories::{
        items::ItemRepository, orders::OrderRepository,
        talent_products::TalentProductRepository,
    },
    value_objects::orders::{
        InsertOrderMessageModel, InsertOrderModel, ListOrdersFilter, UpdateOrderStatusModel,
    },
};
use infra::postgres::{
    postgres_connection::PgPoolSquad,
    repositories::{
        items::ItemPostgres, orders::OrderPostgres, talent_products::TalentProductPostgres,
    },
};
use std::sync::Arc;
use uuid::Uuid;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let order_repository = OrderPostgres::new(Arc::clone(&db_pool));
    let item_repository = ItemPostgres::new(Arc::clone(&db_pool));
    let talent_product_repository = TalentProductPostgres::new(Arc::clone(&db_pool));
    let order_usecase = OrderUseCase::new(
        Arc::new(order_repository),
        Arc::new(item_repository),
        Arc::new(talent_product_repository),
    );

    Router::new()
        .route("/", post(create).get(list))
        .route("/:order_id", get(get_one))
        .route("/:order_id/status", put(update_status))
        .route("/:order_id/messages", post(add_message).get(list_messages))
        .with_state(Arc::new(order_usecase))
}

pub async fn create<O, I, T>(
    State(order_usecase): State<Arc<OrderUseCase<O, I, T>>>,
    auth: AuthUser,
    Json(insert_order_model): Json<InsertOrderModel>,
) -> Result<impl IntoResponse, AppError>
where
    O: OrderRepository + Send + Sync + 'static,
    I: ItemRepository + Send + Sync + 'static,
    T: TalentProductRepository + Send + Sync + 'static,
{
    let order = order_usecase.create(auth.user_id, insert_order_model).await?;
    Ok(created(order))
}

pub async fn list<O, I, T>(
    State(order_usecase): State<Arc<OrderUseCase<O, I, T>>>,
    auth: AuthUser,
    Query(filter): Query<ListOrdersFilter>,
) -> Result<impl IntoResponse, AppError>
where
    O: OrderRepository + Send + Sync + 'static,
    I: ItemRepository + Send + Sync + 'static,
    T: TalentProductRepository + Send + Sync + 'static,
{
    let orders = order_usecase.list(auth.user_id, filter).await?;
    Ok(ApiResponse::ok(orders))
}

pub async fn get_one<O, I, T>(
    State(order_usecase): State<Arc<OrderUseCase<O, I, T>>>,
    Path(order_id): Path<Uuid>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    O: OrderRepository + Send + Sync + 'static,
    I: ItemRepository + Send + Sync + 'static,
    T: TalentProductRepository + Send + Sync + 'static,
{
    let order = order_usecase.get(order_id, auth.user_id).await?;
    Ok(ApiResponse::ok(order))
}

pub async fn update_status<O, I, T>(
    State(order_usecase): State<Arc<OrderUseCase<O, I, T>>>,
    Path(order_id): Path<Uuid>,
    auth: AuthUser,
    Json(update_order_status_model): Json<UpdateOrderStatusModel>,
) -> Result<impl IntoResponse, AppError>
where
    O: OrderRepository + Send + Sync + 'static,
    I: ItemRepository + Send + Sync + 'static,
    T: TalentProductRepository + Send + Sync + 'static,
{
    let order = order_usecase
        .update_status(order_id, auth.user_id, update_order_status_model)
        .await?;
    Ok(ApiResponse::ok(order))
}

pub async fn add_message<O, I, T>(
    State(order_usecase): State<Arc<OrderUseCase<O, I, T>>>,
    Path(order_id): Path<Uuid>,
    auth: AuthUser,
    Json(insert_order_message_model): Json<InsertOrderMessageModel>,
) -> Result<impl IntoResponse, AppError>
where
    O: OrderRepository + Send + Sync + 'static,
    I: ItemRepository + Send + Sync + 'static,
    T: TalentProductRepository + Send + Sync + 'static,
{
    let message = order_usecase
        .add_message(order_id, auth.user_id, insert_order_message_model)
        .await?;
    Ok(created(message))
}

pub async fn list_messages<O, I, T>(
    State(order_usecase): State<Arc<OrderUseCase<O, I, T>>>,
    Path(order_id): Path<Uuid>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    O: OrderRepository + Send + Sync + 'static,
    I: ItemRepository + Send + Sync + 'static,
    T: TalentProductRepository + Send + Sync + 'static,
{
    let messages = order_usecase.list_messages(order_id, auth.user_id).await?;
    Ok(ApiResponse::ok(messages))
}
