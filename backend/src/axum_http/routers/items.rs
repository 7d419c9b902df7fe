use crate::auth::AuthUser;
use crate::axum_http::{
    api_response::{ApiResponse, created},
    error_responses::AppError,
};
use crate::usecases::items::ItemUseCase;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
};
use domain::{
    repositories::items::ItemRepository,
    value_objects::items::{InsertItemModel, ListItemsFilter, ReportItemModel, UpdateItemModel},
};
use infra::postgres::{postgres_connection::PgPoolSquad, repositories::items::ItemPostgres};
use std::sync::Arc;
use uuid::Uuid;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let item_repository = ItemPostgres::new(Arc::clone(&db_pool));
    let item_usecase = ItemUseCase::new(Arc::new(item_repository));

    Router::new()
        .route("/", post(create).get(list))
        .route("/:item_id", get(get_one).put(update).delete(remove))
        .route("/:item_id/report", post(report))
        .route("/:item_id/like", post(toggle_like))
        .with_state(Arc::new(item_usecase))
}

pub async fn create<T>(
    State(item_usecase): State<Arc<ItemUseCase<T>>>,
    auth: AuthUser,
    Json(insert_item_model): Json<InsertItemModel>,
) -> Result<impl IntoResponse, AppError>
where
    T: ItemRepository + Send + Sync + 'static,
{
    let item = item_usecase.create(auth.user_id, insert_item_model).await?;
    Ok(created(item))
}

pub async fn list<T>(
    State(item_usecase): State<Arc<ItemUseCase<T>>>,
    Query(filter): Query<ListItemsFilter>,
) -> Result<impl IntoResponse, AppError>
where
    T: ItemRepository + Send + Sync + 'static,
{
    let items = item_usecase.list(filter).await?;
    Ok(ApiResponse::ok(items))
}

pub async fn get_one<T>(
    State(item_usecase): State<Arc<ItemUseCase<T>>>,
    Path(item_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    T: ItemRepository + Send + Sync + 'static,
{
    let item = item_usecase.get(item_id).await?;
    Ok(ApiResponse::ok(item))
}

pub async fn update<T>(
    State(item_usecase): State<Arc<ItemUseCase<T>>>,
    Path(item_id): Path<Uuid>,
    auth: AuthUser,
    Json(update_item_model): Json<UpdateItemModel>,
) -> Result<impl IntoResponse, AppError>
where
    T: ItemRepository + Send + Sync + 'static,
{
    let item = item_usecase
        .update(item_id, auth.user_id, update_item_model)
        .await?;
    Ok(ApiResponse::ok(item))
}

pub async fn remove<T>(
    State(item_usecase): State<Arc<ItemUseCase<T>>>,
    Path(item_id): Path<Uuid>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    T: ItemRepository + Send + Sync + 'static,
{
    item_usecase.delete(item_id, auth.user_id).await?;
    Ok(ApiResponse::message("Item deleted"))
}

pub async fn report<T>(
    State(item_usecase): State<Arc<ItemUseCase<T>>>,
    Path(item_id): Path<Uuid>,
    auth: AuthUser,
    Json(report_item_model): Json<ReportItemModel>,
) -> Result<impl IntoResponse, AppError>
where
    T: ItemRepository + Send + Sync + 'static,
{
    item_usecase
        .report(item_id, auth.user_id, report_item_model)
        .await?;
    Ok(ApiResponse::message("Item reported"))
}

pub async fn toggle_like<T>(
    State(item_usecase): State<Arc<ItemUseCase<T>>>,
    Path(item_id): Path<Uuid>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    T: ItemRepository + Send + Sync + 'static,
{
    let like = item_usecase.toggle_like(item_id, auth.user_id).await?;
    Ok(ApiResponse::ok(like))
}
