use crate::auth::AdminUser;
use crate::axum_http::{api_response::ApiResponse, error_responses::AppError};
use crate::usecases::admin::AdminUseCase;
use axum::{
    Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, put},
};
use domain::repositories::{items::ItemRepository, users::UserRepository};
use infra::postgres::{
    postgres_connection::PgPoolSquad,
    repositories::{items::ItemPostgres, users::UserPostgres},
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct ReportedItemsQuery {
    pub min_reports: Option<i32>,
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let item_repository = ItemPostgres::new(Arc::clone(&db_pool));
    let user_repository = UserPostgres::new(Arc::clone(&db_pool));
    let admin_usecase = AdminUseCase::new(Arc::new(item_repository), Arc::new(user_repository));

    Router::new()
        .route("/reported-items", get(reported_items))
        .route("/items/:item_id/deactivate", put(deactivate_item))
        .route("/users/:user_id/deactivate", put(deactivate_user))
        .with_state(Arc::new(admin_usecase))
}

pub async fn reported_items<I, U>(
    State(admin_usecase): State<Arc<AdminUseCase<I, U>>>,
    _admin: AdminUser,
    Query(query): Query<ReportedItemsQuery>,
) -> Result<impl IntoResponse, AppError>
where
    I: ItemRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let items = admin_usecase.reported_items(query.min_reports).await?;
    Ok(ApiResponse::ok(items))
}

pub async fn deactivate_item<I, U>(
    State(admin_usecase): State<Arc<AdminUseCase<I, U>>>,
    Path(item_id): Path<Uuid>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError>
where
    I: ItemRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    admin_usecase.deactivate_item(item_id).await?;
    Ok(ApiResponse::message("Item deactivated"))
}

pub async fn deactivate_user<I, U>(
    State(admin_usecase): State<Arc<AdminUseCase<I, U>>>,
    Path(user_id): Path<Uuid>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError>
where
    I: ItemRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    admin_usecase.deactivate_user(user_id).await?;
    Ok(ApiResponse::message("User deactivated"))
}
