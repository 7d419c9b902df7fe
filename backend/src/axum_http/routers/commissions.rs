use crate::auth::AdminUser;
use crate::axum_http::{
    api_response::{ApiResponse, created},
    error_responses::AppError,
};
use crate::usecases::commissions::{CommissionUseCase, CreateCommissionModel};
use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post, put},
};
use domain::{
    repositories::commissions::CommissionRepository,
    value_objects::commissions::UpdateCommissionStatusModel,
};
use infra::postgres::{
    postgres_connection::PgPoolSquad, repositories::commissions::CommissionPostgres,
};
use std::sync::Arc;
use uuid::Uuid;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let commission_repository = CommissionPostgres::new(Arc::clone(&db_pool));
    let commission_usecase = CommissionUseCase::new(Arc::new(commission_repository));

    Router::new()
        .route("/", post(create_monthly).get(list))
        .route("/:commission_id", get(get_one))
        .route("/:commission_id/status", put(update_status))
        .with_state(Arc::new(commission_usecase))
}

pub async fn create_monthly<T>(
    State(commission_usecase): State<Arc<CommissionUseCase<T>>>,
    _admin: AdminUser,
    Json(create_commission_model): Json<CreateCommissionModel>,
) -> Result<impl IntoResponse, AppError>
where
    T: CommissionRepository + Send + Sync + 'static,
{
    let batch = commission_usecase
        .create_monthly(create_commission_model)
        .await?;
    Ok(created(batch))
}

pub async fn list<T>(
    State(commission_usecase): State<Arc<CommissionUseCase<T>>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError>
where
    T: CommissionRepository + Send + Sync + 'static,
{
    let batches = commission_usecase.list().await?;
    Ok(ApiResponse::ok(batches))
}

pub async fn get_one<T>(
    State(commission_usecase): State<Arc<CommissionUseCase<T>>>,
    Path(commission_id): Path<Uuid>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError>
where
    T: CommissionRepository + Send + Sync + 'static,
{
    let batch = commission_usecase.get(commission_id).await?;
    Ok(ApiResponse::ok(batch))
}

pub async fn update_status<T>(
    State(commission_usecase): State<Arc<CommissionUseCase<T>>>,
    Path(commission_id): Path<Uuid>,
    _admin: AdminUser,
    Json(update_status_model): Json<UpdateCommissionStatusModel>,
) -> Result<impl IntoResponse, AppError>
where
    T: CommissionRepository + Send + Sync + 'static,
{
    let batch = commission_usecase
        .update_status(commission_id, update_status_model)
        .await?;
    Ok(ApiResponse::ok(batch))
}
