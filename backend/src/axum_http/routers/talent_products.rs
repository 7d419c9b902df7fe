use crate::auth::AuthUser;
use crate::axum_http::{
    api_response::{ApiResponse, created},
    error_responses::AppError,
};
use crate::usecases::talent_products::TalentProductUseCase;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post, put},
};
use domain::{
    repositories::talent_products::TalentProductRepository,
    value_objects::talent_products::{
        InsertTalentProductModel, ListTalentProductsFilter, SetTalentAvailabilityModel,
        UpdateTalentProductModel,
    },
};
use infra::postgres::{
    postgres_connection::PgPoolSquad, repositories::talent_products::TalentProductPostgres,
};
use std::sync::Arc;
use uuid::Uuid;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let talent_product_repository = TalentProductPostgres::new(Arc::clone(&db_pool));
    let talent_product_usecase = TalentProductUseCase::new(Arc::new(talent_product_repository));

    Router::new()
        .route("/", post(create).get(list))
        .route("/:talent_product_id", get(get_one).put(update))
        .route("/:talent_product_id/availability", put(set_availability))
        .with_state(Arc::new(talent_product_usecase))
}

pub async fn create<T>(
    State(talent_product_usecase): State<Arc<TalentProductUseCase<T>>>,
    auth: AuthUser,
    Json(insert_talent_product_model): Json<InsertTalentProductModel>,
) -> Result<impl IntoResponse, AppError>
where
    T: TalentProductRepository + Send + Sync + 'static,
{
    let talent_product = talent_product_usecase
        .create(auth.user_id, insert_talent_product_model)
        .await?;
    Ok(created(talent_product))
}

pub async fn list<T>(
    State(talent_product_usecase): State<Arc<TalentProductUseCase<T>>>,
    Query(filter): Query<ListTalentProductsFilter>,
) -> Result<impl IntoResponse, AppError>
where
    T: TalentProductRepository + Send + Sync + 'static,
{
    let talent_products = talent_product_usecase.list(filter).await?;
    Ok(ApiResponse::ok(talent_products))
}

pub async fn get_one<T>(
    State(talent_product_usecase): State<Arc<TalentProductUseCase<T>>>,
    Path(talent_product_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    T: TalentProductRepository + Send + Sync + 'static,
{
    let talent_product = talent_product_usecase.get(talent_product_id).await?;
    Ok(ApiResponse::ok(talent_product))
}

pub async fn update<T>(
    State(talent_product_usecase): State<Arc<TalentProductUseCase<T>>>,
    Path(talent_product_id): Path<Uuid>,
    auth: AuthUser,
    Json(update_talent_product_model): Json<UpdateTalentProductModel>,
) -> Result<impl IntoResponse, AppError>
where
    T: TalentProductRepository + Send + Sync + 'static,
{
    let talent_product = talent_product_usecase
        .update(talent_product_id, auth.user_id, update_talent_product_model)
        .await?;
    Ok(ApiResponse::ok(talent_product))
}

pub async fn set_availability<T>(
    State(talent_product_usecase): State<Arc<TalentProductUseCase<T>>>,
    Path(talent_product_id): Path<Uuid>,
    auth: AuthUser,
    Json(set_availability_model): Json<SetTalentAvailabilityModel>,
) -> Result<impl IntoResponse, AppError>
where
    T: TalentProductRepository + Send + Sync + 'static,
{
    talent_product_usecase
        .set_availability(talent_product_id, auth.user_id, set_availability_model)
        .await?;
    Ok(ApiResponse::message("Availability updated"))
}
