use crate::auth::AuthUser;
use crate::axum_http::{
    api_response::{ApiResponse, created},
    error_responses::AppError,
};
use crate::usecases::reviews::ReviewUseCase;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
};
use domain::{
    repositories::{orders::OrderRepository, reviews::ReviewRepository},
    value_objects::reviews::{InsertReviewModel, ListReviewsFilter},
};
use infra::postgres::{
    postgres_connection::PgPoolSquad,
    repositories::{orders::OrderPostgres, reviews::ReviewPostgres},
};
use std::sync::Arc;
use uuid::Uuid;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let review_repository = ReviewPostgres::new(Arc::clone(&db_pool));
    let order_repository = OrderPostgres::new(Arc::clone(&db_pool));
    let review_usecase = ReviewUseCase::new(Arc::new(review_repository), Arc::new(order_repository));

    Router::new()
        .route("/", post(create).get(list))
        .route("/can-review/:order_id", get(can_review))
        .route("/:review_id/helpful", post(mark_helpful))
        .with_state(Arc::new(review_usecase))
}

pub async fn create<R, O>(
    State(review_usecase): State<Arc<ReviewUseCase<R, O>>>,
    auth: AuthUser,
    Json(insert_review_model): Json<InsertReviewModel>,
) -> Result<impl IntoResponse, AppError>
where
    R: ReviewRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
{
    let review = review_usecase.create(auth.user_id, insert_review_model).await?;
    Ok(created(review))
}

pub async fn list<R, O>(
    State(review_usecase): State<Arc<ReviewUseCase<R, O>>>,
    Query(filter): Query<ListReviewsFilter>,
) -> Result<impl IntoResponse, AppError>
where
    R: ReviewRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
{
    let reviews = review_usecase.list(filter).await?;
    Ok(ApiResponse::ok(reviews))
}

pub async fn can_review<R, O>(
    State(review_usecase): State<Arc<ReviewUseCase<R, O>>>,
    Path(order_id): Path<Uuid>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    R: ReviewRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
{
    let gate = review_usecase.can_review(auth.user_id, order_id).await?;
    Ok(ApiResponse::ok(gate))
}

pub async fn mark_helpful<R, O>(
    State(review_usecase): State<Arc<ReviewUseCase<R, O>>>,
    Path(review_id): Path<Uuid>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    R: ReviewRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
{
    review_usecase.mark_helpful(review_id, auth.user_id).await?;
    Ok(ApiResponse::message("Marked helpful"))
}
