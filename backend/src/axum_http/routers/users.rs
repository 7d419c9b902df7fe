use crate::auth::AuthUser;
use crate::axum_http::{
    api_response::{ApiResponse, created},
    error_responses::AppError,
};
use crate::usecases::users::UserUseCase;
use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use domain::{
    repositories::users::UserRepository,
    value_objects::users::{LoginModel, RegisterUserModel},
};
use infra::postgres::{
    postgres_connection::PgPoolSquad, repositories::users::UserPostgres,
};
use serde_json::json;
use std::sync::Arc;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let user_repository = UserPostgres::new(Arc::clone(&db_pool));
    let user_usecase = UserUseCase::new(Arc::new(user_repository));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
        .with_state(Arc::new(user_usecase))
}

pub async fn register<T>(
    State(user_usecase): State<Arc<UserUseCase<T>>>,
    Json(register_user_model): Json<RegisterUserModel>,
) -> Result<impl IntoResponse, AppError>
where
    T: UserRepository + Send + Sync + 'static,
{
    let user_id = user_usecase.register(register_user_model).await?;
    Ok(created(json!({ "id": user_id })))
}

pub async fn login<T>(
    State(user_usecase): State<Arc<UserUseCase<T>>>,
    Json(login_model): Json<LoginModel>,
) -> Result<impl IntoResponse, AppError>
where
    T: UserRepository + Send + Sync + 'static,
{
    let login = user_usecase.login(login_model).await?;
    Ok(ApiResponse::ok(login))
}

pub async fn me<T>(
    State(user_usecase): State<Arc<UserUseCase<T>>>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    T: UserRepository + Send + Sync + 'static,
{
    let user = user_usecase.me(auth.user_id).await?;
    Ok(ApiResponse::ok(user))
}
