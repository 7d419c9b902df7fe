use crate::auth::AuthUser;
use crate::axum_http::{api_response::ApiResponse, error_responses::AppError};
use crate::usecases::wishlists::WishlistUseCase;
use axum::{
    Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use domain::repositories::{
    items::ItemRepository, talent_products::TalentProductRepository,
    wishlists::WishlistRepository,
};
use infra::postgres::{
    postgres_connection::PgPoolSquad,
    repositories::{
        items::ItemPostgres, talent_products::TalentProductPostgres,
        wishlists::WishlistPostgres,
    },
};
use std::sync::Arc;
use uuid::Uuid;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let wishlist_repository = WishlistPostgres::new(Arc::clone(&db_pool));
    let item_repository = ItemPostgres::new(Arc::clone(&db_pool));
    let talent_product_repository = TalentProductPostgres::new(Arc::clone(&db_pool));
    let wishlist_usecase = WishlistUseCase::new(
        Arc::new(wishlist_repository),
        Arc::new(item_repository),
        Arc::new(talent_product_repository),
    );

    Router::new()
        .route("/", get(get_wishlist))
        .route(
            "/items/:item_id",
            post(add_item).delete(remove_item),
        )
        .route(
            "/talent-products/:talent_product_id",
            post(add_talent_product).delete(remove_talent_product),
        )
        .with_state(Arc::new(wishlist_usecase))
}

pub async fn get_wishlist<W, I, T>(
    State(wishlist_usecase): State<Arc<WishlistUseCase<W, I, T>>>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    W: WishlistRepository + Send + Sync + 'static,
    I: ItemRepository + Send + Sync + 'static,
    T: TalentProductRepository + Send + Sync + 'static,
{
    let wishlist = wishlist_usecase.get(auth.user_id).await?;
    Ok(ApiResponse::ok(wishlist))
}

pub async fn add_item<W, I, T>(
    State(wishlist_usecase): State<Arc<WishlistUseCase<W, I, T>>>,
    Path(item_id): Path<Uuid>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    W: WishlistRepository + Send + Sync + 'static,
    I: ItemRepository + Send + Sync + 'static,
    T: TalentProductRepository + Send + Sync + 'static,
{
    wishlist_usecase.add_item(auth.user_id, item_id).await?;
    Ok(ApiResponse::message("Added to wishlist"))
}

pub async fn remove_item<W, I, T>(
    State(wishlist_usecase): State<Arc<WishlistUseCase<W, I, T>>>,
    Path(item_id): Path<Uuid>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    W: WishlistRepository + Send + Sync + 'static,
    I: ItemRepository + Send + Sync + 'static,
    T: TalentProductRepository + Send + Sync + 'static,
{
    wishlist_usecase.remove_item(auth.user_id, item_id).await?;
    Ok(ApiResponse::message("Removed from wishlist"))
}

pub async fn add_talent_product<W, I, T>(
    State(wishlist_usecase): State<Arc<WishlistUseCase<W, I, T>>>,
    Path(talent_product_id): Path<Uuid>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    W: WishlistRepository + Send + Sync + 'static,
    I: ItemRepository + Send + Sync + 'static,
    T: TalentProductRepository + Send + Sync + 'static,
{
    wishlist_usecase
        .add_talent_product(auth.user_id, talent_product_id)
        .await?;
    Ok(ApiResponse::message("Added to wishlist"))
}

pub async fn remove_talent_product<W, I, T>(
    State(wishlist_usecase): State<Arc<WishlistUseCase<W, I, T>>>,
    Path(talent_product_id): Path<Uuid>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    W: WishlistRepository + Send + Sync + 'static,
    I: ItemRepository + Send + Sync + 'static,
    T: TalentProductRepository + Send + Sync + 'static,
{
    wishlist_usecase
        .remove_talent_product(auth.user_id, talent_product_id)
        .await?;
    Ok(ApiResponse::message("Removed from wishlist"))
}
