use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{insert_into, prelude::*};
use std::sync::Arc;
use uuid::Uuid;

use crate::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::{
        items::ItemEntity,
        talent_products::{TalentProductEntity, TalentProductRow},
        wishlists::{InsertWishlistItemEntity, InsertWishlistTalentProductEntity},
    },
    repositories::wishlists::WishlistRepository,
    schema::{items, talent_products, wishlist_items, wishlist_talent_products},
};

pub struct WishlistPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl WishlistPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl WishlistRepository for WishlistPostgres {
    async fn add_item(&self, user_id: Uuid, item_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let inserted = insert_into(wishlist_items::table)
            .values(&InsertWishlistItemEntity {
                user_id,
                item_id,
                created_at: Utc::now(),
            })
            .on_conflict_do_nothing()
            .execute(&mut conn)?;

        Ok(inserted > 0)
    }

    async fn remove_item(&self, user_id: Uuid, item_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let removed = diesel::delete(
            wishlist_items::table
                .filter(wishlist_items::user_id.eq(user_id))
                .filter(wishlist_items::item_id.eq(item_id)),
        )
        .execute(&mut conn)?;

        Ok(removed > 0)
    }

    async fn add_talent_product(&self, user_id: Uuid, talent_product_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let inserted = insert_into(wishlist_talent_products::table)
            .values(&InsertWishlistTalentProductEntity {
                user_id,
                talent_product_id,
                created_at: Utc::now(),
            })
            .on_conflict_do_nothing()
            .execute(&mut conn)?;

        Ok(inserted > 0)
    }

    async fn remove_talent_product(
        &self,
        user_id: Uuid,
        talent_product_id: Uuid,
    ) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let removed = diesel::delete(
            wishlist_talent_products::table
                .filter(wishlist_talent_products::user_id.eq(user_id))
                .filter(wishlist_talent_products::talent_product_id.eq(talent_product_id)),
        )
        .execute(&mut conn)?;

        Ok(removed > 0)
    }

    async fn list_items(&self, user_id: Uuid) -> Result<Vec<ItemEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = wishlist_items::table
            .inner_join(items::table.on(wishlist_items::item_id.eq(items::id)))
            .filter(wishlist_items::user_id.eq(user_id))
            .order(wishlist_items::created_at.desc())
            .select(ItemEntity::as_select())
            .load::<ItemEntity>(&mut conn)?;

        Ok(results)
    }

    async fn list_talent_products(&self, user_id: Uuid) -> Result<Vec<TalentProductEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = wishlist_talent_products::table
            .inner_join(
                talent_products::table
                    .on(wishlist_talent_products::talent_product_id.eq(talent_products::id)),
            )
            .filter(wishlist_talent_products::user_id.eq(user_id))
            .order(wishlist_talent_products::created_at.desc())
            .select(TalentProductRow::as_select())
            .load::<TalentProductRow>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
