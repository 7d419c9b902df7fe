use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::{wishlist_items, wishlist_talent_products};

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = wishlist_items)]
pub struct InsertWishlistItemEntity {
    pub user_id: Uuid,
    pub item_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = wishlist_talent_products)]
pub struct InsertWishlistTalentProductEntity {
    pub user_id: Uuid,
    pub talent_product_id: Uuid,
    pub created_at: DateTime<Utc>,
}
