use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::talent_products;
use crate::value_objects::talent_products::PackageOffer;

/// Raw row used for Diesel queries. Packages stay as JSON and are parsed
/// into `PackageOffer`s on the entity.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = talent_products)]
pub struct TalentProductRow {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub base_price_minor: i32,
    pub status: String,
    pub packages: serde_json::Value,
    pub views_count: i32,
    pub orders_count: i32,
    pub rating_avg: f64,
    pub rating_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TalentProductEntity {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub base_price_minor: i32,
    pub status: String,
    pub packages: Vec<PackageOffer>,
    pub views_count: i32,
    pub orders_count: i32,
    pub rating_avg: f64,
    pub rating_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TalentProductRow> for TalentProductEntity {
    fn from(value: TalentProductRow) -> Self {
        let packages = serde_json::from_value(value.packages).unwrap_or_default();

        Self {
            id: value.id,
            seller_id: value.seller_id,
            title: value.title,
            description: value.description,
            category: value.category,
            base_price_minor: value.base_price_minor,
            status: value.status,
            packages,
            views_count: value.views_count,
            orders_count: value.orders_count,
            rating_avg: value.rating_avg,
            rating_count: value.rating_count,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = talent_products)]
pub struct UpdateTalentProductChangeset {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub base_price_minor: Option<i32>,
    pub packages: Option<serde_json::Value>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = talent_products)]
pub struct InsertTalentProductEntity {
    pub seller_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub base_price_minor: i32,
    pub status: String,
    pub packages: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
