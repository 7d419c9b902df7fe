use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{insert_into, prelude::*};
use std::sync::Arc;
use uuid::Uuid;

use crate::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::talent_products::{
        InsertTalentProductEntity, TalentProductEntity, TalentProductRow,
        UpdateTalentProductChangeset,
    },
    repositories::talent_products::TalentProductRepository,
    schema::talent_products,
    value_objects::{
        enums::talent_statuses::TalentStatus, talent_products::ListTalentProductsFilter,
    },
};

pub struct TalentProductPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl TalentProductPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl TalentProductRepository for TalentProductPostgres {
    async fn insert(&self, entity: InsertTalentProductEntity) -> Result<TalentProductEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = insert_into(talent_products::table)
            .values(&entity)
            .returning(TalentProductRow::as_returning())
            .get_result::<TalentProductRow>(&mut conn)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, talent_product_id: Uuid) -> Result<Option<TalentProductEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = talent_products::table
            .find(talent_product_id)
            .select(TalentProductRow::as_select())
            .first::<TalentProductRow>(&mut conn)
            .optional()?;

        Ok(row.map(Into::into))
    }

    async fn find_and_bump_views(
        &self,
        talent_product_id: Uuid,
    ) -> Result<Option<TalentProductEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = diesel::update(talent_products::table.find(talent_product_id))
            .set(talent_products::views_count.eq(talent_products::views_count + 1))
            .returning(TalentProductRow::as_returning())
            .get_result::<TalentProductRow>(&mut conn)
            .optional()?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, filter: &ListTalentProductsFilter) -> Result<Vec<TalentProductEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = talent_products::table
            .select(TalentProductRow::as_select())
            .order(talent_products::created_at.desc())
            .into_boxed();

        if let Some(category) = &filter.category {
            query = query.filter(talent_products::category.eq(category.clone()));
        }

        if let Some(status) = &filter.status {
            query = query.filter(talent_products::status.eq(status.to_string()));
        }

        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        if let Some(offset) = filter.offset {
            query = query.offset(offset);
        }

        let rows = query.load::<TalentProductRow>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(
        &self,
        talent_product_id: Uuid,
        changes: UpdateTalentProductChangeset,
    ) -> Result<TalentProductEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = diesel::update(talent_products::table.find(talent_product_id))
            .set(&changes)
            .returning(TalentProductRow::as_returning())
            .get_result::<TalentProductRow>(&mut conn)?;

        Ok(row.into())
    }

    async fn set_status(&self, talent_product_id: Uuid, status: TalentStatus) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        diesel::update(talent_products::table.find(talent_product_id))
            .set((
                talent_products::status.eq(status.to_string()),
                talent_products::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }
}
