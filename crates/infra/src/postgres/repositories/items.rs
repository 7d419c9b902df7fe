use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{insert_into, prelude::*};
use std::sync::Arc;
use uuid::Uuid;

use crate::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::items::{
        InsertItemEntity, InsertItemLikeEntity, InsertItemReportEntity, ItemEntity,
        UpdateItemChangeset,
    },
    repositories::items::ItemRepository,
    schema::{item_likes, item_reports, items},
    value_objects::{
        enums::{item_statuses::ItemStatus, sort_order::SortOrder},
        items::ListItemsFilter,
    },
};

pub struct ItemPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ItemPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ItemRepository for ItemPostgres {
    async fn insert(&self, item_entity: InsertItemEntity) -> Result<ItemEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let item = insert_into(items::table)
            .values(&item_entity)
            .returning(ItemEntity::as_returning())
            .get_result::<ItemEntity>(&mut conn)?;

        Ok(item)
    }

    async fn find_by_id(&self, item_id: Uuid) -> Result<Option<ItemEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let item = items::table
            .find(item_id)
            .select(ItemEntity::as_select())
            .first::<ItemEntity>(&mut conn)
            .optional()?;

        Ok(item)
    }

    async fn list(&self, filter: &ListItemsFilter) -> Result<Vec<ItemEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = items::table
            .select(ItemEntity::as_select())
            .into_boxed();

        if let Some(category) = &filter.category {
            query = query.filter(items::category.eq(category.clone()));
        }

        if let Some(status) = &filter.status {
            query = query.filter(items::status.eq(status.to_string()));
        }

        if let Some(seller_id) = filter.seller_id {
            query = query.filter(items::seller_id.eq(seller_id));
        }

        if let Some(search) = &filter.search {
            query = query.filter(items::title.ilike(format!("%{}%", search)));
        }

        query = match filter.sort_order {
            SortOrder::Asc => query.order(items::created_at.asc()),
            SortOrder::Desc => query.order(items::created_at.desc()),
        };

        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        if let Some(offset) = filter.offset {
            query = query.offset(offset);
        }

        let results = query.load::<ItemEntity>(&mut conn)?;

        Ok(results)
    }

    async fn update(&self, item_id: Uuid, changes: UpdateItemChangeset) -> Result<ItemEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let item = diesel::update(items::table.find(item_id))
            .set(&changes)
            .returning(ItemEntity::as_returning())
            .get_result::<ItemEntity>(&mut conn)?;

        Ok(item)
    }

    async fn delete(&self, item_id: Uuid) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        diesel::delete(items::table.find(item_id)).execute(&mut conn)?;

        Ok(())
    }

    async fn set_status(&self, item_id: Uuid, status: ItemStatus) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        diesel::update(items::table.find(item_id))
            .set((
                items::status.eq(status.to_string()),
                items::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn has_reported(&self, item_id: Uuid, reporter_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let reported = diesel::select(diesel::dsl::exists(
            item_reports::table
                .filter(item_reports::item_id.eq(item_id))
                .filter(item_reports::reporter_id.eq(reporter_id)),
        ))
        .get_result::<bool>(&mut conn)?;

        Ok(reported)
    }

    async fn insert_report(&self, report_entity: InsertItemReportEntity) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        conn.transaction::<_, anyhow::Error, _>(|conn| {
            insert_into(item_reports::table)
                .values(&report_entity)
                .execute(conn)?;

            diesel::update(items::table.find(report_entity.item_id))
                .set((
                    items::reports_count.eq(items::reports_count + 1),
                    items::updated_at.eq(Utc::now()),
                ))
                .execute(conn)?;

            Ok(())
        })?;

        Ok(())
    }

    async fn toggle_like(&self, item_id: Uuid, user_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let liked = conn.transaction::<bool, anyhow::Error, _>(|conn| {
            let removed = diesel::delete(
                item_likes::table
                    .filter(item_likes::item_id.eq(item_id))
                    .filter(item_likes::user_id.eq(user_id)),
            )
            .execute(conn)?;

            if removed > 0 {
                diesel::update(items::table.find(item_id))
                    .set(items::likes_count.eq(items::likes_count - 1))
                    .execute(conn)?;
                return Ok(false);
            }

            insert_into(item_likes::table)
                .values(&InsertItemLikeEntity {
                    item_id,
                    user_id,
                    created_at: Utc::now(),
                })
                .execute(conn)?;

            diesel::update(items::table.find(item_id))
                .set(items::likes_count.eq(items::likes_count + 1))
                .execute(conn)?;

            Ok(true)
        })?;

        Ok(liked)
    }

    async fn list_reported(&self, min_reports: i32) -> Result<Vec<ItemEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = items::table
            .filter(items::reports_count.ge(min_reports))
            .order(items::reports_count.desc())
            .select(ItemEntity::as_select())
            .load::<ItemEntity>(&mut conn)?;

        Ok(results)
    }
}
