use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{
    dsl::{count_star, sum},
    insert_into,
    prelude::*,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::reviews::{InsertReviewEntity, InsertReviewHelpfulVoteEntity, ReviewEntity},
    repositories::reviews::ReviewRepository,
    schema::{orders, review_helpful_votes, reviews, talent_products, users},
    value_objects::reviews::ListReviewsFilter,
};

pub struct ReviewPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ReviewPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ReviewRepository for ReviewPostgres {
    async fn exists_for_order_and_reviewer(
        &self,
        order_id: Uuid,
        reviewer_id: Uuid,
    ) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let exists = diesel::select(diesel::dsl::exists(
            reviews::table
                .filter(reviews::order_id.eq(order_id))
                .filter(reviews::reviewer_id.eq(reviewer_id)),
        ))
        .get_result::<bool>(&mut conn)?;

        Ok(exists)
    }

    async fn insert(
        &self,
        review_entity: InsertReviewEntity,
        talent_product_id: Option<Uuid>,
    ) -> Result<ReviewEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let review = conn.transaction::<ReviewEntity, anyhow::Error, _>(|conn| {
            let review = insert_into(reviews::table)
                .values(&review_entity)
                .returning(ReviewEntity::as_returning())
                .get_result::<ReviewEntity>(conn)?;

            let now = Utc::now();

            // Recompute the reviewee's stats from the reviews themselves so
            // the stored aggregate can never drift.
            let (rating_sum, rating_count) = reviews::table
                .filter(reviews::reviewee_id.eq(review.reviewee_id))
                .select((sum(reviews::rating), count_star()))
                .first::<(Option<i64>, i64)>(conn)?;

            let rating_avg = if rating_count > 0 {
                rating_sum.unwrap_or(0) as f64 / rating_count as f64
            } else {
                0.0
            };

            diesel::update(users::table.find(review.reviewee_id))
                .set((
                    users::rating_avg.eq(rating_avg),
                    users::rating_count.eq(rating_count as i32),
                    users::updated_at.eq(now),
                ))
                .execute(conn)?;

            if let Some(talent_product_id) = talent_product_id {
                let (talent_sum, talent_count) = reviews::table
                    .inner_join(orders::table.on(reviews::order_id.eq(orders::id)))
                    .filter(orders::talent_product_id.eq(Some(talent_product_id)))
                    .select((sum(reviews::rating), count_star()))
                    .first::<(Option<i64>, i64)>(conn)?;

                let talent_avg = if talent_count > 0 {
                    talent_sum.unwrap_or(0) as f64 / talent_count as f64
                } else {
                    0.0
                };

                diesel::update(talent_products::table.find(talent_product_id))
                    .set((
                        talent_products::rating_avg.eq(talent_avg),
                        talent_products::rating_count.eq(talent_count as i32),
                        talent_products::updated_at.eq(now),
                    ))
                    .execute(conn)?;
            }

            Ok(review)
        })?;

        Ok(review)
    }

    async fn find_by_id(&self, review_id: Uuid) -> Result<Option<ReviewEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let review = reviews::table
            .find(review_id)
            .select(ReviewEntity::as_select())
            .first::<ReviewEntity>(&mut conn)
            .optional()?;

        Ok(review)
    }

    async fn list(&self, filter: &ListReviewsFilter) -> Result<Vec<ReviewEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = reviews::table
            .select(ReviewEntity::as_select())
            .order(reviews::created_at.desc())
            .into_boxed();

        if let Some(reviewee_id) = filter.reviewee_id {
            query = query.filter(reviews::reviewee_id.eq(reviewee_id));
        }

        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        if let Some(offset) = filter.offset {
            query = query.offset(offset);
        }

        let results = query.load::<ReviewEntity>(&mut conn)?;

        Ok(results)
    }

    async fn add_helpful_vote(&self, review_id: Uuid, voter_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let added = conn.transaction::<bool, anyhow::Error, _>(|conn| {
            let inserted = insert_into(review_helpful_votes::table)
                .values(&InsertReviewHelpfulVoteEntity {
                    review_id,
                    voter_id,
                    created_at: Utc::now(),
                })
                .on_conflict_do_nothing()
                .execute(conn)?;

            if inserted == 0 {
                return Ok(false);
            }

            diesel::update(reviews::table.find(review_id))
                .set(reviews::helpful_count.eq(reviews::helpful_count + 1))
                .execute(conn)?;

            Ok(true)
        })?;

        Ok(added)
    }
}
