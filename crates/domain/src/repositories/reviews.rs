use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::entities::reviews::{InsertReviewEntity, ReviewEntity};
use crate::value_objects::reviews::ListReviewsFilter;

#[async_trait]
#[automock]
pub trait ReviewRepository {
    async fn exists_for_order_and_reviewer(
        &self,
        order_id: Uuid,
        reviewer_id: Uuid,
    ) -> Result<bool>;
    /// Inserts the review and recomputes the reviewee's rating stats (and
    /// the talent listing's, when given) in one transaction.
    async fn insert(
        &self,
        review_entity: InsertReviewEntity,
        talent_product_id: Option<Uuid>,
    ) -> Result<ReviewEntity>;
    async fn find_by_id(&self, review_id: Uuid) -> Result<Option<ReviewEntity>>;
    async fn list(&self, filter: &ListReviewsFilter) -> Result<Vec<ReviewEntity>>;
    /// One vote per user; returns false when the voter already voted.
    async fn add_helpful_vote(&self, review_id: Uuid, voter_id: Uuid) -> Result<bool>;
}
