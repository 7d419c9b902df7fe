use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::{
    entities::{orders::OrderEntity, reviews::{InsertReviewEntity, ReviewEntity}},
    repositories::{orders::OrderRepository, reviews::ReviewRepository},
    value_objects::{
        enums::{order_statuses::OrderStatus, order_types::OrderType},
        reviews::{CanReview, InsertReviewModel, ListReviewsFilter},
    },
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::axum_http::error_responses::AppError;

#[derive(Debug, Clone, Serialize)]
pub struct ReviewDto {
    pub id: Uuid,
    pub order_id: Uuid,
    pub reviewer_id: Uuid,
    pub reviewee_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub helpful_count: i32,
    pub created_at: DateTime<Utc>,
}

impl From<ReviewEntity> for ReviewDto {
    fn from(entity: ReviewEntity) -> Self {
        Self {
            id: entity.id,
            order_id: entity.order_id,
            reviewer_id: entity.reviewer_id,
            reviewee_id: entity.reviewee_id,
            rating: entity.rating,
            comment: entity.comment,
            helpful_count: entity.helpful_count,
            created_at: entity.created_at,
        }
    }
}

pub struct ReviewUseCase<R, O>
where
    R: ReviewRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
{
    review_repository: Arc<R>,
    order_repository: Arc<O>,
}

impl<R, O> ReviewUseCase<R, O>
where
    R: ReviewRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
{
    pub fn new(review_repository: Arc<R>, order_repository: Arc<O>) -> Self {
        Self {
            review_repository,
            order_repository,
        }
    }

    /// The eligibility gate the client can probe before showing the form.
    pub async fn can_review(&self, caller_id: Uuid, order_id: Uuid) -> Result<CanReview, AppError> {
        let order = self
            .order_repository
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

        if order.buyer_id != caller_id && order.seller_id != caller_id {
            return Ok(CanReview::no("You are not a participant in this order"));
        }
        if order.status != OrderStatus::Completed.to_string() {
            return Ok(CanReview::no("Only completed orders can be reviewed"));
        }
        if self
            .review_repository
            .exists_for_order_and_reviewer(order_id, caller_id)
            .await?
        {
            return Ok(CanReview::no("You have already reviewed this order"));
        }

        Ok(CanReview::yes())
    }

    pub async fn create(
        &self,
        caller_id: Uuid,
        model: InsertReviewModel,
    ) -> Result<ReviewDto, AppError> {
        if !(1..=5).contains(&model.rating) {
            return Err(AppError::BadRequest(
                "Rating must be between 1 and 5".to_string(),
            ));
        }

        let order = self
            .order_repository
            .find_by_id(model.order_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

        if order.buyer_id != caller_id && order.seller_id != caller_id {
            return Err(AppError::Forbidden(
                "You are not a participant in this order".to_string(),
            ));
        }
        if order.status != OrderStatus::Completed.to_string() {
            return Err(AppError::BadRequest(
                "Only completed orders can be reviewed".to_string(),
            ));
        }
        if self
            .review_repository
            .exists_for_order_and_reviewer(model.order_id, caller_id)
            .await?
        {
            return Err(AppError::Conflict(
                "You have already reviewed this order".to_string(),
            ));
        }

        let reviewee_id = if order.buyer_id == caller_id {
            order.seller_id
        } else {
            order.buyer_id
        };

        let review = self
            .review_repository
            .insert(
                InsertReviewEntity {
                    order_id: model.order_id,
                    reviewer_id: caller_id,
                    reviewee_id,
                    rating: model.rating,
                    comment: model.comment,
                    created_at: Utc::now(),
                },
                talent_rating_target(&order, caller_id),
            )
            .await?;

        info!(review_id = %review.id, order_id = %model.order_id, "reviews: created");
        Ok(ReviewDto::from(review))
    }

    pub async fn list(&self, filter: ListReviewsFilter) -> Result<Vec<ReviewDto>, AppError> {
        let reviews = self.review_repository.list(&filter).await?;
        Ok(reviews.into_iter().map(ReviewDto::from).collect())
    }

    pub async fn mark_helpful(&self, review_id: Uuid, voter_id: Uuid) -> Result<(), AppError> {
        self.review_repository
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;

        let added = self
            .review_repository
            .add_helpful_vote(review_id, voter_id)
            .await?;
        if !added {
            return Err(AppError::Conflict(
                "You have already marked this review helpful".to_string(),
            ));
        }

        Ok(())
    }
}

/// A buyer's review of a talent order also feeds the listing's rating.
fn talent_rating_target(order: &OrderEntity, reviewer_id: Uuid) -> Option<Uuid> {
    if order.order_type == OrderType::Talent.to_string() && order.buyer_id == reviewer_id {
        order.talent_product_id
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::repositories::{orders::MockOrderRepository, reviews::MockReviewRepository};
    use domain::value_objects::enums::payment_methods::PaymentMethod;
    use mockall::predicate::eq;

    fn sample_order(
        buyer_id: Uuid,
        seller_id: Uuid,
        order_type: OrderType,
        status: OrderStatus,
    ) -> OrderEntity {
        let now = Utc::now();
        OrderEntity {
            id: Uuid::new_v4(),
            order_number: "ORD-TEST0001".to_string(),
            buyer_id,
            seller_id,
            order_type: order_type.to_string(),
            item_id: match order_type {
                OrderType::Item => Some(Uuid::new_v4()),
                OrderType::Talent => None,
            },
            talent_product_id: match order_type {
                OrderType::Item => None,
                OrderType::Talent => Some(Uuid::new_v4()),
            },
            amount_minor: 50000,
            payment_method: PaymentMethod::Razorpay.to_string(),
            status: status.to_string(),
            cancel_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn can_review_rejects_incomplete_order() {
        let buyer_id = Uuid::new_v4();
        let order = sample_order(buyer_id, Uuid::new_v4(), OrderType::Item, OrderStatus::Paid);
        let order_id = order.id;

        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_find_by_id().returning(move |_| {
            let order = order.clone();
            Box::pin(async move { Ok(Some(order)) })
        });

        let usecase = ReviewUseCase::new(Arc::new(MockReviewRepository::new()), Arc::new(order_repo));
        let gate = usecase.can_review(buyer_id, order_id).await.unwrap();

        assert!(!gate.can_review);
    }

    #[tokio::test]
    async fn can_review_rejects_non_participant() {
        let order = sample_order(
            Uuid::new_v4(),
            Uuid::new_v4(),
            OrderType::Item,
            OrderStatus::Completed,
        );
        let order_id = order.id;

        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_find_by_id().returning(move |_| {
            let order = order.clone();
            Box::pin(async move { Ok(Some(order)) })
        });

        let usecase = ReviewUseCase::new(Arc::new(MockReviewRepository::new()), Arc::new(order_repo));
        let gate = usecase.can_review(Uuid::new_v4(), order_id).await.unwrap();

        assert!(!gate.can_review);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_review() {
        let buyer_id = Uuid::new_v4();
        let order = sample_order(
            buyer_id,
            Uuid::new_v4(),
            OrderType::Item,
            OrderStatus::Completed,
        );
        let order_id = order.id;

        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_find_by_id().returning(move |_| {
            let order = order.clone();
            Box::pin(async move { Ok(Some(order)) })
        });

        let mut review_repo = MockReviewRepository::new();
        review_repo
            .expect_exists_for_order_and_reviewer()
            .with(eq(order_id), eq(buyer_id))
            .returning(|_, _| Box::pin(async { Ok(true) }));

        let usecase = ReviewUseCase::new(Arc::new(review_repo), Arc::new(order_repo));
        let result = usecase
            .create(
                buyer_id,
                InsertReviewModel {
                    order_id,
                    rating: 5,
                    comment: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn buyer_review_of_talent_order_feeds_listing_rating() {
        let buyer_id = Uuid::new_v4();
        let seller_id = Uuid::new_v4();
        let order = sample_order(
            buyer_id,
            seller_id,
            OrderType::Talent,
            OrderStatus::Completed,
        );
        let order_id = order.id;
        let talent_product_id = order.talent_product_id;

        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_find_by_id().returning(move |_| {
            let order = order.clone();
            Box::pin(async move { Ok(Some(order)) })
        });

        let mut review_repo = MockReviewRepository::new();
        review_repo
            .expect_exists_for_order_and_reviewer()
            .returning(|_, _| Box::pin(async { Ok(false) }));
        review_repo
            .expect_insert()
            .withf(move |entity, talent_target| {
                entity.reviewee_id == seller_id && *talent_target == talent_product_id
            })
            .times(1)
            .returning(|entity, _| {
                Box::pin(async move {
                    Ok(ReviewEntity {
                        id: Uuid::new_v4(),
                        order_id: entity.order_id,
                        reviewer_id: entity.reviewer_id,
                        reviewee_id: entity.reviewee_id,
                        rating: entity.rating,
                        comment: entity.comment,
                        helpful_count: 0,
                        created_at: entity.created_at,
                    })
                })
            });

        let usecase = ReviewUseCase::new(Arc::new(review_repo), Arc::new(order_repo));
        let review = usecase
            .create(
                buyer_id,
                InsertReviewModel {
                    order_id,
                    rating: 4,
                    comment: Some("Great work".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(review.reviewee_id, seller_id);
    }

    #[tokio::test]
    async fn seller_review_does_not_touch_listing_rating() {
        let buyer_id = Uuid::new_v4();
        let seller_id = Uuid::new_v4();
        let order = sample_order(
            buyer_id,
            seller_id,
            OrderType::Talent,
            OrderStatus::Completed,
        );
        let order_id = order.id;

        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_find_by_id().returning(move |_| {
            let order = order.clone();
            Box::pin(async move { Ok(Some(order)) })
        });

        let mut review_repo = MockReviewRepository::new();
        review_repo
            .expect_exists_for_order_and_reviewer()
            .returning(|_, _| Box::pin(async { Ok(false) }));
        review_repo
            .expect_insert()
            .withf(move |entity, talent_target| {
                entity.reviewee_id == buyer_id && talent_target.is_none()
            })
            .times(1)
            .returning(|entity, _| {
                Box::pin(async move {
                    Ok(ReviewEntity {
                        id: Uuid::new_v4(),
                        order_id: entity.order_id,
                        reviewer_id: entity.reviewer_id,
                        reviewee_id: entity.reviewee_id,
                        rating: entity.rating,
                        comment: entity.comment,
                        helpful_count: 0,
                        created_at: entity.created_at,
                    })
                })
            });

        let usecase = ReviewUseCase::new(Arc::new(review_repo), Arc::new(order_repo));
        let review = usecase
            .create(
                seller_id,
                InsertReviewModel {
                    order_id,
                    rating: 5,
                    comment: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(review.reviewee_id, buyer_id);
    }

    #[tokio::test]
    async fn mark_helpful_rejects_second_vote() {
        let review = ReviewEntity {
            id: Uuid::new_v4(),
            order_id: Uuid::new_v4(),
            reviewer_id: Uuid::new_v4(),
            reviewee_id: Uuid::new_v4(),
            rating: 5,
            comment: None,
            helpful_count: 1,
            created_at: Utc::now(),
        };
        let review_id = review.id;

        let mut review_repo = MockReviewRepository::new();
        review_repo.expect_find_by_id().returning(move |_| {
            let review = review.clone();
            Box::pin(async move { Ok(Some(review)) })
        });
        review_repo
            .expect_add_helpful_vote()
            .returning(|_, _| Box::pin(async { Ok(false) }));

        let usecase = ReviewUseCase::new(Arc::new(review_repo), Arc::new(MockOrderRepository::new()));
        let result = usecase.mark_helpful(review_id, Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }
}
