// src/domain/review/entity.rs
use crate::domain::product::ProductId;
use crate::domain::review::value_objects::{Grade, RatingId, ReviewBody, ReviewHeader, ReviewId};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Review {
    pub id: ReviewId,
    pub user_id: UserId,
    pub product_id: ProductId,
    /// Set iff the submission carried a grade.
    pub rating_id: Option<RatingId>,
    pub header: ReviewHeader,
    pub body: ReviewBody,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl Review {
    pub fn has_rating(&self) -> bool {
        self.rating_id.is_some()
    }
}

/// A review submission. The optional grade becomes a Rating row inserted in
/// the same unit of work as the review itself.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub header: ReviewHeader,
    pub body: ReviewBody,
    pub grade: Option<Grade>,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct Rating {
    pub id: RatingId,
    pub grade: Grade,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_rating_reflects_reference() {
        let review = Review {
            id: ReviewId::new(1).unwrap(),
            user_id: UserId::new(1).unwrap(),
            product_id: ProductId::new(1).unwrap(),
            rating_id: None,
            header: ReviewHeader::new("Solid").unwrap(),
            body: ReviewBody::new("Does the job.").unwrap(),
            created_at: Utc::now(),
            is_active: true,
        };
        assert!(!review.has_rating());

        let rated = Review {
            rating_id: Some(RatingId::new(7).unwrap()),
            ..review
        };
        assert!(rated.has_rating());
    }
}
