//! Gateways for submitting ratings to the remote rating service.
//!
//! This module provides a trait-based seam for persisting rating changes.
//! The trait-based design enables mocking in tests while the HTTP
//! implementation handles real requests.

mod http;

pub use http::{AccessToken, HttpRatingGateway};

use async_trait::async_trait;

use super::error::RatingError;
use super::models::{CommentId, Reaction, Review, ReviewComment, ReviewId};

/// Remote service that persists rating changes.
///
/// Both operations are asynchronous and single-shot; retries, if any, belong
/// to the service implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingGateway: Send + Sync {
    /// Submits a reaction for a review, returning the authoritative updated
    /// review.
    async fn submit_review_rating(
        &self,
        id: &ReviewId,
        reaction: Reaction,
    ) -> Result<Review, RatingError>;

    /// Submits a reaction for a comment, returning the authoritative updated
    /// comment.
    async fn submit_comment_rating(
        &self,
        id: &CommentId,
        reaction: Reaction,
    ) -> Result<ReviewComment, RatingError>;
}
