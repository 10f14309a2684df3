//! Data models for reviews, comments, and reactions.
//!
//! This module contains the domain models handled by the rating screen. Types
//! prefixed with `Api` are internal deserialisation targets that convert into
//! the public domain types; the conversion always produces entities with the
//! in-flight flag cleared.

use serde::{Deserialize, Serialize};

use crate::optimistic::Rateable;

use super::error::RatingError;

#[cfg(feature = "test-support")]
pub mod test_support;

/// Reaction attached to a review or comment by the viewing user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    /// Positive reaction.
    Like,
    /// Negative reaction.
    Dislike,
    /// No reaction; submitting it withdraws a previous one.
    #[default]
    #[serde(rename = "cancel")]
    Neutral,
}

/// Review identifier wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReviewId(String);

impl ReviewId {
    /// Validates that the identifier is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::MissingReviewId`] when the value is blank.
    pub fn new(value: &str) -> Result<Self, RatingError> {
        if value.trim().is_empty() {
            return Err(RatingError::MissingReviewId);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the identifier value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Comment identifier wrapper; hashable so pending mutations can be keyed
/// by comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommentId(String);

impl CommentId {
    /// Validates that the identifier is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::MissingCommentId`] when the value is blank.
    pub fn new(value: &str) -> Result<Self, RatingError> {
        if value.trim().is_empty() {
            return Err(RatingError::MissingCommentId);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the identifier value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// A review with its reaction state and owned comment thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    /// Stable review identifier.
    pub id: ReviewId,
    /// Review body text.
    pub body: Option<String>,
    /// Author display name.
    pub author: Option<String>,
    /// Reaction attached by the viewing user.
    pub reaction: Reaction,
    /// Total number of likes.
    pub likes: u64,
    /// Total number of dislikes.
    pub dislikes: u64,
    /// True while a rating mutation is in flight for this review.
    pub processing: bool,
    /// Comments attached to the review, in display order.
    pub comments: Vec<ReviewComment>,
    /// Creation timestamp (ISO 8601 format).
    pub created_at: Option<String>,
}

/// A single comment in a review thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewComment {
    /// Stable comment identifier.
    pub id: CommentId,
    /// Comment body text.
    pub body: Option<String>,
    /// Author display name.
    pub author: Option<String>,
    /// Reaction attached by the viewing user.
    pub reaction: Reaction,
    /// Total number of likes.
    pub likes: u64,
    /// Total number of dislikes.
    pub dislikes: u64,
    /// True while a rating mutation is in flight for this comment.
    pub processing: bool,
    /// Creation timestamp (ISO 8601 format).
    pub created_at: Option<String>,
}

impl Rateable for Review {
    fn reaction(&self) -> Reaction {
        self.reaction
    }

    fn is_processing(&self) -> bool {
        self.processing
    }

    fn with_reaction(&self, reaction: Reaction) -> Self {
        Self {
            reaction,
            processing: true,
            ..self.clone()
        }
    }

    fn with_processing(&self, processing: bool) -> Self {
        Self {
            processing,
            ..self.clone()
        }
    }
}

impl Rateable for ReviewComment {
    fn reaction(&self) -> Reaction {
        self.reaction
    }

    fn is_processing(&self) -> bool {
        self.processing
    }

    fn with_reaction(&self, reaction: Reaction) -> Self {
        Self {
            reaction,
            processing: true,
            ..self.clone()
        }
    }

    fn with_processing(&self, processing: bool) -> Self {
        Self {
            processing,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiReview {
    pub(crate) uuid: String,
    pub(crate) body: Option<String>,
    pub(crate) user: Option<ApiUser>,
    #[serde(default)]
    pub(crate) rate: Reaction,
    #[serde(default)]
    pub(crate) likes: u64,
    #[serde(default)]
    pub(crate) dislikes: u64,
    #[serde(default)]
    pub(crate) comments: Vec<ApiComment>,
    pub(crate) created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiComment {
    pub(crate) uuid: String,
    pub(crate) body: Option<String>,
    pub(crate) user: Option<ApiUser>,
    #[serde(default)]
    pub(crate) rate: Reaction,
    #[serde(default)]
    pub(crate) likes: u64,
    #[serde(default)]
    pub(crate) dislikes: u64,
    pub(crate) created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiUser {
    pub(crate) name: Option<String>,
}

impl TryFrom<ApiReview> for Review {
    type Error = RatingError;

    fn try_from(api: ApiReview) -> Result<Self, Self::Error> {
        let comments = api
            .comments
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<ReviewComment>, RatingError>>()?;
        Ok(Self {
            id: ReviewId::new(&api.uuid)?,
            body: api.body,
            author: api.user.and_then(|user| user.name),
            reaction: api.rate,
            likes: api.likes,
            dislikes: api.dislikes,
            processing: false,
            comments,
            created_at: api.created_at,
        })
    }
}

impl TryFrom<ApiComment> for ReviewComment {
    type Error = RatingError;

    fn try_from(api: ApiComment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CommentId::new(&api.uuid)?,
            body: api.body,
            author: api.user.and_then(|user| user.name),
            reaction: api.rate,
            likes: api.likes,
            dislikes: api.dislikes,
            processing: false,
            created_at: api.created_at,
        })
    }
}
