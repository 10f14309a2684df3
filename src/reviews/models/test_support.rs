//! Test helpers for constructing review and comment fixtures.
//!
//! This module provides builder functions for creating [`Review`] and
//! [`ReviewComment`] instances in tests, reducing boilerplate and ensuring
//! consistency across test modules.
//!
//! # Examples
//!
//! ```
//! use plaudit::reviews::models::test_support::{review_with_comments, unrated_comment};
//!
//! let review = review_with_comments("rev-1", &["c1", "c2"]);
//! assert_eq!(review.comments.len(), 2);
//!
//! let comment = unrated_comment("c3");
//! assert_eq!(comment.id.as_str(), "c3");
//! ```

use super::{CommentId, Reaction, Review, ReviewComment, ReviewId};

/// Constructs an unrated comment with the given identifier.
///
/// The body is derived from the identifier, the author is `alice`, tallies
/// are zero, and the in-flight flag is cleared.
///
/// # Panics
///
/// Panics when `id` is blank; fixture identifiers are chosen by the test.
#[must_use]
pub fn unrated_comment(id: &str) -> ReviewComment {
    ReviewComment {
        id: CommentId::new(id).expect("fixture comment id should be non-empty"),
        body: Some(format!("Comment {id}")),
        author: Some("alice".to_owned()),
        reaction: Reaction::Neutral,
        likes: 0,
        dislikes: 0,
        processing: false,
        created_at: None,
    }
}

/// Constructs an unrated review with the given identifier and no comments.
///
/// # Panics
///
/// Panics when `id` is blank; fixture identifiers are chosen by the test.
#[must_use]
pub fn unrated_review(id: &str) -> Review {
    Review {
        id: ReviewId::new(id).expect("fixture review id should be non-empty"),
        body: Some("Worth a visit".to_owned()),
        author: Some("bob".to_owned()),
        reaction: Reaction::Neutral,
        likes: 0,
        dislikes: 0,
        processing: false,
        comments: Vec::new(),
        created_at: None,
    }
}

/// Constructs an unrated review owning one unrated comment per identifier.
///
/// # Panics
///
/// Panics when any identifier is blank; fixture identifiers are chosen by
/// the test.
#[must_use]
pub fn review_with_comments(id: &str, comment_ids: &[&str]) -> Review {
    let comments = comment_ids
        .iter()
        .map(|comment_id| unrated_comment(comment_id))
        .collect();
    Review {
        comments,
        ..unrated_review(id)
    }
}

/// Clones a comment with a different reaction, leaving the in-flight flag
/// cleared.
///
/// This mirrors what the rating service returns once a submission is
/// confirmed.
#[must_use]
pub fn confirmed_comment(base: &ReviewComment, reaction: Reaction) -> ReviewComment {
    ReviewComment {
        reaction,
        processing: false,
        ..base.clone()
    }
}
