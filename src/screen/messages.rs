//! Message types for the review screen update loop.
//!
//! This module defines the events applied to the screen model. Events
//! represent user rating actions, asynchronous submission results, and the
//! timed error clear.

use std::future::Future;
use std::pin::Pin;

use crate::reviews::error::RatingError;
use crate::reviews::models::{CommentId, Reaction, Review, ReviewComment};

/// A deferred effect produced by an update.
///
/// Commands perform the asynchronous work for an event (a service call, a
/// timer) and resolve to the follow-up event to feed back into the model.
pub type Command = Pin<Box<dyn Future<Output = Option<ScreenEvent>> + Send>>;

/// Events for the review details screen.
#[derive(Debug, Clone)]
pub enum ScreenEvent {
    /// The user rated the review.
    RateReview(Reaction),

    /// The user rated a comment in the thread.
    RateComment {
        /// Identifier of the comment being rated.
        id: CommentId,
        /// The reaction to apply.
        reaction: Reaction,
    },

    /// The service resolved a review rating submission.
    ReviewRated(Result<Review, RatingError>),

    /// The service resolved a comment rating submission.
    CommentRated {
        /// Identifier of the comment the submission was for.
        id: CommentId,
        /// The authoritative comment on success, the failure otherwise.
        outcome: Result<ReviewComment, RatingError>,
    },

    /// The transient error display window elapsed.
    ClearError,
}
