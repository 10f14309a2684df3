//! Review domain models, rating errors, and the rating service gateway.
//!
//! This module owns the data model for reviews and their comment threads,
//! the error taxonomy for rating submissions, and the gateway seam used to
//! persist rating changes. Service responses are mapped into user-displayable
//! error variants so that callers can surface precise failures without
//! exposing transport internals.

pub mod error;
pub mod gateway;
pub mod models;

pub use error::RatingError;
pub use gateway::{AccessToken, HttpRatingGateway, RatingGateway};
pub use models::{CommentId, Reaction, Review, ReviewComment, ReviewId};

#[cfg(test)]
pub use gateway::MockRatingGateway;
