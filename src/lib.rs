//! Plaudit library crate providing the review-rating screen core.
//!
//! The library applies a user's rating to a review or comment optimistically,
//! submits it to the remote rating service, and rolls the entity back when
//! the submission fails. All screen state transitions funnel through a
//! single-writer update loop so observers always see a consistent
//! review/comment graph, and service failures surface as transient,
//! self-clearing errors rather than propagating to callers.

pub mod optimistic;
pub mod reviews;
pub mod screen;
pub mod telemetry;

pub use optimistic::{OptimisticMutation, Rateable};
pub use reviews::{
    AccessToken, CommentId, HttpRatingGateway, RatingError, RatingGateway, Reaction, Review,
    ReviewComment, ReviewId,
};
pub use screen::{ReviewDetailsModel, ReviewDetailsScreen, ReviewDetailsState, ScreenEvent};
pub use telemetry::{JsonlTelemetrySink, NoopTelemetrySink, TelemetryEvent, TelemetrySink};
