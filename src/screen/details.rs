//! Update-loop model for the review details screen.
//!
//! Each event is applied to the model synchronously and may produce a
//! [`Command`] that performs the asynchronous work and feeds its result back
//! as another event. Because every mutation goes through [`update`], the
//! model is a single-writer state machine: per entity it moves from idle to
//! pending (optimistic), then to confirmed or rolled back.
//!
//! [`update`]: ReviewDetailsModel::update

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::optimistic::{OptimisticMutation, Rateable};
use crate::reviews::error::RatingError;
use crate::reviews::gateway::RatingGateway;
use crate::reviews::models::{CommentId, Reaction, Review, ReviewComment};
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

use super::messages::{Command, ScreenEvent};

/// How long a failed submission stays visible before clearing itself.
pub const ERROR_DISPLAY_WINDOW: Duration = Duration::from_millis(100);

/// Observable state of the review details screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDetailsState {
    /// The review being displayed.
    pub review: Review,
    /// Comments in display order; the source of truth for the thread.
    pub comments: Vec<ReviewComment>,
    /// Error from the most recent failed submission, cleared automatically.
    pub error: Option<RatingError>,
}

/// Model owning the screen state and the per-entity pending mutations.
pub struct ReviewDetailsModel {
    review: Review,
    comments: Vec<ReviewComment>,
    error: Option<RatingError>,
    pending_review: Option<OptimisticMutation<Review>>,
    pending_comments: HashMap<CommentId, OptimisticMutation<ReviewComment>>,
    gateway: Arc<dyn RatingGateway>,
    telemetry: Arc<dyn TelemetrySink>,
}

impl ReviewDetailsModel {
    /// Creates a model for `review`, seeding the comment list from the
    /// review's embedded thread.
    #[must_use]
    pub fn new(review: Review, gateway: Arc<dyn RatingGateway>) -> Self {
        Self::with_telemetry(review, gateway, Arc::new(NoopTelemetrySink))
    }

    /// Creates a model that records rating outcomes to `telemetry`.
    #[must_use]
    pub fn with_telemetry(
        review: Review,
        gateway: Arc<dyn RatingGateway>,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        let comments = review.comments.clone();
        Self {
            review,
            comments,
            error: None,
            pending_review: None,
            pending_comments: HashMap::new(),
            gateway,
            telemetry,
        }
    }

    /// Returns a snapshot of the observable screen state.
    #[must_use]
    pub fn state(&self) -> ReviewDetailsState {
        ReviewDetailsState {
            review: self.review.clone(),
            comments: self.comments.clone(),
            error: self.error.clone(),
        }
    }

    /// Applies one event and returns the follow-up command, if any.
    pub fn update(&mut self, event: ScreenEvent) -> Option<Command> {
        match event {
            ScreenEvent::RateReview(reaction) => self.handle_rate_review(reaction),
            ScreenEvent::RateComment { id, reaction } => self.handle_rate_comment(&id, reaction),
            ScreenEvent::ReviewRated(outcome) => self.handle_review_rated(outcome),
            ScreenEvent::CommentRated { id, outcome } => self.handle_comment_rated(&id, outcome),
            ScreenEvent::ClearError => {
                self.error = None;
                None
            }
        }
    }

    /// Applies a review rating optimistically and submits it.
    ///
    /// A request while a submission is already in flight for the review is
    /// dropped, leaving state untouched.
    fn handle_rate_review(&mut self, reaction: Reaction) -> Option<Command> {
        if self.review.is_processing() {
            tracing::debug!(
                review = self.review.id.as_str(),
                "rating dropped: submission already in flight"
            );
            return None;
        }

        let (speculative, record) = OptimisticMutation::pre_apply(reaction, &self.review);
        self.review = speculative;
        self.pending_review = Some(record);

        let gateway = Arc::clone(&self.gateway);
        let review_id = self.review.id.clone();
        Some(Box::pin(async move {
            let outcome = gateway.submit_review_rating(&review_id, reaction).await;
            Some(ScreenEvent::ReviewRated(outcome))
        }))
    }

    /// Applies a comment rating optimistically and submits it.
    ///
    /// Requests for unknown comments, or for comments with a submission
    /// already in flight, are dropped.
    fn handle_rate_comment(&mut self, id: &CommentId, reaction: Reaction) -> Option<Command> {
        let Some(comment) = self.comments.iter().find(|comment| &comment.id == id) else {
            tracing::debug!(comment = id.as_str(), "rating dropped: comment not in thread");
            return None;
        };
        if comment.is_processing() {
            tracing::debug!(
                comment = id.as_str(),
                "rating dropped: submission already in flight"
            );
            return None;
        }

        let (speculative, record) = OptimisticMutation::pre_apply(reaction, comment);
        replace_by_id(&mut self.comments, speculative);
        self.pending_comments.insert(id.clone(), record);

        let gateway = Arc::clone(&self.gateway);
        let comment_id = id.clone();
        Some(Box::pin(async move {
            let outcome = gateway.submit_comment_rating(&comment_id, reaction).await;
            Some(ScreenEvent::CommentRated {
                id: comment_id,
                outcome,
            })
        }))
    }

    /// Resolves a review submission: the server value wins, or the snapshot
    /// is restored.
    fn handle_review_rated(&mut self, outcome: Result<Review, RatingError>) -> Option<Command> {
        let mut pending = self.pending_review.take();
        match outcome {
            Ok(confirmed) => {
                if let Some(record) = pending.as_mut() {
                    record.confirm();
                }
                self.telemetry.record(TelemetryEvent::RatingConfirmed {
                    entity_id: confirmed.id.as_str().to_owned(),
                    reaction: confirmed.reaction,
                });
                self.review = confirmed;
                None
            }
            Err(error) => {
                if let Some(prior) = pending.as_mut().and_then(OptimisticMutation::rollback) {
                    self.review = prior;
                }
                self.telemetry
                    .record(TelemetryEvent::rolled_back(self.review.id.as_str(), &error));
                tracing::warn!(
                    review = self.review.id.as_str(),
                    error = %error,
                    "review rating failed; rolled back"
                );
                Some(self.show_transient_error(error))
            }
        }
    }

    /// Resolves a comment submission: replace by identity on success, restore
    /// the snapshot by identity on failure.
    fn handle_comment_rated(
        &mut self,
        id: &CommentId,
        outcome: Result<ReviewComment, RatingError>,
    ) -> Option<Command> {
        let mut pending = self.pending_comments.remove(id);
        match outcome {
            Ok(confirmed) => {
                if let Some(record) = pending.as_mut() {
                    record.confirm();
                }
                self.telemetry.record(TelemetryEvent::RatingConfirmed {
                    entity_id: confirmed.id.as_str().to_owned(),
                    reaction: confirmed.reaction,
                });
                replace_by_id(&mut self.comments, confirmed);
                // The review's embedded thread is a denormalised view of the
                // comment collection; re-derive it on every confirmation.
                self.review.comments = self.comments.clone();
                None
            }
            Err(error) => {
                if let Some(prior) = pending.as_mut().and_then(OptimisticMutation::rollback) {
                    replace_by_id(&mut self.comments, prior);
                }
                self.telemetry
                    .record(TelemetryEvent::rolled_back(id.as_str(), &error));
                tracing::warn!(
                    comment = id.as_str(),
                    error = %error,
                    "comment rating failed; rolled back"
                );
                Some(self.show_transient_error(error))
            }
        }
    }

    /// Makes `error` visible and arms the timed clear.
    fn show_transient_error(&mut self, error: RatingError) -> Command {
        self.error = Some(error);
        Box::pin(async {
            tokio::time::sleep(ERROR_DISPLAY_WINDOW).await;
            Some(ScreenEvent::ClearError)
        })
    }
}

/// Replaces the comment with the same identity, if present.
fn replace_by_id(comments: &mut [ReviewComment], replacement: ReviewComment) {
    if let Some(slot) = comments
        .iter_mut()
        .find(|comment| comment.id == replacement.id)
    {
        *slot = replacement;
    }
}
