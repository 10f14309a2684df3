//! Single-writer driver for the review details screen.
//!
//! All state transitions funnel through one tokio task that owns the model.
//! User actions arrive as messages over a channel, and command results are
//! delivered back to the same task, so there is never more than one writer
//! for the screen's entity graph. Observers receive state snapshots through
//! a watch channel.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::{JoinHandle, JoinSet};

use crate::reviews::gateway::RatingGateway;
use crate::reviews::models::{CommentId, Reaction, Review};
use crate::telemetry::TelemetrySink;

use super::details::{ReviewDetailsModel, ReviewDetailsState};
use super::messages::ScreenEvent;

/// Handle to a running review details screen.
///
/// Dropping the handle stops the driver task and cancels any in-flight
/// commands, including an armed error-clear timer.
#[derive(Debug)]
pub struct ReviewDetailsScreen {
    events: mpsc::UnboundedSender<ScreenEvent>,
    state: watch::Receiver<ReviewDetailsState>,
    driver: JoinHandle<()>,
}

impl ReviewDetailsScreen {
    /// Spawns the driver task for `review`.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(review: Review, gateway: Arc<dyn RatingGateway>) -> Self {
        Self::spawn_model(ReviewDetailsModel::new(review, gateway))
    }

    /// Spawns the driver task for `review`, recording rating outcomes to
    /// `telemetry`.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn_with_telemetry(
        review: Review,
        gateway: Arc<dyn RatingGateway>,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self::spawn_model(ReviewDetailsModel::with_telemetry(review, gateway, telemetry))
    }

    fn spawn_model(model: ReviewDetailsModel) -> Self {
        let (events, events_rx) = mpsc::unbounded_channel();
        let (state_tx, state) = watch::channel(model.state());
        let driver = tokio::spawn(drive(model, events_rx, state_tx));
        Self {
            events,
            state,
            driver,
        }
    }

    /// Requests a rating for the review.
    pub fn rate_review(&self, reaction: Reaction) {
        let _ignored = self.events.send(ScreenEvent::RateReview(reaction));
    }

    /// Requests a rating for one comment in the thread.
    pub fn rate_comment(&self, id: CommentId, reaction: Reaction) {
        let _ignored = self.events.send(ScreenEvent::RateComment { id, reaction });
    }

    /// Returns a watcher over screen state snapshots.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<ReviewDetailsState> {
        self.state.clone()
    }

    /// Returns the current screen state.
    #[must_use]
    pub fn state(&self) -> ReviewDetailsState {
        self.state.borrow().clone()
    }
}

impl Drop for ReviewDetailsScreen {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

/// Runs the update loop until the handle is dropped.
async fn drive(
    mut model: ReviewDetailsModel,
    mut events: mpsc::UnboundedReceiver<ScreenEvent>,
    state: watch::Sender<ReviewDetailsState>,
) {
    let mut commands: JoinSet<Option<ScreenEvent>> = JoinSet::new();
    loop {
        let event = tokio::select! {
            received = events.recv() => match received {
                Some(event) => event,
                None => break,
            },
            Some(finished) = commands.join_next(), if !commands.is_empty() => match finished {
                Ok(Some(event)) => event,
                Ok(None) => continue,
                Err(error) => {
                    tracing::warn!(error = %error, "screen command aborted");
                    continue;
                }
            },
        };

        if let Some(command) = model.update(event) {
            commands.spawn(command);
        }
        let _ignored = state.send(model.state());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use crate::reviews::error::RatingError;
    use crate::reviews::gateway::{MockRatingGateway, RatingGateway};
    use crate::reviews::models::test_support::review_with_comments;
    use crate::reviews::models::{CommentId, Reaction, Review, ReviewComment, ReviewId};

    use super::*;

    fn service_failure() -> RatingError {
        RatingError::Api {
            status: Some(500),
            message: "boom".to_owned(),
        }
    }

    /// Gateway that parks each review submission until released, so the
    /// optimistic intermediate state stays observable.
    struct GatedGateway {
        release: Arc<Notify>,
        response: Review,
    }

    #[async_trait]
    impl RatingGateway for GatedGateway {
        async fn submit_review_rating(
            &self,
            _id: &ReviewId,
            _reaction: Reaction,
        ) -> Result<Review, RatingError> {
            self.release.notified().await;
            Ok(self.response.clone())
        }

        async fn submit_comment_rating(
            &self,
            _id: &CommentId,
            _reaction: Reaction,
        ) -> Result<ReviewComment, RatingError> {
            Err(service_failure())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn confirmed_rating_reaches_observers() {
        let review = review_with_comments("rev-1", &["c1"]);
        let confirmed = Review {
            reaction: Reaction::Like,
            likes: 4,
            ..review.clone()
        };

        let release = Arc::new(Notify::new());
        let gateway = GatedGateway {
            release: Arc::clone(&release),
            response: confirmed.clone(),
        };

        let screen = ReviewDetailsScreen::spawn(review, Arc::new(gateway));
        let mut watcher = screen.watch();

        screen.rate_review(Reaction::Like);

        let pending = watcher
            .wait_for(|state| state.review.processing)
            .await
            .expect("optimistic state should be published");
        assert_eq!(pending.review.reaction, Reaction::Like);
        drop(pending);

        release.notify_one();
        let settled = watcher
            .wait_for(|state| !state.review.processing)
            .await
            .expect("confirmed state should be published");
        assert_eq!(settled.review, confirmed);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_rating_rolls_back_and_error_clears() {
        let review = review_with_comments("rev-1", &["c1", "c2"]);

        let mut gateway = MockRatingGateway::new();
        gateway
            .expect_submit_comment_rating()
            .times(1)
            .returning(|_, _| Err(service_failure()));

        let screen = ReviewDetailsScreen::spawn(review.clone(), Arc::new(gateway));
        let mut watcher = screen.watch();

        screen.rate_comment(
            CommentId::new("c1").expect("id should be valid"),
            Reaction::Dislike,
        );

        let failed = watcher
            .wait_for(|state| state.error.is_some())
            .await
            .expect("failure state should be published");
        assert_eq!(failed.comments, review.comments, "thread must be restored");
        assert_eq!(failed.error, Some(service_failure()));
        drop(failed);

        let cleared = watcher
            .wait_for(|state| state.error.is_none())
            .await
            .expect("error should clear on its own");
        assert_eq!(cleared.comments, review.comments);
    }

    /// Gateway that parks every submission until the screen is torn down.
    struct StalledGateway {
        started: Arc<Notify>,
    }

    #[async_trait]
    impl RatingGateway for StalledGateway {
        async fn submit_review_rating(
            &self,
            _id: &ReviewId,
            _reaction: Reaction,
        ) -> Result<Review, RatingError> {
            self.started.notify_one();
            std::future::pending().await
        }

        async fn submit_comment_rating(
            &self,
            _id: &CommentId,
            _reaction: Reaction,
        ) -> Result<ReviewComment, RatingError> {
            self.started.notify_one();
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_screen_cancels_in_flight_commands() {
        let started = Arc::new(Notify::new());
        let gateway = StalledGateway {
            started: Arc::clone(&started),
        };

        let screen = ReviewDetailsScreen::spawn(
            review_with_comments("rev-1", &[]),
            Arc::new(gateway),
        );
        screen.rate_review(Reaction::Like);
        started.notified().await;

        drop(screen);

        // The driver and its stalled command are aborted; nothing is left to
        // wake, so the paused clock advancing proves the test is not hung.
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}
