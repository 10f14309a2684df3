//! End-to-end tests driving the review screen against a mock rating service.

use std::sync::{Arc, Mutex};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use plaudit::reviews::models::test_support::review_with_comments;
use plaudit::{
    AccessToken, CommentId, HttpRatingGateway, Reaction, ReviewDetailsScreen, TelemetryEvent,
    TelemetrySink,
};

fn screen_against(server: &MockServer, review_id: &str) -> ReviewDetailsScreen {
    let token = AccessToken::new("secret-token").expect("token should be accepted");
    let gateway = HttpRatingGateway::new(&token, &server.uri()).expect("gateway should build");
    ReviewDetailsScreen::spawn(
        review_with_comments(review_id, &["c1", "c2"]),
        Arc::new(gateway),
    )
}

#[tokio::test]
async fn confirmed_review_rating_applies_the_service_tallies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/reviews/rev-1/rate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "uuid": "rev-1",
            "body": "Worth a visit",
            "user": { "name": "bob" },
            "rate": "like",
            "likes": 12,
            "dislikes": 2,
            "comments": [],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let screen = screen_against(&server, "rev-1");
    let mut watcher = screen.watch();

    screen.rate_review(Reaction::Like);

    let settled = watcher
        .wait_for(|state| state.review.likes == 12)
        .await
        .expect("confirmed state should be published");
    assert_eq!(settled.review.reaction, Reaction::Like);
    assert!(!settled.review.processing);
    assert!(settled.error.is_none());
}

#[tokio::test]
async fn failed_comment_rating_reverts_the_thread_and_clears_the_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/comments/c1/rate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let original = review_with_comments("rev-1", &["c1", "c2"]);
    let screen = screen_against(&server, "rev-1");
    let mut watcher = screen.watch();

    screen.rate_comment(
        CommentId::new("c1").expect("id should be valid"),
        Reaction::Dislike,
    );

    let failed = watcher
        .wait_for(|state| state.error.is_some())
        .await
        .expect("failure state should be published");
    assert_eq!(
        failed.comments, original.comments,
        "the thread must end the operation unchanged"
    );
    drop(failed);

    let cleared = watcher
        .wait_for(|state| state.error.is_none())
        .await
        .expect("the error should clear on its own");
    assert_eq!(cleared.comments, original.comments);
}

#[derive(Debug, Default)]
struct RecordingSink {
    events: Mutex<Vec<TelemetryEvent>>,
}

impl RecordingSink {
    fn take(&self) -> Vec<TelemetryEvent> {
        self.events
            .lock()
            .expect("events mutex should be available")
            .drain(..)
            .collect()
    }
}

impl TelemetrySink for RecordingSink {
    fn record(&self, event: TelemetryEvent) {
        self.events
            .lock()
            .expect("events mutex should be available")
            .push(event);
    }
}

#[tokio::test]
async fn rollbacks_are_reported_to_telemetry_with_their_cause() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/comments/c1/rate"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&server)
        .await;

    let token = AccessToken::new("secret-token").expect("token should be accepted");
    let gateway = HttpRatingGateway::new(&token, &server.uri()).expect("gateway should build");
    let sink = Arc::new(RecordingSink::default());
    let screen = ReviewDetailsScreen::spawn_with_telemetry(
        review_with_comments("rev-1", &["c1", "c2"]),
        Arc::new(gateway),
        Arc::clone(&sink) as Arc<dyn TelemetrySink>,
    );
    let mut watcher = screen.watch();

    screen.rate_comment(
        CommentId::new("c1").expect("id should be valid"),
        Reaction::Like,
    );

    watcher
        .wait_for(|state| state.error.is_some())
        .await
        .expect("failure state should be published");

    assert_eq!(
        sink.take(),
        vec![TelemetryEvent::RatingRolledBack {
            entity_id: "c1".to_owned(),
            cause: "rating service error: maintenance".to_owned(),
        }]
    );
}

#[tokio::test]
async fn ratings_on_different_comments_run_independently() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/comments/c1/rate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "uuid": "c1",
            "body": "Comment c1",
            "user": { "name": "alice" },
            "rate": "like",
            "likes": 1,
            "dislikes": 0,
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/comments/c2/rate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "uuid": "c2",
            "body": "Comment c2",
            "user": { "name": "alice" },
            "rate": "dislike",
            "likes": 0,
            "dislikes": 1,
        })))
        .mount(&server)
        .await;

    let screen = screen_against(&server, "rev-1");
    let mut watcher = screen.watch();

    screen.rate_comment(
        CommentId::new("c1").expect("id should be valid"),
        Reaction::Like,
    );
    screen.rate_comment(
        CommentId::new("c2").expect("id should be valid"),
        Reaction::Dislike,
    );

    let settled = watcher
        .wait_for(|state| {
            state
                .comments
                .iter()
                .all(|comment| !comment.processing && comment.reaction != Reaction::Neutral)
        })
        .await
        .expect("both confirmations should be published");

    assert_eq!(
        settled
            .comments
            .iter()
            .map(|comment| comment.reaction)
            .collect::<Vec<_>>(),
        vec![Reaction::Like, Reaction::Dislike]
    );
    assert_eq!(
        settled.review.comments, settled.comments,
        "the review's embedded thread follows the collection"
    );
}
