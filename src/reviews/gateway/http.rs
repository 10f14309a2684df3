//! HTTP implementation of the rating gateway.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use url::Url;

use crate::reviews::error::RatingError;
use crate::reviews::models::{
    ApiComment, ApiReview, CommentId, Reaction, Review, ReviewComment, ReviewId,
};

use super::RatingGateway;

/// Access token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::MissingToken`] when the supplied string is
    /// blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, RatingError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RatingError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

/// JSON request body for a rating submission.
#[derive(Debug, Serialize)]
struct RateRequest {
    rate: Reaction,
}

/// Gateway that submits ratings over HTTP.
pub struct HttpRatingGateway {
    client: Client,
    base: Url,
    token: AccessToken,
}

impl HttpRatingGateway {
    /// Creates a gateway for the given token and API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::InvalidServiceUrl`] when the base URL cannot be
    /// parsed, and [`RatingError::Network`] when the HTTP client cannot be
    /// built.
    pub fn new(token: &AccessToken, api_base: &str) -> Result<Self, RatingError> {
        let base = Url::parse(api_base)
            .map_err(|error| RatingError::InvalidServiceUrl(error.to_string()))?;
        let client = Client::builder()
            .build()
            .map_err(|error| RatingError::Network {
                message: error.to_string(),
            })?;
        Ok(Self {
            client,
            base,
            token: token.clone(),
        })
    }

    /// Resolves a path relative to the service base URL.
    fn endpoint(&self, path: &str) -> Result<Url, RatingError> {
        let joined = format!("{}/{path}", self.base.as_str().trim_end_matches('/'));
        Url::parse(&joined).map_err(|error| RatingError::InvalidServiceUrl(error.to_string()))
    }

    /// Posts a reaction to `url` and validates the response status.
    async fn post_rating(&self, url: Url, reaction: Reaction) -> Result<Response, RatingError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(self.token.value())
            .json(&RateRequest { rate: reaction })
            .send()
            .await
            .map_err(|error| RatingError::Network {
                message: error.to_string(),
            })?;
        ensure_success(response).await
    }
}

/// Maps non-success statuses onto the rating error taxonomy.
async fn ensure_success(response: Response) -> Result<Response, RatingError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    tracing::warn!(status = status.as_u16(), "rating service returned an error");
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Err(RatingError::Authentication { message })
        }
        _ => Err(RatingError::Api {
            status: Some(status.as_u16()),
            message,
        }),
    }
}

/// Decodes a JSON response body.
async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, RatingError> {
    response
        .json::<T>()
        .await
        .map_err(|error| RatingError::Deserialisation {
            message: error.to_string(),
        })
}

#[async_trait]
impl RatingGateway for HttpRatingGateway {
    async fn submit_review_rating(
        &self,
        id: &ReviewId,
        reaction: Reaction,
    ) -> Result<Review, RatingError> {
        let url = self.endpoint(&format!("reviews/{}/rate", id.as_str()))?;
        tracing::debug!(review = id.as_str(), ?reaction, "submitting review rating");
        let response = self.post_rating(url, reaction).await?;
        let api: ApiReview = decode(response).await?;
        api.try_into()
    }

    async fn submit_comment_rating(
        &self,
        id: &CommentId,
        reaction: Reaction,
    ) -> Result<ReviewComment, RatingError> {
        let url = self.endpoint(&format!("comments/{}/rate", id.as_str()))?;
        tracing::debug!(comment = id.as_str(), ?reaction, "submitting comment rating");
        let response = self.post_rating(url, reaction).await?;
        let api: ApiComment = decode(response).await?;
        api.try_into()
    }
}
