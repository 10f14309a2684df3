//! Error types exposed by the ratings layer.

use thiserror::Error;

/// Errors surfaced while validating input or submitting ratings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RatingError {
    /// The review identifier was blank.
    #[error("review identifier must not be empty")]
    MissingReviewId,

    /// The comment identifier was blank.
    #[error("comment identifier must not be empty")]
    MissingCommentId,

    /// The authentication token was missing.
    #[error("access token is required")]
    MissingToken,

    /// The rating service base URL could not be parsed.
    #[error("rating service URL is invalid: {0}")]
    InvalidServiceUrl(String),

    /// The rating service rejected the credentials.
    #[error("rating service rejected the token: {message}")]
    Authentication {
        /// Service error message returned with the 401/403 response.
        message: String,
    },

    /// The rating service returned a non-authentication API error.
    #[error("rating service error: {message}")]
    Api {
        /// HTTP status code of the failing response, when one was received.
        status: Option<u16>,
        /// Response body describing the failure.
        message: String,
    },

    /// Networking failed while calling the rating service.
    #[error("network error talking to the rating service: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The service response body could not be decoded.
    #[error("rating service returned an unreadable response: {message}")]
    Deserialisation {
        /// Decoder error detail.
        message: String,
    },
}
