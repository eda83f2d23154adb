use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gemini_client::ClassifierError;
use sentiment::{MalformedResponse, ReconcileError};
use thiserror::Error;
use tracing::{error, info};
use youtube_client::YouTubeError;

const GENERIC_FAILURE: &str = "An error occurred while analysing this video. Please try again later.";

/// Everything that can end an analysis request.
/// No partial page is rendered for any of these.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid YouTube URL")]
    InvalidUrl,

    #[error("video has no comments")]
    NoCommentsFound,

    #[error("malformed classifier response: {source}")]
    MalformedResponse {
        source: MalformedResponse,
        reply: String,
    },

    #[error("expected {expected} sentiments, received {received}")]
    LengthMismatch { expected: usize, received: usize },

    #[error("video data provider failed: {0}")]
    VideoProvider(#[from] YouTubeError),

    #[error("classifier failed: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("failed to render page: {0}")]
    Render(#[from] handlebars::RenderError),
}

impl AnalysisError {
    /// Attach the raw reply so it can be logged with the failure
    pub fn from_reconcile(err: ReconcileError, reply: &str) -> Self {
        match err {
            ReconcileError::Malformed(source) => Self::MalformedResponse {
                source,
                reply: reply.to_string(),
            },
            ReconcileError::LengthMismatch { expected, received } => {
                Self::LengthMismatch { expected, received }
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidUrl => StatusCode::BAD_REQUEST,
            Self::NoCommentsFound => StatusCode::NOT_FOUND,
            Self::VideoProvider(YouTubeError::VideoNotFound(_)) => StatusCode::NOT_FOUND,
            Self::VideoProvider(YouTubeError::Timeout) | Self::Classifier(ClassifierError::Timeout) => {
                StatusCode::GATEWAY_TIMEOUT
            }
            Self::MalformedResponse { .. }
            | Self::LengthMismatch { .. }
            | Self::VideoProvider(_)
            | Self::Classifier(_) => StatusCode::BAD_GATEWAY,
            Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown to the caller; diagnostic detail stays in the log
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidUrl => "Error: Invalid YouTube URL provided. Please go back and try again.",
            Self::NoCommentsFound => "Could not find any comments on this video.",
            Self::VideoProvider(YouTubeError::VideoNotFound(_)) => {
                "Error: No video exists for that URL. Please check it and try again."
            }
            Self::MalformedResponse { .. } => {
                "Error: The AI response did not contain a valid list of sentiments. Please try again."
            }
            Self::LengthMismatch { .. } => {
                "Error: The sentiment analysis returned a different number of results than comments. Please try again."
            }
            Self::VideoProvider(_) | Self::Classifier(_) | Self::Render(_) => GENERIC_FAILURE,
        }
    }

    fn log(&self) {
        match self {
            Self::InvalidUrl | Self::NoCommentsFound => info!(error = %self, "analysis rejected"),
            // counts were logged by the reconciler
            Self::LengthMismatch { .. } => {}
            Self::MalformedResponse { source, reply } => {
                error!(error = %source, raw_reply = %reply, "could not read classifier response")
            }
            Self::VideoProvider(_) | Self::Classifier(_) | Self::Render(_) => {
                error!(error = %self, "analysis failed")
            }
        }
    }
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        self.log();
        (self.status(), self.user_message()).into_response()
    }
}
