use async_trait::async_trait;
use domain::{Comment, VideoData, VideoId, VideoMetadata};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub mod types;

use types::{CommentThreadListResponse, ErrorEnvelope, VideosListResponse};

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Largest `maxResults` the commentThreads endpoint accepts
pub const MAX_RESULTS_PER_PAGE: usize = 100;

#[derive(Debug, Error)]
pub enum YouTubeError {
    #[error("video '{0}' was not found")]
    VideoNotFound(VideoId),

    #[error("YouTube API returned {status}: {message}")]
    Api {
        status: u16,
        reason: Option<String>,
        message: String,
    },

    #[error("YouTube API request timed out")]
    Timeout,

    #[error("http error: {0}")]
    Http(reqwest::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for YouTubeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

/// Source of video metadata and top level comments
#[async_trait]
pub trait VideoDataProvider: Send + Sync {
    async fn fetch_video(&self, id: &VideoId) -> Result<VideoData, YouTubeError>;
}

/// Client for the YouTube Data API v3
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    page_size: usize,
}

impl YouTubeClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
        page_size: usize,
    ) -> Result<Self, YouTubeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| YouTubeError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            page_size,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        query: &[(&str, &str)],
    ) -> Result<T, YouTubeError> {
        let url = format!("{}/{}", self.base_url, resource);
        debug!(%url, ?query, "requesting YouTube Data API");

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        Err(api_error(status, &body))
    }

    /// Title, thumbnail and channel details for one video
    pub async fn video_metadata(&self, id: &VideoId) -> Result<VideoMetadata, YouTubeError> {
        let response: VideosListResponse = self
            .get_json("videos", &[("part", "snippet"), ("id", id.as_str())])
            .await?;

        let snippet = response
            .items
            .into_iter()
            .find(|video| video.id == id.as_str())
            .and_then(|video| video.snippet)
            .ok_or_else(|| YouTubeError::VideoNotFound(id.clone()))?;

        Ok(VideoMetadata {
            id: id.clone(),
            title: snippet.title,
            thumbnail_url: snippet.thumbnails.best_url(),
            channel_title: snippet.channel_title,
            published_at: snippet.published_at,
        })
    }

    /// One page of top level comments in relevance order
    pub async fn top_comments(&self, id: &VideoId) -> Result<Vec<Comment>, YouTubeError> {
        let max_results = self.page_size.min(MAX_RESULTS_PER_PAGE).to_string();
        let result: Result<CommentThreadListResponse, _> = self
            .get_json(
                "commentThreads",
                &[
                    ("part", "snippet"),
                    ("videoId", id.as_str()),
                    ("maxResults", max_results.as_str()),
                    ("order", "relevance"),
                    ("textFormat", "plainText"),
                ],
            )
            .await;

        let response = match result {
            Ok(response) => response,
            Err(YouTubeError::Api { reason, .. }) if reason.as_deref() == Some("commentsDisabled") => {
                debug!(video_id = %id, "comments are disabled");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err),
        };

        if response.next_page_token.is_some() {
            debug!(video_id = %id, "more comments available, reading first page only");
        }

        let mut comments: Vec<Comment> = response
            .items
            .into_iter()
            .map(|thread| Comment::new(thread.snippet.top_level_comment.snippet.text_display))
            .collect();
        comments.truncate(self.page_size);

        debug!(video_id = %id, count = comments.len(), "fetched comments");
        Ok(comments)
    }
}

#[async_trait]
impl VideoDataProvider for YouTubeClient {
    async fn fetch_video(&self, id: &VideoId) -> Result<VideoData, YouTubeError> {
        let metadata = self.video_metadata(id).await?;
        let comments = self.top_comments(id).await?;
        Ok(VideoData { metadata, comments })
    }
}

fn api_error(status: StatusCode, body: &str) -> YouTubeError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => YouTubeError::Api {
            status: status.as_u16(),
            reason: envelope.error.reason().map(str::to_string),
            message: envelope.error.message,
        },
        Err(_) => YouTubeError::Api {
            status: status.as_u16(),
            reason: None,
            message: body.chars().take(200).collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_reads_google_envelope() {
        let err = api_error(
            StatusCode::FORBIDDEN,
            r#"{"error": {"code": 403, "message": "quota", "errors": [{"reason": "quotaExceeded"}]}}"#,
        );
        match err {
            YouTubeError::Api {
                status,
                reason,
                message,
            } => {
                assert_eq!(status, 403);
                assert_eq!(reason.as_deref(), Some("quotaExceeded"));
                assert_eq!(message, "quota");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn api_error_keeps_plain_body() {
        let err = api_error(StatusCode::BAD_GATEWAY, "upstream down");
        assert!(matches!(
            err,
            YouTubeError::Api { status: 502, reason: None, ref message } if message == "upstream down"
        ));
    }
}
