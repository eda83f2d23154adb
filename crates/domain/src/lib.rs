use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

mod video_id;

pub use video_id::{InvalidVideoId, VIDEO_ID_LEN, VideoId};

/// Represents the metadata shown above an analysis
#[derive(Debug, Clone, Serialize)]
pub struct VideoMetadata {
    pub id: VideoId,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub channel_title: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

/// A top level comment's display text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Comment(String);

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Comment {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Comment {
    fn from(text: String) -> Self {
        Self(text)
    }
}

/// Everything fetched from the video-data provider for one analysis.
/// Comments keep the provider's relevance order.
#[derive(Debug, Clone, Serialize)]
pub struct VideoData {
    pub metadata: VideoMetadata,
    pub comments: Vec<Comment>,
}

/// The closed vocabulary of the sentiment classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a label outside {Positive, Negative, Neutral}
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sentiment label '{0}'")]
pub struct UnknownSentiment(pub String);

impl FromStr for Sentiment {
    type Err = UnknownSentiment;

    /// Exact match only, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sentiment::ALL
            .into_iter()
            .find(|sentiment| sentiment.as_str() == s.trim())
            .ok_or_else(|| UnknownSentiment(s.to_string()))
    }
}

/// A comment paired with the label the classifier gave it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysedComment {
    pub comment: Comment,
    pub sentiment: Sentiment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_parses_exact_labels_only() {
        assert_eq!("Positive".parse(), Ok(Sentiment::Positive));
        assert_eq!(" Neutral\n".parse(), Ok(Sentiment::Neutral));
        assert_eq!("Negative".parse(), Ok(Sentiment::Negative));
        assert_eq!(
            "positive".parse::<Sentiment>(),
            Err(UnknownSentiment("positive".to_string()))
        );
        assert!("Mixed".parse::<Sentiment>().is_err());
        assert!("".parse::<Sentiment>().is_err());
    }

    #[test]
    fn comment_serializes_as_plain_string() {
        let json = serde_json::to_string(&Comment::new("great video")).unwrap();
        assert_eq!(json, "\"great video\"");

        let back: Comment = serde_json::from_str(&json).unwrap();
        assert_eq!(back.text(), "great video");
    }
}
