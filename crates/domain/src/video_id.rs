use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length of every YouTube video id
pub const VIDEO_ID_LEN: usize = 11;

lazy_static::lazy_static! {
    /// Matches the known YouTube URL shapes and captures the 11-character id.
    /// The id must be followed by a terminator (quote, `&`, `?`, `/`, `#`,
    /// whitespace) or the end of input, so longer tokens are rejected.
    static ref VIDEO_URL_PATTERN: Regex = Regex::new(
        r#"(?:^|[^A-Za-z0-9-])(?:youtube\.com/(?:[^/\s]+/[^\s]+/|(?:v|e(?:mbed)?)/|[^\s]*[?&]v=|shorts/)|youtu\.be/)([A-Za-z0-9_-]{11})(?:["'&?/#\s]|$)"#
    )
    .expect("video url pattern should compile");
}

/// Error returned when a string is not a well-formed video id
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a valid YouTube video id")]
pub struct InvalidVideoId(pub String);

/// Identifier of a single YouTube video.
///
/// Always exactly 11 characters from `[A-Za-z0-9_-]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoId(String);

impl VideoId {
    /// Validate a bare id
    pub fn parse(raw: &str) -> Result<Self, InvalidVideoId> {
        let valid = raw.len() == VIDEO_ID_LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
        if valid {
            Ok(Self(raw.to_string()))
        } else {
            Err(InvalidVideoId(raw.to_string()))
        }
    }

    /// Extract the video id from a user supplied URL.
    ///
    /// Recognizes `watch?v=`, `embed/`, `v/`, `e/`, `shorts/` and `youtu.be/`
    /// links. Returns `None` for anything else rather than guessing.
    pub fn from_url(url: &str) -> Option<Self> {
        VIDEO_URL_PATTERN
            .captures(url.trim())
            .and_then(|caps| caps.get(1))
            .map(|m| Self(m.as_str().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for VideoId {
    type Err = InvalidVideoId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for VideoId {
    type Error = InvalidVideoId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VideoId> for String {
    fn from(id: VideoId) -> Self {
        id.0
    }
}
