use domain::{AnalysedComment, Comment, Sentiment};
use thiserror::Error;
use tracing::{debug, warn};

use crate::literal::{self, LiteralError};

/// Ways a classifier reply can fail to be read as a label list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedResponse {
    #[error("reply does not contain a bracketed list")]
    NoList,

    #[error("reply list is not a list of strings: {0}")]
    Syntax(#[from] LiteralError),

    #[error("unknown sentiment label '{value}' at position {index}")]
    UnknownLabel { index: usize, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    #[error("malformed classifier response: {0}")]
    Malformed(#[from] MalformedResponse),

    #[error("expected {expected} sentiments, received {received}")]
    LengthMismatch { expected: usize, received: usize },
}

/// Returns the span from the first `[` to the last `]` after it
fn find_list(reply: &str) -> Option<&str> {
    let start = reply.find('[')?;
    let end = reply.rfind(']')?;
    (end > start).then(|| &reply[start..=end])
}

/// Align a classifier reply with the comments it was asked to label.
///
/// Surplus labels are dropped, too few is a [`ReconcileError::LengthMismatch`],
/// and every kept label must be one of the three sentiments.
pub fn reconcile(
    comments: &[Comment],
    reply: &str,
) -> Result<Vec<AnalysedComment>, ReconcileError> {
    let list = find_list(reply).ok_or(MalformedResponse::NoList)?;
    let mut labels = literal::parse_string_list(list).map_err(MalformedResponse::from)?;

    let expected = comments.len();
    let received = labels.len();
    if received < expected {
        warn!(expected, received, "classifier returned fewer sentiments than comments");
        return Err(ReconcileError::LengthMismatch { expected, received });
    }
    if received > expected {
        debug!(expected, received, "dropping surplus sentiments");
        labels.truncate(expected);
    }

    labels
        .into_iter()
        .zip(comments)
        .enumerate()
        .map(|(index, (label, comment))| -> Result<_, ReconcileError> {
            let sentiment = label
                .parse::<Sentiment>()
                .map_err(|_| MalformedResponse::UnknownLabel { index, value: label })?;
            Ok(AnalysedComment {
                comment: comment.clone(),
                sentiment,
            })
        })
        .collect()
}
