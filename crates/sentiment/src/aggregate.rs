use domain::{AnalysedComment, Sentiment};
use serde::Serialize;

/// Per-label tallies over a reconciled sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub total: usize,
}

impl SentimentCounts {
    pub fn count(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    /// Share of `sentiment` in whole percent, 0 for an empty sequence
    pub fn percentage(&self, sentiment: Sentiment) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.count(sentiment) as f64 * 100.0 / self.total as f64).round() as u32
    }
}

pub fn aggregate(pairs: &[AnalysedComment]) -> SentimentCounts {
    let mut counts = SentimentCounts {
        total: pairs.len(),
        ..Default::default()
    };
    for pair in pairs {
        match pair.sentiment {
            Sentiment::Positive => counts.positive += 1,
            Sentiment::Negative => counts.negative += 1,
            Sentiment::Neutral => counts.neutral += 1,
        }
    }
    counts
}
