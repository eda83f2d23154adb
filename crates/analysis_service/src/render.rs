use domain::{AnalysedComment, Sentiment, VideoMetadata};
use handlebars::{Handlebars, RenderError, TemplateError};
use sentiment::SentimentCounts;
use serde::Serialize;
use thiserror::Error;

/// Number of analysed comments listed on the results page
pub const DISPLAYED_COMMENTS: usize = 10;

const INDEX_TEMPLATE: &str = include_str!("../templates/index.hbs");
const RESULTS_TEMPLATE: &str = include_str!("../templates/results.hbs");

#[derive(Debug, Error)]
pub enum PagesError {
    #[error("invalid template: {0}")]
    Template(#[from] TemplateError),

    #[error("failed to render home page: {0}")]
    Render(#[from] RenderError),
}

/// Registered page templates plus the pre-rendered home page
pub struct Pages {
    registry: Handlebars<'static>,
    home: String,
}

impl Pages {
    pub fn new() -> Result<Self, PagesError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_template_string("index", INDEX_TEMPLATE)?;
        registry.register_template_string("results", RESULTS_TEMPLATE)?;

        // the form has no inputs from the request
        let home = registry.render("index", &serde_json::json!({}))?;

        Ok(Self { registry, home })
    }

    pub fn home(&self) -> &str {
        &self.home
    }

    pub fn results(&self, view: &ResultsView) -> Result<String, RenderError> {
        self.registry.render("results", view)
    }
}

#[derive(Debug, Serialize)]
pub struct ResultsView {
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub channel_title: Option<String>,
    pub published: Option<String>,
    pub total: usize,
    pub positive: LabelSummary,
    pub negative: LabelSummary,
    pub neutral: LabelSummary,
    pub comments: Vec<CommentRow>,
}

#[derive(Debug, Serialize)]
pub struct LabelSummary {
    pub count: usize,
    pub percent: u32,
}

#[derive(Debug, Serialize)]
pub struct CommentRow {
    pub text: String,
    pub sentiment: &'static str,
    pub class: &'static str,
}

impl ResultsView {
    /// Counts cover every pair; only the first [`DISPLAYED_COMMENTS`] are listed
    pub fn new(metadata: &VideoMetadata, counts: &SentimentCounts, pairs: &[AnalysedComment]) -> Self {
        let summary = |sentiment| LabelSummary {
            count: counts.count(sentiment),
            percent: counts.percentage(sentiment),
        };

        Self {
            title: metadata.title.clone(),
            thumbnail_url: metadata.thumbnail_url.clone(),
            channel_title: metadata.channel_title.clone(),
            published: metadata
                .published_at
                .map(|at| at.format("%B %-d, %Y").to_string()),
            total: counts.total,
            positive: summary(Sentiment::Positive),
            negative: summary(Sentiment::Negative),
            neutral: summary(Sentiment::Neutral),
            comments: pairs
                .iter()
                .take(DISPLAYED_COMMENTS)
                .map(|pair| CommentRow {
                    text: pair.comment.text().to_string(),
                    sentiment: pair.sentiment.as_str(),
                    class: css_class(pair.sentiment),
                })
                .collect(),
        }
    }
}

fn css_class(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "positive",
        Sentiment::Negative => "negative",
        Sentiment::Neutral => "neutral",
    }
}
