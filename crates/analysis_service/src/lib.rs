use axum::{
    Form, Router,
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use domain::VideoId;
use gemini_client::{ClassifierError, GeminiClient, SentimentClassifier};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{Instrument, Span, field, info, info_span};
use youtube_client::{VideoDataProvider, YouTubeClient, YouTubeError};

pub mod config;
pub mod error;
pub mod render;

pub use config::{AppConfig, ConfigError, TlsPaths};
pub use error::AnalysisError;
use render::{Pages, PagesError, ResultsView};

/// Shared, read-only handles used by every request
#[derive(Clone)]
pub struct AppState {
    pub videos: Arc<dyn VideoDataProvider>,
    pub classifier: Arc<dyn SentimentClassifier>,
    pub pages: Arc<Pages>,
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to set up YouTube client: {0}")]
    YouTube(#[from] YouTubeError),

    #[error("failed to set up Gemini client: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("failed to load page templates: {0}")]
    Pages(#[from] PagesError),
}

impl AppState {
    pub fn new(
        videos: Arc<dyn VideoDataProvider>,
        classifier: Arc<dyn SentimentClassifier>,
    ) -> Result<Self, StartupError> {
        Ok(Self {
            videos,
            classifier,
            pages: Arc::new(Pages::new()?),
        })
    }

    /// Wire the real YouTube and Gemini clients from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        let videos = YouTubeClient::new(
            config.api_key.clone(),
            config.youtube_base_url.clone(),
            config.request_timeout,
            config.comment_page_size,
        )?;
        let classifier = GeminiClient::new(
            &config.api_key,
            config.gemini_base_url.clone(),
            config.gemini_model.clone(),
            config.request_timeout,
        )?;
        Self::new(Arc::new(videos), Arc::new(classifier))
    }
}

/// Form posted by the home page
#[derive(Debug, Deserialize)]
pub struct AnalyseForm {
    #[serde(default)]
    pub youtube_url: String,
}

async fn home(State(state): State<AppState>) -> impl IntoResponse {
    Html(state.pages.home().to_string())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn analyse(State(state): State<AppState>, Form(form): Form<AnalyseForm>) -> Response {
    let span = info_span!(
        "analyse",
        request_id = %uuid::Uuid::new_v4(),
        video_id = field::Empty
    );
    // errors are turned into responses inside the span so their logs carry the request id
    async {
        match run_analysis(&state, &form.youtube_url).await {
            Ok(page) => Html(page).into_response(),
            Err(err) => err.into_response(),
        }
    }
    .instrument(span)
    .await
}

/// Fetch, classify, reconcile, count and render one video's comments
pub async fn run_analysis(state: &AppState, url: &str) -> Result<String, AnalysisError> {
    let video_id = VideoId::from_url(url).ok_or(AnalysisError::InvalidUrl)?;
    Span::current().record("video_id", video_id.as_str());

    let data = state.videos.fetch_video(&video_id).await?;
    if data.comments.is_empty() {
        return Err(AnalysisError::NoCommentsFound);
    }

    let reply = state.classifier.classify(&data.comments).await?;
    let pairs = sentiment::reconcile(&data.comments, &reply)
        .map_err(|err| AnalysisError::from_reconcile(err, &reply))?;

    let counts = sentiment::aggregate(&pairs);
    info!(
        total = counts.total,
        positive = counts.positive,
        negative = counts.negative,
        neutral = counts.neutral,
        "analysis complete"
    );

    let view = ResultsView::new(&data.metadata, &counts, &pairs);
    Ok(state.pages.results(&view)?)
}

/// Create the router for the analyser
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/analyse", post(analyse))
        .route("/healthz", get(healthz))
        .with_state(state)
}
