//! URL validity aggregation.
//!
//! [`UrlValidator::score`] fetches the page once, then either returns the degraded
//! triple `{0, 50, 25.0}` (no content, or no model backends at all) or combines
//! relevance and neutrality with equal weights. Calls are independent: no cache, no
//! retry, no state carried between them.
//!
//! When content is present and only one backend is missing, that scorer alone takes
//! its fallback constant and the report still counts as [`Outcome::Scored`].

pub mod types;


pub use types::{DegradedReason, Outcome, Query, QueryError, ScoreComponents, ValidityReport};

use tracing::{debug, info};

use crate::config::Config;
use crate::embedding::Backends;
use crate::fetch::{FetchError, HttpFetcher, PageSource, PageText};
use crate::scoring::{NeutralityScorer, RelevanceScorer};

/// Scores how well a URL answers a query.
pub struct UrlValidator<S = HttpFetcher> {
    source: S,
    relevance: RelevanceScorer,
    neutrality: NeutralityScorer,
}

impl<S: std::fmt::Debug> std::fmt::Debug for UrlValidator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlValidator")
            .field("source", &self.source)
            .field("relevance", &self.relevance)
            .field("neutrality", &self.neutrality)
            .finish()
    }
}

impl UrlValidator<HttpFetcher> {
    /// Builds the HTTP fetcher and loads whichever backends the config names.
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let fetcher = HttpFetcher::new(config.user_agent.as_deref())?;
        Ok(Self::new(fetcher, Backends::load(config)))
    }
}

impl<S: PageSource> UrlValidator<S> {
    pub fn new(source: S, backends: Backends) -> Self {
        Self {
            source,
            relevance: RelevanceScorer::new(backends.embedder),
            neutrality: NeutralityScorer::new(backends.classifier),
        }
    }

    /// Returns `true` if at least one scorer has a backend.
    pub fn backends_available(&self) -> bool {
        self.relevance.is_available() || self.neutrality.is_available()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches `url` once and scores it against `query`.
    pub async fn score(&self, query: &Query, url: &str) -> ValidityReport {
        let report = match self.source.fetch(url).await {
            PageText::Text(content) => self.score_content(query, &content),
            PageText::Empty(reason) => ValidityReport::degraded(reason.into()),
        };

        info!(
            url = %url,
            status = report.outcome.status(),
            relevance = report.relevance(),
            neutrality = report.neutrality(),
            final_score = report.final_score(),
            "Scored URL"
        );

        report
    }

    /// Scores already-fetched page text against `query`.
    pub fn score_content(&self, query: &Query, content: &str) -> ValidityReport {
        if content.trim().is_empty() {
            return ValidityReport::degraded(DegradedReason::NoParagraphs);
        }
        if !self.backends_available() {
            debug!("No model backends, returning degraded result");
            return ValidityReport::degraded(DegradedReason::BackendsUnavailable);
        }

        let relevance = self.relevance.relevance(query.as_str(), content);
        let neutrality = self.neutrality.neutrality(content);

        ValidityReport::scored(ScoreComponents::combine(relevance, neutrality))
    }
}
