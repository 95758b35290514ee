//! Dataset assembly: score (prompt, URL) pairs and persist them as CSV.
//!
//! Output columns are `user_prompt,url_to_check,func_rating,custom_rating`, where
//! `func_rating` is the final validity score and `custom_rating` is the manual 1-5
//! rating supplied alongside the input (or simulated on request).

pub mod error;


pub use error::DatasetError;

use std::path::{Path, PathBuf};

use futures_util::stream::{self, StreamExt};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::fetch::PageSource;
use crate::validator::{Query, UrlValidator};

/// Accepted range for manual ratings.
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// CSV header written by [`write_csv`].
pub const CSV_HEADER: [&str; 4] = ["user_prompt", "url_to_check", "func_rating", "custom_rating"];

/// One input pair, optionally with its manual rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptUrl {
    pub user_prompt: String,
    pub url_to_check: String,
    #[serde(default)]
    pub custom_rating: Option<u8>,
}

impl PromptUrl {
    pub fn new(user_prompt: &str, url_to_check: &str) -> Self {
        Self {
            user_prompt: user_prompt.to_string(),
            url_to_check: url_to_check.to_string(),
            custom_rating: None,
        }
    }
}

/// One output row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRow {
    pub user_prompt: String,
    pub url_to_check: String,
    pub func_rating: f64,
    pub custom_rating: Option<u8>,
}

#[derive(Debug, Clone, Copy)]
pub struct AssembleOptions {
    /// Pairs scored at the same time. Values below 1 are treated as 1.
    pub concurrency: usize,
    /// Fill missing manual ratings with a uniform draw from 1..=5.
    pub simulate_ratings: bool,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            concurrency: 4,
            simulate_ratings: false,
        }
    }
}

/// Reads pairs from a CSV with `user_prompt,url_to_check[,custom_rating]` columns.
pub fn read_pairs(path: &Path) -> Result<Vec<PromptUrl>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let pairs = reader
        .deserialize::<PromptUrl>()
        .collect::<Result<Vec<_>, _>>()?;

    debug!(path = %path.display(), rows = pairs.len(), "Read input pairs");
    Ok(pairs)
}

/// Scores every pair and returns rows in input order.
///
/// Each pair is an independent validator call, so up to `options.concurrency` run at once.
pub async fn assemble<S: PageSource>(
    validator: &UrlValidator<S>,
    pairs: Vec<PromptUrl>,
    options: AssembleOptions,
) -> Result<Vec<DatasetRow>, DatasetError> {
    let mut prepared = Vec::with_capacity(pairs.len());
    for (row, pair) in pairs.into_iter().enumerate() {
        let query = Query::new(pair.user_prompt.as_str())
            .map_err(|source| DatasetError::InvalidQuery { row, source })?;
        if let Some(rating) = pair.custom_rating
            && !RATING_RANGE.contains(&rating)
        {
            return Err(DatasetError::InvalidRating { row, value: rating });
        }
        prepared.push((query, pair));
    }

    let total = prepared.len();
    let rows: Vec<DatasetRow> = stream::iter(prepared)
        .map(|(query, pair)| async move {
            let report = validator.score(&query, &pair.url_to_check).await;
            DatasetRow {
                user_prompt: pair.user_prompt,
                url_to_check: pair.url_to_check,
                func_rating: report.final_score(),
                custom_rating: pair.custom_rating,
            }
        })
        .buffered(options.concurrency.max(1))
        .collect()
        .await;

    let rows = if options.simulate_ratings {
        let mut rng = rand::thread_rng();
        rows.into_iter()
            .map(|mut row| {
                if row.custom_rating.is_none() {
                    row.custom_rating = Some(rng.gen_range(RATING_RANGE));
                }
                row
            })
            .collect()
    } else {
        rows
    };

    info!(rows = total, "Assembled dataset");
    Ok(rows)
}

/// Writes rows (header first, even when `rows` is empty).
pub fn write_csv(path: &Path, rows: &[DatasetRow]) -> Result<(), DatasetError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = rows.len(), "Wrote dataset CSV");
    Ok(())
}

/// `~/Desktop/deliverable.csv`, or `./deliverable.csv` when no home directory is set.
pub fn default_output_path() -> PathBuf {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(|home| PathBuf::from(home).join("Desktop"))
        .unwrap_or_default()
        .join("deliverable.csv")
}

/// Built-in sample prompts paired with URLs, each with a random manual rating in 1..=5.
pub fn sample_pairs() -> Vec<PromptUrl> {
    const PAIRS: [(&str, &str); 10] = [
        (
            "What are the benefits of a balanced diet?",
            "https://www.nasa.gov/mars-missions",
        ),
        (
            "How does machine learning work?",
            "https://www.foodnetwork.com/best-desserts",
        ),
        (
            "Tips for improving sleep quality?",
            "https://www.worldbank.org/economic-growth",
        ),
        (
            "What are the effects of climate change?",
            "https://www.fifa.com/world-cup-history",
        ),
        (
            "How to start investing in stocks?",
            "https://www.nobelprize.org/physics",
        ),
        (
            "Explain Newton’s laws of motion.",
            "https://www.who.int/mental-health",
        ),
        (
            "What are the advantages of electric cars?",
            "https://www.medicalnewstoday.com/heart-health",
        ),
        (
            "How to improve time management skills?",
            "https://www.techcrunch.com/startups",
        ),
        (
            "What are some easy yoga poses for beginners?",
            "https://www.bbc.com/history-world-war",
        ),
        (
            "Tell me about the history of Ancient Greece.",
            "https://www.cnn.com/latest-tech",
        ),
    ];

    let mut rng = rand::thread_rng();
    PAIRS
        .iter()
        .map(|(prompt, url)| PromptUrl {
            custom_rating: Some(rng.gen_range(RATING_RANGE)),
            ..PromptUrl::new(prompt, url)
        })
        .collect()
}
