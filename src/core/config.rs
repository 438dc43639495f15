use std::path::Path;

use serde::Deserialize;

use super::error::SentimentError;
use crate::classifier::lexicon::{DEFAULT_NEGATIVE_KEYWORDS, DEFAULT_POSITIVE_KEYWORDS};

fn default_negative() -> Vec<String> {
    DEFAULT_NEGATIVE_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

fn default_positive() -> Vec<String> {
    DEFAULT_POSITIVE_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

/// Keyword lists as they appear in a config file.
///
/// A list left out of the file keeps its built-in keywords.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LexiconConfig {
    #[serde(default = "default_negative")]
    pub negative: Vec<String>,
    #[serde(default = "default_positive")]
    pub positive: Vec<String>,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            negative: default_negative(),
            positive: default_positive(),
        }
    }
}

/// Configuration for the comment classifier.
///
/// ```json
/// { "lexicon": { "negative": ["peligroso"], "positive": ["seguro"] } }
/// ```
///
/// A missing `lexicon` section keeps the built-in Spanish keyword lists.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub lexicon: Option<LexiconConfig>,
}

impl ClassifierConfig {
    pub fn from_json_str(json: &str) -> Result<Self, SentimentError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SentimentError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}
