//! Comment sentiment classification.
//!
//! A [`SentimentClassifier`] first scans a comment for unambiguous safety
//! vocabulary ([`KeywordLexicon`]); only when nothing matches does it ask the
//! injected [`TextClassifier`] model.
//!
//! ```rust
//! use barrio_sentiment::classifier::*;
//!
//! struct AlwaysNeutral;
//!
//! impl TextClassifier for AlwaysNeutral {
//!     fn classify(&self, _text: &str) -> anyhow::Result<ModelPrediction> {
//!         Ok(ModelPrediction { label: "NEU".into(), score: 0.5 })
//!     }
//! }
//!
//! let classifier = SentimentClassifier::new(AlwaysNeutral);
//! let result = classifier.classify("Es un barrio Tranquilo pero muy Peligroso")?;
//! assert_eq!(result.label, SentimentLabel::Negative);
//! # Ok::<(), barrio_sentiment::core::SentimentError>(())
//! ```

pub mod lexicon;
pub mod sentiment;

pub use lexicon::{KeywordLexicon, Polarity, DEFAULT_NEGATIVE_KEYWORDS, DEFAULT_POSITIVE_KEYWORDS};
pub use sentiment::{
    Classification, Decision, FnClassifier, ModelPrediction, SentimentClassifier, SentimentLabel,
    SentimentResult, TextClassifier, KEYWORD_CONFIDENCE,
};
