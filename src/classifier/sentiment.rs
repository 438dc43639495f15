use std::sync::Arc;

use serde::Serialize;

use super::lexicon::{KeywordLexicon, Polarity};
use crate::core::{ClassifierConfig, SentimentError};

/// Confidence reported for keyword-rule matches.
pub const KEYWORD_CONFIDENCE: f32 = 1.0;

/// Sentiment bucket assigned to a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    NeutralOrUnknown,
}

impl SentimentLabel {
    /// Map a label from the model's own vocabulary.
    ///
    /// `POS`/`POSITIVE` and `NEG`/`NEGATIVE` (any ASCII case) are recognized;
    /// every other tag, including neutral ones the model may emit, maps to
    /// [`SentimentLabel::NeutralOrUnknown`].
    pub fn from_model_tag(tag: &str) -> Self {
        let tag = tag.trim();
        if tag.eq_ignore_ascii_case("pos") || tag.eq_ignore_ascii_case("positive") {
            SentimentLabel::Positive
        } else if tag.eq_ignore_ascii_case("neg") || tag.eq_ignore_ascii_case("negative") {
            SentimentLabel::Negative
        } else {
            SentimentLabel::NeutralOrUnknown
        }
    }

    /// Value plotted on the sentiment timeline.
    pub fn timeline_value(&self) -> i8 {
        match self {
            SentimentLabel::Positive => 1,
            SentimentLabel::Negative => -1,
            SentimentLabel::NeutralOrUnknown => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
            SentimentLabel::NeutralOrUnknown => "NEUTRAL_OR_UNKNOWN",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<Polarity> for SentimentLabel {
    fn from(polarity: Polarity) -> Self {
        match polarity {
            Polarity::Negative => SentimentLabel::Negative,
            Polarity::Positive => SentimentLabel::Positive,
        }
    }
}

/// Label and confidence for one comment. Computed per call, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    pub confidence: f32,
}

/// Raw output of a text-classification model, in the model's vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelPrediction {
    pub label: String,
    pub score: f32,
}

/// Capability consumed by [`SentimentClassifier`] when no keyword matches.
///
/// Any local model, remote service or test stub can stand behind it.
pub trait TextClassifier {
    fn classify(&self, text: &str) -> anyhow::Result<ModelPrediction>;
}

impl<T: TextClassifier + ?Sized> TextClassifier for &T {
    fn classify(&self, text: &str) -> anyhow::Result<ModelPrediction> {
        (**self).classify(text)
    }
}

impl<T: TextClassifier + ?Sized> TextClassifier for Box<T> {
    fn classify(&self, text: &str) -> anyhow::Result<ModelPrediction> {
        (**self).classify(text)
    }
}

impl<T: TextClassifier + ?Sized> TextClassifier for Arc<T> {
    fn classify(&self, text: &str) -> anyhow::Result<ModelPrediction> {
        (**self).classify(text)
    }
}

/// Adapts a closure into a [`TextClassifier`].
///
/// ```rust
/// use barrio_sentiment::classifier::{FnClassifier, ModelPrediction, SentimentClassifier};
///
/// let model = FnClassifier(|_text: &str| -> anyhow::Result<ModelPrediction> {
///     Ok(ModelPrediction { label: "POS".into(), score: 0.9 })
/// });
/// let classifier = SentimentClassifier::new(model);
/// assert_eq!(classifier.classify("sin novedad")?.confidence, 0.9);
/// # Ok::<(), barrio_sentiment::core::SentimentError>(())
/// ```
pub struct FnClassifier<F>(pub F);

impl<F> TextClassifier for FnClassifier<F>
where
    F: Fn(&str) -> anyhow::Result<ModelPrediction>,
{
    fn classify(&self, text: &str) -> anyhow::Result<ModelPrediction> {
        (self.0)(text)
    }
}

/// Where a classification came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// A lexicon keyword matched.
    Keyword(String),
    /// The model fallback answered with this raw tag.
    Model { raw_label: String },
}

/// A [`SentimentResult`] together with the rule or model that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub result: SentimentResult,
    pub decision: Decision,
}

/// Keyword-first comment classifier.
///
/// Negative keywords are checked before positive ones, so a comment that
/// mentions danger is negative even if it also sounds reassuring. Comments
/// without any keyword are handed, lowercased, to the injected model.
pub struct SentimentClassifier<M> {
    lexicon: KeywordLexicon,
    model: M,
}

impl<M: TextClassifier> SentimentClassifier<M> {
    /// Classifier with the built-in lexicon.
    pub fn new(model: M) -> Self {
        Self::with_lexicon(model, KeywordLexicon::default())
    }

    pub fn with_lexicon(model: M, lexicon: KeywordLexicon) -> Self {
        Self { lexicon, model }
    }

    pub fn from_config(model: M, config: &ClassifierConfig) -> Result<Self, SentimentError> {
        let lexicon = match &config.lexicon {
            Some(lexicon) => KeywordLexicon::from_config(lexicon)?,
            None => KeywordLexicon::default(),
        };
        Ok(Self::with_lexicon(model, lexicon))
    }

    pub fn lexicon(&self) -> &KeywordLexicon {
        &self.lexicon
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Classify a comment.
    pub fn classify(&self, comment: &str) -> Result<SentimentResult, SentimentError> {
        self.classify_detailed(comment).map(|c| c.result)
    }

    /// Classify a comment and report which keyword or model tag decided it.
    pub fn classify_detailed(&self, comment: &str) -> Result<Classification, SentimentError> {
        let normalized = comment.to_lowercase();

        if let Some((polarity, keyword)) = self.lexicon.find_match(&normalized) {
            tracing::debug!(keyword, ?polarity, "keyword rule matched");
            return Ok(Classification {
                result: SentimentResult {
                    label: polarity.into(),
                    confidence: KEYWORD_CONFIDENCE,
                },
                decision: Decision::Keyword(keyword.to_string()),
            });
        }

        let prediction = self.model.classify(&normalized).map_err(|e| {
            tracing::warn!(error = %e, "sentiment model fallback failed");
            SentimentError::unavailable(e)
        })?;
        tracing::debug!(label = %prediction.label, score = prediction.score, "model fallback");

        Ok(Classification {
            result: SentimentResult {
                label: SentimentLabel::from_model_tag(&prediction.label),
                confidence: prediction.score,
            },
            decision: Decision::Model {
                raw_label: prediction.label,
            },
        })
    }
}
