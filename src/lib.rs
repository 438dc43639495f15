pub mod classifier;
pub mod core;
pub mod models;
pub mod pipelines;
pub mod reports;

// Re-export the types most callers need
pub use classifier::{
    FnClassifier, KeywordLexicon, ModelPrediction, SentimentClassifier, SentimentLabel,
    SentimentResult, TextClassifier,
};
pub use crate::core::{ClassifierConfig, RecordError, SentimentError};

pub use models::bert::{BertSentimentModel, BertSentimentOptions};
