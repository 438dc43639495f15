//! Sentiment analysis pipeline.
//!
//! Classifies text with a pre-trained transformer checkpoint and returns the
//! model's own tag together with its probability. This is the model fallback
//! behind [`SentimentClassifier`](crate::classifier::SentimentClassifier).
//!
//! ## Main Types
//!
//! - [`SentimentAnalysisPipeline`] - High-level interface for sentiment classification
//! - [`SentimentAnalysisPipelineBuilder`] - Builder pattern for pipeline configuration
//! - [`SentimentAnalysisModel`] - Trait for sentiment analysis model implementations
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use barrio_sentiment::pipelines::sentiment_analysis_pipeline::*;
//!
//! # fn run() -> anyhow::Result<()> {
//! let pipeline = SentimentAnalysisPipelineBuilder::beto().build()?;
//! let result = pipeline.predict("el barrio ha cambiado")?;
//! println!("Sentiment: {} (confidence: {:.2})", result.label, result.score);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod model;
pub mod pipeline;

pub use builder::SentimentAnalysisPipelineBuilder;
pub use model::SentimentAnalysisModel;
pub use pipeline::{Prediction, SentimentAnalysisPipeline};

pub use crate::models::bert::{BertSentimentModel, BertSentimentOptions};
pub use crate::pipelines::utils::DeviceSelectable;
