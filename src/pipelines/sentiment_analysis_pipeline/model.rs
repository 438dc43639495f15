use tokenizers::Tokenizer;

use super::pipeline::Prediction;

/// A model that can back a [`SentimentAnalysisPipeline`](super::SentimentAnalysisPipeline).
pub trait SentimentAnalysisModel {
    type Options: std::fmt::Debug + Clone;

    fn new(options: Self::Options, device: candle_core::Device) -> anyhow::Result<Self>
    where
        Self: Sized;

    /// Predict the most likely label and its probability.
    fn predict_with_score(&self, tokenizer: &Tokenizer, text: &str) -> anyhow::Result<Prediction>;

    fn get_tokenizer(options: &Self::Options) -> anyhow::Result<Tokenizer>;

    fn device(&self) -> &candle_core::Device;
}
