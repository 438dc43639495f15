use super::model::SentimentAnalysisModel;
use crate::classifier::{ModelPrediction, TextClassifier};
use tokenizers::Tokenizer;

/// A sentiment prediction in the model's own label vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// The predicted tag (e.g. `"POS"`, `"NEG"`, `"NEU"` for BETO).
    pub label: String,
    /// Probability of that tag (0.0 to 1.0).
    pub score: f32,
}

/// Pipeline for sentiment analysis.
///
/// Use [`SentimentAnalysisPipelineBuilder`](super::SentimentAnalysisPipelineBuilder) to construct.
/// The pipeline implements [`TextClassifier`], so it can be handed straight to a
/// [`SentimentClassifier`](crate::classifier::SentimentClassifier) as its fallback.
///
/// ```rust,no_run
/// use barrio_sentiment::classifier::SentimentClassifier;
/// use barrio_sentiment::pipelines::sentiment_analysis_pipeline::*;
///
/// # fn run() -> anyhow::Result<()> {
/// let pipeline = SentimentAnalysisPipelineBuilder::beto().cpu().build()?;
/// let prediction = pipeline.predict("el parque está descuidado")?;
/// println!("{}: {:.2}", prediction.label, prediction.score);
///
/// let classifier = SentimentClassifier::new(pipeline);
/// let result = classifier.classify("muy peligroso de noche")?;
/// # Ok(())
/// # }
/// ```
pub struct SentimentAnalysisPipeline<M: SentimentAnalysisModel> {
    pub(crate) model: M,
    pub(crate) tokenizer: Tokenizer,
}

impl<M: SentimentAnalysisModel> SentimentAnalysisPipeline<M> {
    /// Predict the sentiment of text.
    pub fn predict(&self, text: &str) -> anyhow::Result<Prediction> {
        self.model.predict_with_score(&self.tokenizer, text)
    }

    /// Returns the device (CPU/GPU) the model is running on.
    pub fn device(&self) -> &candle_core::Device {
        self.model.device()
    }

    pub fn model(&self) -> &M {
        &self.model
    }
}

impl<M: SentimentAnalysisModel> TextClassifier for SentimentAnalysisPipeline<M> {
    fn classify(&self, text: &str) -> anyhow::Result<ModelPrediction> {
        let Prediction { label, score } = self.predict(text)?;
        Ok(ModelPrediction { label, score })
    }
}
