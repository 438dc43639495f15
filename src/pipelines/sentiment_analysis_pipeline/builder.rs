use std::path::PathBuf;

use super::model::SentimentAnalysisModel;
use super::pipeline::SentimentAnalysisPipeline;
use crate::models::bert::{BertSentimentModel, BertSentimentOptions};
use crate::pipelines::utils::{DeviceRequest, DeviceSelectable};

pub struct SentimentAnalysisPipelineBuilder<M: SentimentAnalysisModel> {
    options: M::Options,
    device_request: DeviceRequest,
}

impl<M: SentimentAnalysisModel> SentimentAnalysisPipelineBuilder<M> {
    pub fn new(options: M::Options) -> Self {
        Self {
            options,
            device_request: DeviceRequest::Default,
        }
    }

    /// Loads the model and tokenizer. Downloads from the hub unless cached.
    pub fn build(self) -> anyhow::Result<SentimentAnalysisPipeline<M>> {
        let device = self.device_request.resolve()?;
        tracing::debug!(options = ?self.options, ?device, "building sentiment pipeline");
        let tokenizer = M::get_tokenizer(&self.options)?;
        let model = M::new(self.options, device)?;
        Ok(SentimentAnalysisPipeline { model, tokenizer })
    }
}

impl<M: SentimentAnalysisModel> DeviceSelectable for SentimentAnalysisPipelineBuilder<M> {
    fn device_request_mut(&mut self) -> &mut DeviceRequest {
        &mut self.device_request
    }
}

impl SentimentAnalysisPipelineBuilder<BertSentimentModel> {
    /// Spanish BETO sentiment checkpoint (`NEG`/`NEU`/`POS`).
    pub fn beto() -> Self {
        Self::new(BertSentimentOptions::beto())
    }

    /// Any BERT sequence-classification checkpoint on the hub.
    pub fn bert(model_id: impl Into<String>) -> Self {
        Self::new(BertSentimentOptions::new(model_id))
    }

    /// Switches to another hub checkpoint, keeping the other options.
    pub fn model_id(mut self, model_id: impl Into<String>) -> Self {
        self.options.model_id = model_id.into();
        self
    }

    /// Sets the git revision (branch, tag, commit hash) to use.
    pub fn revision(mut self, rev: impl Into<String>) -> Self {
        self.options.revision = rev.into();
        self
    }

    /// Uses a local `tokenizer.json` instead of the one in the repo.
    pub fn tokenizer_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.tokenizer_file = Some(path.into());
        self
    }
}
