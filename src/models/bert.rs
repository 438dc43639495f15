//! BERT encoder with a sequence-classification head.
//!
//! Covers `BertForSequenceClassification` checkpoints such as
//! `finiteautomata/beto-sentiment-analysis` (Spanish BETO, labels
//! `NEG`/`NEU`/`POS`):
//! - token, position and segment embeddings
//! - post-norm transformer layers
//! - tanh pooler over the `[CLS]` token followed by a linear classifier
//!
//! ```rust,no_run
//! use barrio_sentiment::models::bert::{BertSentimentModel, BertSentimentOptions};
//! use candle_core::Device;
//!
//! # fn run() -> anyhow::Result<()> {
//! let options = BertSentimentOptions::beto();
//! let tokenizer = BertSentimentModel::get_tokenizer(&options)?;
//! let model = BertSentimentModel::new(options, Device::Cpu)?;
//! let prediction = model.predict_with_score(&tokenizer, "el barrio cambió mucho")?;
//! println!("{} ({:.2})", prediction.label, prediction.score);
//! # Ok(())
//! # }
//! ```

use anyhow::{Error as E, Result as AnyhowResult};
use candle_core::{DType, Device, IndexOp, Module, Result, Tensor, D};
use candle_nn::{embedding, linear, ops::softmax, Embedding, LayerNorm, Linear, VarBuilder};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tokenizers::{Tokenizer, TruncationParams};

use crate::pipelines::sentiment_analysis_pipeline::{Prediction, SentimentAnalysisModel};
use crate::pipelines::utils::loaders::HfLoader;

/// Additive mask value for padded positions.
const MASK_FILL: f64 = -10_000.0;

/// Upper bound on tokenized input length, whatever the checkpoint allows.
pub const MAX_SEQUENCE_LENGTH: usize = 512;

pub const BETO_SENTIMENT_MODEL_ID: &str = "finiteautomata/beto-sentiment-analysis";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HiddenAct {
    #[default]
    Gelu,
    #[serde(rename = "gelu_new")]
    GeluApproximate,
    Relu,
}

impl HiddenAct {
    fn apply(&self, xs: &Tensor) -> Result<Tensor> {
        match self {
            HiddenAct::Gelu => xs.gelu_erf(),
            HiddenAct::GeluApproximate => xs.gelu(),
            HiddenAct::Relu => xs.relu(),
        }
    }
}

fn default_type_vocab_size() -> usize {
    2
}

fn default_layer_norm_eps() -> f64 {
    1e-12
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    pub vocab_size: usize,
    pub hidden_size: usize,
    pub num_hidden_layers: usize,
    pub num_attention_heads: usize,
    pub intermediate_size: usize,
    #[serde(default)]
    pub hidden_act: HiddenAct,
    pub max_position_embeddings: usize,
    #[serde(default = "default_type_vocab_size")]
    pub type_vocab_size: usize,
    #[serde(default = "default_layer_norm_eps")]
    pub layer_norm_eps: f64,
    #[serde(default)]
    pub pad_token_id: u32,
    #[serde(default)]
    pub id2label: HashMap<String, String>,
}

impl Config {
    pub fn num_labels(&self) -> usize {
        self.id2label.len()
    }

    /// Longest token sequence the position table can embed.
    pub fn max_input_length(&self) -> usize {
        self.max_position_embeddings.min(MAX_SEQUENCE_LENGTH)
    }
}

/// Older checkpoints store layer norms as `gamma`/`beta`.
fn bert_layer_norm(size: usize, eps: f64, vb: VarBuilder) -> Result<LayerNorm> {
    let (weight, bias) = match (vb.get(size, "weight"), vb.get(size, "bias")) {
        (Ok(weight), Ok(bias)) => (weight, bias),
        _ => (vb.get(size, "gamma")?, vb.get(size, "beta")?),
    };
    Ok(LayerNorm::new(weight, bias, eps))
}

#[derive(Debug, Clone)]
struct Embeddings {
    word: Embedding,
    position: Embedding,
    token_type: Embedding,
    norm: LayerNorm,
}

impl Embeddings {
    fn load(vb: VarBuilder, config: &Config) -> Result<Self> {
        let word = embedding(config.vocab_size, config.hidden_size, vb.pp("word_embeddings"))?;
        let position = embedding(
            config.max_position_embeddings,
            config.hidden_size,
            vb.pp("position_embeddings"),
        )?;
        let token_type = embedding(
            config.type_vocab_size,
            config.hidden_size,
            vb.pp("token_type_embeddings"),
        )?;
        let norm = bert_layer_norm(config.hidden_size, config.layer_norm_eps, vb.pp("LayerNorm"))?;
        Ok(Self {
            word,
            position,
            token_type,
            norm,
        })
    }

    fn forward(&self, input_ids: &Tensor, token_type_ids: &Tensor) -> Result<Tensor> {
        let (_batch, seq_len) = input_ids.dims2()?;
        let positions = Tensor::arange(0u32, seq_len as u32, input_ids.device())?.unsqueeze(0)?;

        let embeddings = self
            .word
            .forward(input_ids)?
            .add(&self.token_type.forward(token_type_ids)?)?
            .broadcast_add(&self.position.forward(&positions)?)?;
        embeddings.apply(&self.norm)
    }
}

#[derive(Debug, Clone)]
struct SelfAttention {
    query: Linear,
    key: Linear,
    value: Linear,
    output: Linear,
    norm: LayerNorm,
    num_attention_heads: usize,
    attention_head_size: usize,
}

impl SelfAttention {
    fn load(vb: VarBuilder, config: &Config) -> Result<Self> {
        let hidden = config.hidden_size;
        let query = linear(hidden, hidden, vb.pp("self.query"))?;
        let key = linear(hidden, hidden, vb.pp("self.key"))?;
        let value = linear(hidden, hidden, vb.pp("self.value"))?;
        let output = linear(hidden, hidden, vb.pp("output.dense"))?;
        let norm = bert_layer_norm(hidden, config.layer_norm_eps, vb.pp("output.LayerNorm"))?;

        Ok(Self {
            query,
            key,
            value,
            output,
            norm,
            num_attention_heads: config.num_attention_heads,
            attention_head_size: hidden / config.num_attention_heads,
        })
    }

    fn split_heads(&self, xs: &Tensor) -> Result<Tensor> {
        let (batch, seq_len, _) = xs.dims3()?;
        xs.reshape((
            batch,
            seq_len,
            self.num_attention_heads,
            self.attention_head_size,
        ))?
        .transpose(1, 2)?
        .contiguous()
    }

    fn forward(&self, hidden_states: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
        let (batch, seq_len, hidden_size) = hidden_states.dims3()?;

        let q = self.split_heads(&hidden_states.apply(&self.query)?)?;
        let k = self.split_heads(&hidden_states.apply(&self.key)?)?;
        let v = self.split_heads(&hidden_states.apply(&self.value)?)?;

        let scale = (self.attention_head_size as f64).powf(-0.5);
        let scores = (q.matmul(&k.t()?)? * scale)?.broadcast_add(attention_mask)?;
        let probs = softmax(&scores, D::Minus1)?;

        let context = probs
            .matmul(&v)?
            .transpose(1, 2)?
            .reshape((batch, seq_len, hidden_size))?;

        (context.apply(&self.output)? + hidden_states)?.apply(&self.norm)
    }
}

#[derive(Debug, Clone)]
struct Layer {
    attention: SelfAttention,
    intermediate: Linear,
    output: Linear,
    norm: LayerNorm,
    act: HiddenAct,
}

impl Layer {
    fn load(vb: VarBuilder, config: &Config) -> Result<Self> {
        let attention = SelfAttention::load(vb.pp("attention"), config)?;
        let intermediate = linear(
            config.hidden_size,
            config.intermediate_size,
            vb.pp("intermediate.dense"),
        )?;
        let output = linear(
            config.intermediate_size,
            config.hidden_size,
            vb.pp("output.dense"),
        )?;
        let norm = bert_layer_norm(
            config.hidden_size,
            config.layer_norm_eps,
            vb.pp("output.LayerNorm"),
        )?;

        Ok(Self {
            attention,
            intermediate,
            output,
            norm,
            act: config.hidden_act,
        })
    }

    fn forward(&self, hidden_states: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
        let attended = self.attention.forward(hidden_states, attention_mask)?;
        let ffn = self
            .act
            .apply(&attended.apply(&self.intermediate)?)?
            .apply(&self.output)?;
        (ffn + attended)?.apply(&self.norm)
    }
}

/// Bare encoder: embeddings plus the transformer stack.
#[derive(Debug, Clone)]
pub struct BertModel {
    embeddings: Embeddings,
    layers: Vec<Layer>,
}

impl BertModel {
    pub fn load(vb: VarBuilder, config: &Config) -> Result<Self> {
        let embeddings = Embeddings::load(vb.pp("embeddings"), config)?;
        let layers = (0..config.num_hidden_layers)
            .map(|i| Layer::load(vb.pp(format!("encoder.layer.{i}")), config))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { embeddings, layers })
    }

    /// Returns hidden states of shape `[batch, seq_len, hidden_size]`.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        let (batch, seq_len) = attention_mask.dims2()?;
        // 1 for real tokens becomes 0, 0 for padding becomes MASK_FILL.
        let mask = attention_mask
            .to_dtype(DType::F32)?
            .affine(-MASK_FILL, MASK_FILL)?
            .reshape((batch, 1, 1, seq_len))?;

        let mut hidden_states = self.embeddings.forward(input_ids, token_type_ids)?;
        for layer in &self.layers {
            hidden_states = layer.forward(&hidden_states, &mask)?;
        }
        Ok(hidden_states)
    }
}

/// Encoder, `[CLS]` pooler and classifier. Produces logits `[batch, num_labels]`.
#[derive(Debug, Clone)]
pub struct BertForSequenceClassification {
    bert: BertModel,
    pooler: Linear,
    classifier: Linear,
}

impl BertForSequenceClassification {
    pub fn load(vb: VarBuilder, config: &Config) -> Result<Self> {
        if config.num_labels() == 0 {
            candle_core::bail!("config has no id2label entries, cannot build a classifier head");
        }
        let bert_vb = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            vb.pp("bert")
        } else {
            vb.clone()
        };
        let bert = BertModel::load(bert_vb.clone(), config)?;
        let pooler = linear(config.hidden_size, config.hidden_size, bert_vb.pp("pooler.dense"))?;
        let classifier = linear(config.hidden_size, config.num_labels(), vb.pp("classifier"))?;
        Ok(Self {
            bert,
            pooler,
            classifier,
        })
    }

    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        let hidden_states = self
            .bert
            .forward(input_ids, token_type_ids, attention_mask)?;
        hidden_states
            .i((.., 0, ..))?
            .apply(&self.pooler)?
            .tanh()?
            .apply(&self.classifier)
    }
}

/// Where to fetch a BERT sentiment checkpoint from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BertSentimentOptions {
    pub model_id: String,
    pub revision: String,
    /// Local `tokenizer.json` to use instead of the one in the hub repo.
    pub tokenizer_file: Option<PathBuf>,
}

impl BertSentimentOptions {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            revision: "main".to_string(),
            tokenizer_file: None,
        }
    }

    /// Spanish BETO fine-tuned for sentiment (`NEG`/`NEU`/`POS`).
    pub fn beto() -> Self {
        Self::new(BETO_SENTIMENT_MODEL_ID)
    }
}

impl Default for BertSentimentOptions {
    fn default() -> Self {
        Self::beto()
    }
}

/// Sentiment model backed by a BERT sequence-classification checkpoint.
#[derive(Clone)]
pub struct BertSentimentModel {
    model: BertForSequenceClassification,
    device: Device,
    id2label: HashMap<String, String>,
}

fn load_config(loader: &HfLoader) -> AnyhowResult<Config> {
    let config_filename = loader.get("config.json")?;
    let config_content = std::fs::read_to_string(&config_filename).map_err(|e| {
        E::msg(format!(
            "Failed to read config file {config_filename:?}: {e}"
        ))
    })?;
    serde_json::from_str(&config_content)
        .map_err(|e| E::msg(format!("Failed to parse model config: {e}")))
}

fn configure_truncation(tokenizer: &mut Tokenizer, max_length: usize) -> AnyhowResult<()> {
    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length,
            ..Default::default()
        }))
        .map_err(|e| anyhow::anyhow!("Failed to configure truncation: {e}"))?;
    Ok(())
}

impl BertSentimentModel {
    pub fn new(options: BertSentimentOptions, device: Device) -> AnyhowResult<Self> {
        let loader = HfLoader::new(&options.model_id, &options.revision);

        let config = load_config(&loader)?;
        let weights_filename = loader.get_first(&["model.safetensors", "pytorch_model.bin"])?;

        let dtype = DType::F32;
        let vb = if weights_filename
            .extension()
            .is_some_and(|ext| ext == "safetensors")
        {
            // SAFETY: the file is owned by the hub cache and not modified while mapped.
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_filename], dtype, &device)? }
        } else if weights_filename
            .extension()
            .is_some_and(|ext| ext == "bin")
        {
            VarBuilder::from_pth(&weights_filename, dtype, &device)?
        } else {
            anyhow::bail!("Unsupported weight file format: {:?}", weights_filename);
        };

        let model = Self::load(vb, config, device)?;
        tracing::info!(
            model_id = %options.model_id,
            labels = model.id2label.len(),
            "loaded sentiment model"
        );
        Ok(model)
    }

    /// Build the model from an already-parsed config and weights.
    pub fn load(vb: VarBuilder, config: Config, device: Device) -> AnyhowResult<Self> {
        let model = BertForSequenceClassification::load(vb, &config)?;
        Ok(Self {
            model,
            device,
            id2label: config.id2label,
        })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Labels the checkpoint can emit, sorted by class index.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<(usize, &str)> = self
            .id2label
            .iter()
            .filter_map(|(id, label)| id.parse().ok().map(|id| (id, label.as_str())))
            .collect();
        labels.sort_by_key(|(id, _)| *id);
        labels.into_iter().map(|(_, label)| label).collect()
    }

    pub fn predict_with_score(
        &self,
        tokenizer: &Tokenizer,
        text: &str,
    ) -> AnyhowResult<Prediction> {
        let encoding = tokenizer
            .encode(text, true)
            .map_err(|e| E::msg(format!("Tokenization error: {e}")))?;

        let input_ids = Tensor::new(encoding.get_ids(), &self.device)?.unsqueeze(0)?;
        let token_type_ids = Tensor::new(encoding.get_type_ids(), &self.device)?.unsqueeze(0)?;
        let attention_mask =
            Tensor::new(encoding.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        let logits = self
            .model
            .forward(&input_ids, &token_type_ids, &attention_mask)?
            .squeeze(0)?;
        let probabilities = softmax(&logits, D::Minus1)?.to_vec1::<f32>()?;

        let (index, score) = probabilities
            .iter()
            .copied()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .ok_or_else(|| E::msg("Model returned no logits"))?;
        let label = self
            .id2label
            .get(&index.to_string())
            .ok_or_else(|| E::msg(format!("Predicted ID '{index}' not found in id2label map")))?
            .clone();

        Ok(Prediction { label, score })
    }

    /// Loads the tokenizer and truncates it to the checkpoint's position table.
    pub fn get_tokenizer(options: &BertSentimentOptions) -> AnyhowResult<Tokenizer> {
        let loader = HfLoader::new(&options.model_id, &options.revision);
        let config = load_config(&loader)?;

        let tokenizer_filename = match &options.tokenizer_file {
            Some(path) => path.clone(),
            None => loader.get("tokenizer.json")?,
        };

        let mut tokenizer = Tokenizer::from_file(&tokenizer_filename)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer {tokenizer_filename:?}: {e}"))?;
        configure_truncation(&mut tokenizer, config.max_input_length())?;
        Ok(tokenizer)
    }
}

impl SentimentAnalysisModel for BertSentimentModel {
    type Options = BertSentimentOptions;

    fn new(options: Self::Options, device: Device) -> AnyhowResult<Self> {
        BertSentimentModel::new(options, device)
    }

    fn predict_with_score(&self, tokenizer: &Tokenizer, text: &str) -> AnyhowResult<Prediction> {
        self.predict_with_score(tokenizer, text)
    }

    fn get_tokenizer(options: &Self::Options) -> AnyhowResult<Tokenizer> {
        Self::get_tokenizer(options)
    }

    fn device(&self) -> &Device {
        self.device()
    }
}
