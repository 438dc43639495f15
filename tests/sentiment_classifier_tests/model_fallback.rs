// Comments without keywords are decided by the injected model.

use anyhow::anyhow;
use barrio_sentiment::classifier::*;
use barrio_sentiment::SentimentError;
use std::sync::Arc;

struct FixedModel {
    label: &'static str,
    score: f32,
}

impl TextClassifier for FixedModel {
    fn classify(&self, _text: &str) -> anyhow::Result<ModelPrediction> {
        Ok(ModelPrediction {
            label: self.label.to_string(),
            score: self.score,
        })
    }
}

struct BrokenModel;

impl TextClassifier for BrokenModel {
    fn classify(&self, _text: &str) -> anyhow::Result<ModelPrediction> {
        Err(anyhow!("weights not loaded"))
    }
}

#[test]
fn neutral_model_result_passes_through() -> anyhow::Result<()> {
    let classifier = SentimentClassifier::new(FixedModel {
        label: "NEU",
        score: 0.62,
    });
    let result = classifier.classify("El clima estuvo regular")?;
    assert_eq!(result.label, SentimentLabel::NeutralOrUnknown);
    assert_eq!(result.confidence, 0.62);
    Ok(())
}

#[test]
fn model_labels_are_remapped() -> anyhow::Result<()> {
    for (tag, expected) in [
        ("POS", SentimentLabel::Positive),
        ("NEG", SentimentLabel::Negative),
        ("NEU", SentimentLabel::NeutralOrUnknown),
        ("joy", SentimentLabel::NeutralOrUnknown),
    ] {
        let classifier = SentimentClassifier::new(FixedModel {
            label: tag,
            score: 0.8,
        });
        let result = classifier.classify("hay un parque nuevo")?;
        assert_eq!(result.label, expected, "{tag}");
        assert_eq!(result.confidence, 0.8);
    }
    Ok(())
}

#[test]
fn empty_comment_reaches_model() -> anyhow::Result<()> {
    let classifier = SentimentClassifier::new(FixedModel {
        label: "NEG",
        score: 0.51,
    });
    let classification = classifier.classify_detailed("")?;
    assert_eq!(classification.result.label, SentimentLabel::Negative);
    assert_eq!(
        classification.decision,
        Decision::Model {
            raw_label: "NEG".to_string()
        }
    );
    Ok(())
}

#[test]
fn repeated_calls_are_identical() -> anyhow::Result<()> {
    let classifier = SentimentClassifier::new(FixedModel {
        label: "POS",
        score: 0.9,
    });
    for text in ["", "calles oscuras", "peligroso", "agradable"] {
        assert_eq!(classifier.classify(text)?, classifier.classify(text)?);
    }
    Ok(())
}

#[test]
fn model_failure_is_not_neutral() {
    let classifier = SentimentClassifier::new(BrokenModel);
    let err = classifier.classify("sin palabras clave").unwrap_err();
    assert!(matches!(err, SentimentError::ClassificationUnavailable { .. }));
    assert!(err.to_string().contains("weights not loaded"));
}

#[test]
fn model_failure_does_not_affect_keyword_path() -> anyhow::Result<()> {
    let classifier = SentimentClassifier::new(BrokenModel);
    assert_eq!(
        classifier.classify("muy violento")?.label,
        SentimentLabel::Negative
    );
    Ok(())
}

#[test]
fn shared_model_handle() -> anyhow::Result<()> {
    let model: Arc<dyn TextClassifier + Send + Sync> = Arc::new(FixedModel {
        label: "POS",
        score: 0.75,
    });
    let first = SentimentClassifier::new(Arc::clone(&model));
    let second = SentimentClassifier::new(model);
    assert_eq!(first.classify("x")?, second.classify("x")?);
    Ok(())
}
