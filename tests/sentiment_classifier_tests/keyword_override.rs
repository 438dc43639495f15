// Keyword rules run before the model and always win.

use barrio_sentiment::classifier::*;
use std::cell::Cell;

struct CountingModel {
    calls: Cell<usize>,
}

impl TextClassifier for CountingModel {
    fn classify(&self, _text: &str) -> anyhow::Result<ModelPrediction> {
        self.calls.set(self.calls.get() + 1);
        Ok(ModelPrediction {
            label: "POS".to_string(),
            score: 0.99,
        })
    }
}

fn classifier() -> SentimentClassifier<CountingModel> {
    SentimentClassifier::new(CountingModel { calls: Cell::new(0) })
}

#[test]
fn negative_wins_over_positive() -> anyhow::Result<()> {
    let classifier = classifier();
    let result = classifier.classify("Es un barrio Tranquilo pero muy Peligroso")?;
    assert_eq!(
        result,
        SentimentResult {
            label: SentimentLabel::Negative,
            confidence: 1.0
        }
    );
    assert_eq!(classifier.model().calls.get(), 0);
    Ok(())
}

#[test]
fn positive_keyword_without_negative() -> anyhow::Result<()> {
    let classifier = classifier();
    let result = classifier.classify("El barrio es muy seguro y agradable")?;
    assert_eq!(result.label, SentimentLabel::Positive);
    assert_eq!(result.confidence, KEYWORD_CONFIDENCE);
    assert_eq!(classifier.model().calls.get(), 0);
    Ok(())
}

#[test]
fn every_default_negative_keyword_is_negative() -> anyhow::Result<()> {
    let classifier = classifier();
    for keyword in DEFAULT_NEGATIVE_KEYWORDS {
        let comment = format!("la gente dice que es {} y bueno", keyword.to_uppercase());
        assert_eq!(
            classifier.classify(&comment)?.label,
            SentimentLabel::Negative,
            "{comment}"
        );
    }
    Ok(())
}

#[test]
fn every_default_positive_keyword_is_positive() -> anyhow::Result<()> {
    let classifier = classifier();
    for keyword in DEFAULT_POSITIVE_KEYWORDS {
        let comment = format!("me parece {keyword}");
        assert_eq!(
            classifier.classify(&comment)?.label,
            SentimentLabel::Positive,
            "{comment}"
        );
    }
    Ok(())
}

#[test]
fn case_insensitive() -> anyhow::Result<()> {
    let classifier = classifier();
    assert_eq!(
        classifier.classify("PELIGROSO")?,
        classifier.classify("peligroso")?
    );
    // non-ASCII keyword with an uppercase accented letter
    assert_eq!(
        classifier.classify("Muy CÓMODO")?.label,
        SentimentLabel::Positive
    );
    Ok(())
}

#[test]
fn substring_match_inside_words() -> anyhow::Result<()> {
    let classifier = classifier();
    // "inseguro" contains "seguro" but negative is scanned first
    assert_eq!(
        classifier.classify("Me siento insegura... no, inseguro")?.label,
        SentimentLabel::Negative
    );
    // "malo" inside "malos"
    assert_eq!(
        classifier.classify("vecinos malos")?.label,
        SentimentLabel::Negative
    );
    Ok(())
}
