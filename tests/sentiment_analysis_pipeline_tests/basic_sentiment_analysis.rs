// Integration tests for sentiment analysis pipeline
// These download the BETO checkpoint from the Hugging Face hub.

use barrio_sentiment::classifier::{SentimentClassifier, SentimentLabel};
use barrio_sentiment::pipelines::sentiment_analysis_pipeline::*;

#[test]
#[ignore = "downloads finiteautomata/beto-sentiment-analysis"]
fn basic_sentiment() -> anyhow::Result<()> {
    let pipeline = SentimentAnalysisPipelineBuilder::beto().cpu().build()?;
    let res = pipeline.predict("me encanta vivir aquí")?;
    assert!(["POS", "NEG", "NEU"].contains(&res.label.as_str()));
    assert!((0.0..=1.0).contains(&res.score));
    Ok(())
}

#[test]
#[ignore = "downloads finiteautomata/beto-sentiment-analysis"]
fn pipeline_as_classifier_fallback() -> anyhow::Result<()> {
    let pipeline = SentimentAnalysisPipelineBuilder::beto().cpu().build()?;
    let classifier = SentimentClassifier::new(pipeline);

    let keyword = classifier.classify("zona peligrosa... muy peligroso")?;
    assert_eq!(keyword.label, SentimentLabel::Negative);
    assert_eq!(keyword.confidence, 1.0);

    let fallback = classifier.classify("")?;
    assert!((0.0..=1.0).contains(&fallback.confidence));
    Ok(())
}
