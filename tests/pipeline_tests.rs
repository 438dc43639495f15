mod sentiment_analysis_pipeline_tests {
    mod basic_sentiment_analysis;
}
