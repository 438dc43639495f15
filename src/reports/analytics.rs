//! Comment sentiment report: counts, first examples and a timeline.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::records::Comment;
use crate::classifier::{SentimentClassifier, SentimentLabel, TextClassifier};
use crate::core::SentimentError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    pub at: DateTime<Utc>,
    pub label: SentimentLabel,
    /// `1` positive, `-1` negative, `0` otherwise.
    pub value: i8,
}

/// Share of each label, in percent. All zero when there were no comments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentDistribution {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SentimentReport {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    /// Text of the first comment classified positive.
    pub first_positive: Option<String>,
    /// Text of the first comment classified negative.
    pub first_negative: Option<String>,
    pub timeline: Vec<TimelinePoint>,
}

impl SentimentReport {
    /// Classify every non-empty comment once, in order.
    ///
    /// A failing model aborts the whole report: a partial report would
    /// undercount and a defaulted one would overcount neutral comments.
    pub fn build<M: TextClassifier>(
        classifier: &SentimentClassifier<M>,
        comments: &[Comment],
    ) -> Result<Self, SentimentError> {
        let mut report = SentimentReport::default();

        for comment in comments.iter().filter(|c| !c.text.is_empty()) {
            let label = classifier.classify(&comment.text)?.label;
            match label {
                SentimentLabel::Positive => {
                    report.positive += 1;
                    report
                        .first_positive
                        .get_or_insert_with(|| comment.text.clone());
                }
                SentimentLabel::Negative => {
                    report.negative += 1;
                    report
                        .first_negative
                        .get_or_insert_with(|| comment.text.clone());
                }
                SentimentLabel::NeutralOrUnknown => report.neutral += 1,
            }
            report.timeline.push(TimelinePoint {
                at: comment.created_at,
                label,
                value: label.timeline_value(),
            });
        }

        tracing::debug!(
            positive = report.positive,
            negative = report.negative,
            neutral = report.neutral,
            "sentiment report built"
        );
        Ok(report)
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    pub fn distribution(&self) -> SentimentDistribution {
        let total = self.total();
        if total == 0 {
            return SentimentDistribution {
                positive: 0.0,
                negative: 0.0,
                neutral: 0.0,
            };
        }
        let pct = |count: usize| count as f64 * 100.0 / total as f64;
        SentimentDistribution {
            positive: pct(self.positive),
            negative: pct(self.negative),
            neutral: pct(self.neutral),
        }
    }
}
