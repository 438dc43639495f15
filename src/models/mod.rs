pub mod bert;

pub use bert::{BertForSequenceClassification, BertModel, BertSentimentModel, BertSentimentOptions};
