pub mod config;
pub mod error;

pub use config::{ClassifierConfig, LexiconConfig};
pub use error::{RecordError, SentimentError};
