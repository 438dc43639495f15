use thiserror::Error;

/// Errors returned by the comment sentiment classifier and its configuration.
#[derive(Debug, Error)]
pub enum SentimentError {
    /// The model fallback could not produce a prediction. Callers must not
    /// count this as a neutral comment.
    #[error("sentiment model unavailable: {source}")]
    ClassificationUnavailable {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A keyword was listed as both a negative and a positive indicator.
    #[error("keyword `{0}` appears in both the negative and positive lexicon")]
    LexiconOverlap(String),

    /// A lexicon entry was empty (it would match every comment).
    #[error("lexicon entries must not be empty")]
    EmptyKeyword,

    #[error("invalid classifier config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("failed to read classifier config: {0}")]
    Io(#[from] std::io::Error),
}

impl SentimentError {
    pub(crate) fn unavailable(err: anyhow::Error) -> Self {
        SentimentError::ClassificationUnavailable { source: err.into() }
    }
}

/// Errors raised while validating or storing users, neighborhoods and ratings.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    /// One of the required form fields was absent or blank.
    #[error("please fill in all required fields")]
    MissingFields,

    /// A field was present but could not be parsed.
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

    #[error("a user with email `{0}` already exists")]
    DuplicateEmail(String),

    #[error("danger level {0} is outside 1..=5")]
    DangerLevelOutOfRange(i64),
}
