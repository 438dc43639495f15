//! Keyword lexicon for the rule layer of the comment classifier.

use once_cell::sync::Lazy;

use crate::core::{LexiconConfig, SentimentError};

/// Negative indicators, scanned first and in this order.
pub const DEFAULT_NEGATIVE_KEYWORDS: &[&str] = &[
    "inseguro",
    "peligroso",
    "atraco",
    "roban",
    "malo",
    "horrible",
    "negativo",
    "conflictivo",
    "violento",
    "amenazante",
];

/// Positive indicators, scanned only when no negative indicator matched.
pub const DEFAULT_POSITIVE_KEYWORDS: &[&str] = &[
    "seguro",
    "tranquilo",
    "bueno",
    "excelente",
    "positivo",
    "maravilloso",
    "cómodo",
    "agradable",
    "pacifico",
];

static DEFAULT_LEXICON: Lazy<KeywordLexicon> = Lazy::new(|| KeywordLexicon {
    negative: DEFAULT_NEGATIVE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
    positive: DEFAULT_POSITIVE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
});

/// Which list a keyword hit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Negative,
    Positive,
}

/// Two disjoint, ordered lists of lowercase substrings.
///
/// Entries are lowercased on construction so matching only needs to
/// lowercase the comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordLexicon {
    negative: Vec<String>,
    positive: Vec<String>,
}

impl KeywordLexicon {
    /// Build a lexicon from explicit keyword lists.
    ///
    /// Fails if any entry is blank or if a keyword (after lowercasing) is
    /// present in both lists.
    pub fn new<N, P, S>(negative: N, positive: P) -> Result<Self, SentimentError>
    where
        N: IntoIterator<Item = S>,
        P: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let negative = normalize_keywords(negative)?;
        let positive = normalize_keywords(positive)?;

        if let Some(shared) = negative.iter().find(|k| positive.contains(k)) {
            return Err(SentimentError::LexiconOverlap(shared.clone()));
        }

        Ok(Self { negative, positive })
    }

    pub fn from_config(config: &LexiconConfig) -> Result<Self, SentimentError> {
        Self::new(&config.negative, &config.positive)
    }

    pub fn negative(&self) -> &[String] {
        &self.negative
    }

    pub fn positive(&self) -> &[String] {
        &self.positive
    }

    /// Scan an already-lowercased text: negative list first, then positive.
    /// Returns the first keyword found and the list it belongs to.
    pub fn find_match(&self, normalized: &str) -> Option<(Polarity, &str)> {
        if let Some(keyword) = self.negative.iter().find(|k| normalized.contains(k.as_str())) {
            return Some((Polarity::Negative, keyword.as_str()));
        }
        self.positive
            .iter()
            .find(|k| normalized.contains(k.as_str()))
            .map(|keyword| (Polarity::Positive, keyword.as_str()))
    }
}

impl Default for KeywordLexicon {
    fn default() -> Self {
        DEFAULT_LEXICON.clone()
    }
}

fn normalize_keywords<I, S>(keywords: I) -> Result<Vec<String>, SentimentError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keywords
        .into_iter()
        .map(|k| {
            let k = k.as_ref().trim();
            if k.is_empty() {
                Err(SentimentError::EmptyKeyword)
            } else {
                Ok(k.to_lowercase())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lexicon_is_disjoint() {
        let lexicon = KeywordLexicon::default();
        assert_eq!(lexicon.negative().len(), DEFAULT_NEGATIVE_KEYWORDS.len());
        assert_eq!(lexicon.positive().len(), DEFAULT_POSITIVE_KEYWORDS.len());
        assert!(KeywordLexicon::new(lexicon.negative(), lexicon.positive()).is_ok());
    }

    #[test]
    fn test_overlap_is_rejected_case_insensitively() {
        let err = KeywordLexicon::new(["Oscuro"], ["oscuro"]).unwrap_err();
        assert!(matches!(err, SentimentError::LexiconOverlap(k) if k == "oscuro"));
    }

    #[test]
    fn test_blank_keyword_is_rejected() {
        let err = KeywordLexicon::new(["  "], ["seguro"]).unwrap_err();
        assert!(matches!(err, SentimentError::EmptyKeyword));
    }

    #[test]
    fn test_negative_scanned_before_positive() {
        let lexicon = KeywordLexicon::default();
        let hit = lexicon.find_match("tranquilo pero peligroso");
        assert_eq!(hit, Some((Polarity::Negative, "peligroso")));
    }

    #[test]
    fn test_first_keyword_in_list_order_wins() {
        // "malo" comes after "atraco" in the negative list
        let lexicon = KeywordLexicon::default();
        let hit = lexicon.find_match("malo, hubo un atraco");
        assert_eq!(hit, Some((Polarity::Negative, "atraco")));
    }

    #[test]
    fn test_inseguro_is_not_read_as_seguro() {
        let lexicon = KeywordLexicon::default();
        assert_eq!(
            lexicon.find_match("me siento inseguro"),
            Some((Polarity::Negative, "inseguro"))
        );
    }

    #[test]
    fn test_keywords_are_lowercased() {
        let lexicon = KeywordLexicon::new(["BALACERA"], ["Iluminado"]).unwrap();
        assert_eq!(lexicon.negative(), ["balacera".to_string()]);
        assert_eq!(
            lexicon.find_match("calle iluminado"),
            Some((Polarity::Positive, "iluminado"))
        );
    }

    #[test]
    fn test_no_match() {
        assert_eq!(KeywordLexicon::default().find_match("el clima estuvo regular"), None);
    }
}
