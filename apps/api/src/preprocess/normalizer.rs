use std::path::PathBuf;
use std::sync::OnceLock;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use super::lemmatizer::Lemmatizer;
use super::stopwords::StopwordSet;
use super::ResourceError;

lazy_static! {
    // Letters, numbers and underscore; combining marks are stripped.
    static ref NON_WORD: Regex = Regex::new(r"[^\p{L}\p{N}_\s]").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Where the normalizer's linguistic resources come from.
/// `None` selects the built-in resource.
#[derive(Debug, Clone, Default)]
pub struct NormalizerConfig {
    pub stopwords_path: Option<PathBuf>,
    pub lemma_exceptions_path: Option<PathBuf>,
}

/// Lowercases, strips punctuation, collapses whitespace and trims.
/// A missing value normalizes to the empty string.
pub fn clean_text(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };
    let lowered = text.to_lowercase();
    let stripped = NON_WORD.replace_all(&lowered, "");
    WHITESPACE_RUN.replace_all(&stripped, " ").trim().to_string()
}

/// Text normalization pipeline shared by every request.
///
/// Resources are loaded on first use and cached for the process lifetime,
/// including a failed load: a broken stopword file or exception table turns the
/// corresponding step into the identity and logs a warning on every call, so
/// degraded predictions stay visible in the logs.
#[derive(Debug, Default)]
pub struct TextNormalizer {
    config: NormalizerConfig,
    stopwords: OnceLock<Result<StopwordSet, ResourceError>>,
    lemmatizer: OnceLock<Result<Lemmatizer, ResourceError>>,
}

impl TextNormalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self {
            config,
            stopwords: OnceLock::new(),
            lemmatizer: OnceLock::new(),
        }
    }

    fn stopwords(&self) -> &Result<StopwordSet, ResourceError> {
        self.stopwords.get_or_init(|| match &self.config.stopwords_path {
            Some(path) => StopwordSet::from_file(path),
            None => Ok(StopwordSet::english()),
        })
    }

    fn lemmatizer(&self) -> &Result<Lemmatizer, ResourceError> {
        self.lemmatizer
            .get_or_init(|| match &self.config.lemma_exceptions_path {
                Some(path) => Lemmatizer::with_exceptions_file(path),
                None => Ok(Lemmatizer::default()),
            })
    }

    /// Forces resource initialization and reports the outcome once at startup.
    pub fn warm_up(&self) {
        match self.stopwords() {
            Ok(set) => info!(entries = set.len(), "Stopword set loaded"),
            Err(e) => warn!(resource = "stopwords", error = %e, "Stopword set unavailable; removal disabled"),
        }
        match self.lemmatizer() {
            Ok(lem) => info!(exceptions = lem.exception_count(), "Lemmatizer loaded"),
            Err(e) => warn!(resource = "lemmatizer", error = %e, "Lemmatizer unavailable; lemmatization disabled"),
        }
    }

    pub fn remove_stopwords(&self, text: &str) -> String {
        match self.stopwords() {
            Ok(set) => set.filter(text),
            Err(e) => {
                warn!(resource = "stopwords", error = %e, "Skipping stopword removal");
                text.to_string()
            }
        }
    }

    pub fn lemmatize_text(&self, text: &str) -> String {
        match self.lemmatizer() {
            Ok(lem) => lem.lemmatize_text(text),
            Err(e) => {
                warn!(resource = "lemmatizer", error = %e, "Skipping lemmatization");
                text.to_string()
            }
        }
    }

    /// clean → remove stopwords → lemmatize.
    pub fn normalize(&self, text: Option<&str>) -> String {
        self.lemmatize_text(&self.remove_stopwords(&clean_text(text)))
    }
}
