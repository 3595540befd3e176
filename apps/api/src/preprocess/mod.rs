// Text normalization applied to every free-text request field before inference.
// Order is fixed: clean → stopwords → lemmatize.

pub mod lemmatizer;
pub mod normalizer;
pub mod stopwords;

pub use normalizer::{NormalizerConfig, TextNormalizer};

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load one of the linguistic resources backing the normalizer.
/// Never surfaced to clients: the affected step degrades to the identity.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} contains no entries")]
    Empty { path: PathBuf },

    #[error("{path}:{line}: expected '<inflected> <base>'")]
    Malformed { path: PathBuf, line: usize },
}
