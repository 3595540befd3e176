//! Noun lemmatizer — reduces plural/inflected nouns to their base form.
//!
//! Mirrors WordNet's `morphy` for the noun part of speech without shipping the
//! WordNet database:
//! 1. Irregular forms are looked up in an exception table (`children → child`),
//!    including `-ie` nouns (`movies → movie`) and `-us` nouns (`buses → bus`)
//!    that the suffix rules would otherwise mangle.
//! 2. Words that are already base forms despite a trailing `s` are left alone
//!    (`analysis`, `status`, `class`, `physics`, short words).
//! 3. Detachment rules strip the plural suffix:
//!    `ies → y`, `sses → ss`, `xes → x`, `zes → z`, `ches → ch`, `shes → sh`, `s → ""`.
//!
//! Tokens that are not purely alphabetic are passed through untouched.

use std::collections::HashMap;
use std::path::Path;

use super::ResourceError;

/// Irregular plural → base form, drawn from WordNet's `noun.exc`.
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("alumni", "alumnus"),
    ("analyses", "analysis"),
    ("appendices", "appendix"),
    ("businessmen", "businessman"),
    ("chairmen", "chairman"),
    ("children", "child"),
    ("crises", "crisis"),
    ("criteria", "criterion"),
    ("curricula", "curriculum"),
    ("diagnoses", "diagnosis"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("halves", "half"),
    ("hypotheses", "hypothesis"),
    ("indices", "index"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("matrices", "matrix"),
    ("men", "man"),
    ("mice", "mouse"),
    ("oxen", "ox"),
    ("people", "person"),
    ("phenomena", "phenomenon"),
    ("salesmen", "salesman"),
    ("selves", "self"),
    ("shelves", "shelf"),
    ("syllabi", "syllabus"),
    ("teeth", "tooth"),
    ("theses", "thesis"),
    ("thieves", "thief"),
    ("wives", "wife"),
    ("wolves", "wolf"),
    ("women", "woman"),
];

/// Nouns ending in `-ie`; their plurals would otherwise fall to `ies → y`.
const IE_NOUNS: &[&str] = &[
    "auntie", "brownie", "calorie", "cookie", "freebie", "genie", "goalie", "hippie",
    "hoodie", "lie", "movie", "necktie", "newbie", "pie", "pixie", "prairie", "rookie",
    "selfie", "smoothie", "sortie", "tie", "veggie", "zombie",
];

/// Nouns ending in `-us` that pluralize with `-es`.
const US_NOUNS: &[&str] = &[
    "apparatus", "bonus", "bus", "campus", "census", "chorus", "circus", "consensus",
    "focus", "genius", "prospectus", "status", "syllabus", "virus",
];

/// Words ending in `s` that are their own lemma.
const INVARIANT_NOUNS: &[&str] = &[
    "always", "atlas", "besides", "bias", "canvas", "chaos", "does", "has", "his", "hers",
    "its", "lens", "means", "news", "ours", "perhaps", "series", "species", "theirs", "this",
    "thus", "was", "whereas", "yes", "yours",
];

/// Endings that mark a singular noun even though they finish with `s`.
const SINGULAR_ENDINGS: &[&str] = &["ss", "us", "is", "ics"];

const DETACHMENT_RULES: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
    ("zes", "z"),
];

const MIN_LEMMA_LEN: usize = 3;

#[derive(Debug, Clone)]
pub struct Lemmatizer {
    exceptions: HashMap<String, String>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        let mut exceptions: HashMap<String, String> = IRREGULAR_NOUNS
            .iter()
            .map(|(inflected, base)| (inflected.to_string(), base.to_string()))
            .collect();
        for noun in IE_NOUNS {
            exceptions.insert(format!("{noun}s"), noun.to_string());
        }
        for noun in US_NOUNS {
            exceptions.insert(format!("{noun}es"), noun.to_string());
        }
        for word in INVARIANT_NOUNS {
            exceptions.insert(word.to_string(), word.to_string());
        }
        Self { exceptions }
    }
}

impl Lemmatizer {
    /// Built-in table extended with a WordNet `.exc` file: `<inflected> <base> [...]`
    /// per line. Entries in the file override the built-ins.
    pub fn with_exceptions_file(path: &Path) -> Result<Self, ResourceError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ResourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut lemmatizer = Self::default();
        for (idx, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some(inflected), Some(base)) => {
                    lemmatizer
                        .exceptions
                        .insert(inflected.to_lowercase(), base.to_lowercase());
                }
                _ => {
                    return Err(ResourceError::Malformed {
                        path: path.to_path_buf(),
                        line: idx + 1,
                    })
                }
            }
        }
        Ok(lemmatizer)
    }

    pub fn exception_count(&self) -> usize {
        self.exceptions.len()
    }

    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(base) = self.exceptions.get(word) {
            return base.clone();
        }
        if !word.chars().all(char::is_alphabetic) || word.chars().count() <= MIN_LEMMA_LEN {
            return word.to_string();
        }
        if !word.ends_with('s') || SINGULAR_ENDINGS.iter().any(|end| word.ends_with(end)) {
            return word.to_string();
        }

        if let Some(stem) = word.strip_suffix("ies") {
            if stem.chars().count() >= 2 {
                return format!("{stem}y");
            }
        }
        for (suffix, replacement) in DETACHMENT_RULES {
            if let Some(stem) = word.strip_suffix(suffix) {
                return format!("{stem}{replacement}");
            }
        }

        let stem = &word[..word.len() - 1];
        if stem.chars().count() >= MIN_LEMMA_LEN {
            stem.to_string()
        } else {
            word.to_string()
        }
    }

    /// Lemmatizes each whitespace-separated token and rejoins with single spaces.
    pub fn lemmatize_text(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|word| self.lemmatize(word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
