use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};

/// A normalized index key: case-folded, stripped of noise and stemmed.
pub type Term = String;

lazy_static! {
    // Tokens may start with a digit so literal years inside text stay
    // searchable; apostrophes stay attached so possessive fragments can
    // be filtered below.
    static ref TOKEN_RE: Regex = Regex::new(r"(?u)[\p{L}\p{N}_']+").expect("valid regex");
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","can't","cannot","could","couldn't",
            "did","didn't","do","does","doesn't","doing","don't","down","during",
            "each","few","for","from","further",
            "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
            "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
            "let's","me","more","most","mustn't","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
            "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
            "under","until","up","very",
            "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
            "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// One catalog field as handed to the indexing pipeline.
///
/// Numeric fields never go through text normalization: they are indexed
/// verbatim via [`crate::InvertedIndex::insert_numeric`] so exact lookups
/// like a year keep working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(i64),
}

/// Turns raw text into the deduplicated term sequence used as index keys.
///
/// The same instance must serve indexing and query normalization: the
/// index is only consistent when both sides run the identical pipeline.
pub struct Normalizer {
    stemmer: Stemmer,
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    /// Normalize one field value.
    ///
    /// Fails with [`Error::InvalidInput`] when the value is not text,
    /// without inserting anything anywhere: numeric fields bypass this
    /// pipeline by design and must go through `insert_numeric`.
    pub fn normalize(&self, value: &FieldValue) -> Result<Vec<Term>> {
        match value {
            FieldValue::Text(text) => Ok(self.normalize_text(text)),
            FieldValue::Number(n) => Err(Error::invalid_input(format!(
                "expected a text field, got the number {n}"
            ))),
        }
    }

    /// The text pipeline: NFKC + lowercase, tokenize, drop stopwords,
    /// single characters and apostrophe-edged fragments, stem, then
    /// deduplicate keeping first-seen order.
    pub fn normalize_text(&self, text: &str) -> Vec<Term> {
        let folded = text.nfkc().collect::<String>().to_lowercase();
        let mut seen = HashSet::new();
        let mut terms = Vec::new();
        for mat in TOKEN_RE.find_iter(&folded) {
            let token = mat.as_str();
            if is_stopword(token) {
                continue;
            }
            // Single characters are noise, e.g. a lone hyphenated stub.
            if token.chars().count() == 1 {
                continue;
            }
            // Possessive and contraction fragments like 's or don'.
            if token.starts_with('\'') || token.ends_with('\'') {
                continue;
            }
            let stem = self.stemmer.stem(token).to_string();
            if seen.insert(stem.clone()) {
                terms.push(stem);
            }
        }
        terms
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
