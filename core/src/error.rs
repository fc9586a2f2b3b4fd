use thiserror::Error;

/// Errors produced by the search core.
///
/// Per-term lookup misses during a search are not errors: they are
/// recovered by excluding the term from the query. Only a query whose
/// terms all miss surfaces as [`Error::NoMatch`].
#[derive(Error, Debug)]
pub enum Error {
    /// The normalizer was handed something that is not a text field.
    /// No partial work happens: nothing was inserted.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// None of the query's terms exist in the index.
    #[error("no indexed term matches the query {0:?}")]
    NoMatch(String),
}

impl Error {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Error::InvalidInput(reason.into())
    }

    pub fn no_match(query: impl Into<String>) -> Self {
        Error::NoMatch(query.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
