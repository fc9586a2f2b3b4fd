use std::fmt;

use serde::{Deserialize, Serialize};
use streamdex_core::{DocId, FieldValue};

/// One cataloged show. `id` is the document id the service assigned at
/// insertion time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    pub id: DocId,
    pub title: String,
    pub director: Option<String>,
    pub cast: Option<String>,
    pub country: Option<String>,
    /// "TV Show" or "Movie".
    pub kind: String,
    pub year_added: i32,
    pub rating: Option<String>,
    pub duration: String,
    pub genre: Option<String>,
    pub description: String,
}

/// Ingestion form of a show, before the catalog assigns its id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowRecord {
    pub title: String,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub cast: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub year_added: i32,
    #[serde(default)]
    pub rating: Option<String>,
    pub duration: String,
    #[serde(default)]
    pub genre: Option<String>,
    pub description: String,
}

impl Show {
    pub(crate) fn from_record(id: DocId, record: ShowRecord) -> Self {
        Self {
            id,
            title: record.title,
            director: record.director,
            cast: record.cast,
            country: record.country,
            kind: record.kind,
            year_added: record.year_added,
            rating: record.rating,
            duration: record.duration,
            genre: record.genre,
            description: record.description,
        }
    }

    /// The values fed to the index, in catalog field order. Absent
    /// optional fields are skipped rather than indexed as placeholder
    /// text; `year_added` is the one numeric field.
    pub fn index_fields(&self) -> Vec<FieldValue> {
        let mut fields = vec![FieldValue::Text(self.title.clone())];
        for value in [&self.director, &self.cast, &self.country] {
            if let Some(text) = value {
                fields.push(FieldValue::Text(text.clone()));
            }
        }
        fields.push(FieldValue::Text(self.kind.clone()));
        fields.push(FieldValue::Number(i64::from(self.year_added)));
        if let Some(rating) = &self.rating {
            fields.push(FieldValue::Text(rating.clone()));
        }
        fields.push(FieldValue::Text(self.duration.clone()));
        if let Some(genre) = &self.genre {
            fields.push(FieldValue::Text(genre.clone()));
        }
        fields.push(FieldValue::Text(self.description.clone()));
        fields
    }
}

impl fmt::Display for Show {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.kind)
    }
}
