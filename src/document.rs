use serde::{Deserialize, Deserializer, Serialize};

/// Document represents a single patent record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(alias = "id", default, deserialize_with = "null_as_empty")]
    pub app_no: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(rename = "abstract", default, deserialize_with = "null_as_empty")]
    pub abstract_text: String,
    #[serde(rename = "text", alias = "full_text", default, deserialize_with = "null_as_empty")]
    pub full_text: String,
}

impl Document {
    pub fn new(app_no: String, title: String, abstract_text: String) -> Self {
        Self {
            app_no,
            title,
            abstract_text,
            full_text: String::new(),
        }
    }

    pub fn with_full_text(mut self, full_text: String) -> Self {
        self.full_text = full_text;
        self
    }
}

/// Treat an explicit `null` the same as a missing field.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A document paired with its similarity for one ranking call
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredDocument<'a> {
    #[serde(flatten)]
    pub document: &'a Document,
    pub similarity: f64,
}

impl<'a> ScoredDocument<'a> {
    pub fn new(document: &'a Document, similarity: f64) -> Self {
        Self {
            document,
            similarity,
        }
    }
}
