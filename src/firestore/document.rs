use serde::Deserialize;
use serde_json::{Map, Value};

use super::value::decode_fields;
use crate::error::{Error, Result};

/// A document as returned by the REST API, with its fields decoded to plain JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Full resource name: `projects/{p}/databases/(default)/documents/{path}`.
    pub name: String,
    pub id: String,
    pub fields: Map<String, Value>,
    pub create_time: Option<String>,
    pub update_time: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
    create_time: Option<String>,
    update_time: Option<String>,
}

impl TryFrom<RawDocument> for Document {
    type Error = Error;

    fn try_from(raw: RawDocument) -> Result<Self> {
        let id = raw
            .name
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        Ok(Document {
            fields: decode_fields(&raw.fields)?,
            name: raw.name,
            id,
            create_time: raw.create_time,
            update_time: raw.update_time,
        })
    }
}

fn segments(path: &str) -> Result<Vec<&str>> {
    let trimmed = path.trim_matches('/');
    let parts: Vec<&str> = trimmed.split('/').collect();
    if trimmed.is_empty() || parts.iter().any(|s| s.is_empty()) {
        return Err(Error::InvalidPath(path.to_string()));
    }
    Ok(parts)
}

/// Normalise a document path (`users/ada`, `polls/p1/votes/v9`).
pub fn document_path(path: &str) -> Result<String> {
    let parts = segments(path)?;
    if parts.len() % 2 != 0 {
        return Err(Error::InvalidPath(format!(
            "{} (a document path needs an even number of segments)",
            path
        )));
    }
    Ok(parts.join("/"))
}

/// Normalise a collection path (`users`, `polls/p1/votes`).
pub fn collection_path(path: &str) -> Result<String> {
    let parts = segments(path)?;
    if parts.len() % 2 != 1 {
        return Err(Error::InvalidPath(format!(
            "{} (a collection path needs an odd number of segments)",
            path
        )));
    }
    Ok(parts.join("/"))
}
