use serde::Serialize;
use serde_json::Value;

/// One country's fact sheet as loaded from the record source.
///
/// The payload is kept as the raw nested tree (category → subcategory →
/// field → `{ "text": ... }`); extraction never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryRecord {
    id: String,
    data: Value,
}

impl CountryRecord {
    pub fn new(id: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn data(&self) -> &Value {
        &self.data
    }
}
