use super::record::CountryRecord;
use serde_json::Value;
use tracing::debug;

const TEXT_KEY: &str = "text";

/// Walks `path` through nested objects and returns the `text` attribute of the
/// final node. Any missing key or non-object/non-string node yields `None`.
pub(crate) fn lookup_text<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    let mut node = root;
    for key in path {
        node = node.as_object()?.get(*key)?;
    }
    node.as_object()?.get(TEXT_KEY)?.as_str()
}

/// Looks up the text at `path` and runs it through `parse`.
///
/// Absence is a normal outcome: a missing path and an unparsable value both
/// come back as `None` and are only reported through `tracing`.
pub(crate) fn extract_with<T, F>(
    record: &CountryRecord,
    path: &[&str],
    field: &'static str,
    parse: F,
) -> Option<T>
where
    F: FnOnce(&str) -> Option<T>,
{
    let Some(text) = lookup_text(record.data(), path) else {
        debug!(country = record.id(), field, "field missing from record");
        return None;
    };

    let parsed = parse(text);
    if parsed.is_none() {
        debug!(
            country = record.id(),
            field,
            text,
            "field text did not parse; treating as absent"
        );
    }
    parsed
}
