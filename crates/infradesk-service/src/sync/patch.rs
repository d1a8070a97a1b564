//! Minimal patch between an original record and an edit draft.

use serde_json::{Map, Value};

use infradesk_core::result::AppResult;
use infradesk_entity::Resource;

/// Body of a `PATCH`: only the fields that changed.
pub type Patch = Map<String, Value>;

/// The fields of `draft` that are set, non-null, and differ from
/// `original`, compared as JSON values.
pub fn compute_patch<R: Resource>(original: &R, draft: &R::Draft) -> AppResult<Patch> {
    let original = serde_json::to_value(original)?;
    let draft = serde_json::to_value(draft)?;
    Ok(diff(&original, &draft))
}

/// [`compute_patch`] over raw JSON. A non-object `original` (e.g. `null`)
/// makes every set draft field part of the patch.
pub fn diff(original: &Value, draft: &Value) -> Patch {
    let Some(fields) = draft.as_object() else {
        return Patch::new();
    };

    fields
        .iter()
        .filter(|(_, value)| !value.is_null())
        .filter(|(key, value)| original.get(key.as_str()) != Some(*value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
