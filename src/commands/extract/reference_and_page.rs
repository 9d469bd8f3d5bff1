use serde_json::Value;

use super::ExtractError;

const REFERENCE_PREFIX: &str = "#/";

pub(super) fn resolve_ref<'a>(doc: &'a Value, reference: &str) -> Result<&'a Value, ExtractError> {
    let Some(path) = reference.strip_prefix(REFERENCE_PREFIX) else {
        return Err(ExtractError::MalformedReference {
            reference: reference.to_string(),
        });
    };

    let mut current = doc;
    for segment in path.split('/') {
        current = match current {
            Value::Array(items) => {
                let index = segment.parse::<i64>().map_err(|_| {
                    ExtractError::lookup(reference, segment, "expected a list index")
                })?;
                list_item(items, index).ok_or_else(|| {
                    ExtractError::lookup(
                        reference,
                        segment,
                        format!("index out of range for list of {}", items.len()),
                    )
                })?
            }
            Value::Object(fields) => fields
                .get(segment)
                .ok_or_else(|| ExtractError::lookup(reference, segment, "missing field"))?,
            _ => {
                return Err(ExtractError::lookup(
                    reference,
                    segment,
                    "cannot descend into a scalar value",
                ));
            }
        };
    }

    Ok(current)
}

// Negative indices count from the end of the list.
fn list_item(items: &[Value], index: i64) -> Option<&Value> {
    let position = if index < 0 {
        i64::try_from(items.len()).ok()?.checked_add(index)?
    } else {
        index
    };
    items.get(usize::try_from(position).ok()?)
}

// A `children` entry is either `{"$ref": "..."}` or a bare reference string.
pub(super) fn child_reference(child: &Value) -> Option<&str> {
    let reference = match child {
        Value::Object(fields) => fields.get("$ref").and_then(Value::as_str),
        Value::String(value) => Some(value.as_str()),
        _ => None,
    };

    reference.filter(|value| !value.is_empty())
}

pub(super) fn get_page_no(node: &Value) -> Option<i64> {
    node.get("prov")
        .and_then(Value::as_array)
        .and_then(|prov| prov.first())
        .and_then(|first| first.get("page_no"))
        .and_then(Value::as_i64)
}
