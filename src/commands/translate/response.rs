use serde_json::{Map, Value};

use crate::model::{TranslatedSection, TranslationResponse};
use crate::util::is_truthy;

pub(super) fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    }
    if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

pub(super) fn parse_translation_reply(section_id: &str, raw: &str) -> TranslatedSection {
    match serde_json::from_str::<Value>(strip_code_fences(raw)) {
        Ok(Value::Object(fields)) => translated_from_fields(section_id, &fields),
        Ok(_) => translation_error(section_id, "reply is not a JSON object"),
        Err(_) => TranslatedSection {
            id: section_id.to_string(),
            description: Value::String(format!("Translation error for section {section_id}")),
            condition_english: None,
            requirement_english: None,
            exception: None,
        },
    }
}

pub(super) fn translate_response(
    section_id: &str,
    response: Option<&TranslationResponse>,
) -> TranslatedSection {
    let Some(response) = response else {
        return translation_error(section_id, "no response recorded");
    };

    if let Some(error) = response.error.as_deref() {
        return translation_error(section_id, error);
    }

    match response.content.as_deref() {
        Some(content) => parse_translation_reply(section_id, content),
        None => translation_error(section_id, "response has no content"),
    }
}

pub(super) fn translation_error(section_id: &str, message: &str) -> TranslatedSection {
    TranslatedSection {
        id: section_id.to_string(),
        description: Value::String(format!("Translation error: {message}")),
        condition_english: None,
        requirement_english: None,
        exception: None,
    }
}

fn translated_from_fields(section_id: &str, fields: &Map<String, Value>) -> TranslatedSection {
    let description = fields
        .get("description")
        .filter(|value| is_truthy(value))
        .cloned()
        .unwrap_or_else(|| Value::String(String::new()));

    TranslatedSection {
        id: section_id.to_string(),
        description,
        condition_english: non_null(fields.get("condition_english")),
        requirement_english: non_null(fields.get("requirement_english")),
        exception: non_null(fields.get("exception")),
    }
}

fn non_null(value: Option<&Value>) -> Option<Value> {
    value.filter(|value| !value.is_null()).cloned()
}
