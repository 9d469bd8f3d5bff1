use anyhow::Result;

use super::format_tables_for_prompt;
use crate::model::{Section, TranslationRequest};

pub(super) const SYSTEM_MESSAGE: &str =
    "You are a legal document translator. Return only valid JSON, no markdown or explanations.";
pub(super) const TRANSLATION_TEMPERATURE: f64 = 0.3;
pub(super) const RESPONSE_FORMAT: &str = "json_object";

#[derive(Debug, Default)]
struct TableNotes {
    tables_text: String,
    instruction: &'static str,
    important: &'static str,
    description: &'static str,
    condition: &'static str,
    requirement: &'static str,
}

impl TableNotes {
    fn for_section(section: &Section) -> Result<Self> {
        if section.tables.is_empty() {
            return Ok(Self::default());
        }

        Ok(Self {
            tables_text: format_tables_for_prompt(&section.tables)?,
            instruction: "\nIMPORTANT: This section contains tables shown above. You MUST use the table data to inform your translation. The table information is critical for understanding conditions, requirements, and should be incorporated into your description, condition_english, and requirement_english fields.",
            important: "- When tables are present, you MUST incorporate their data into description, condition_english, and requirement_english. The tables contain essential regulatory information.",
            description: " If tables are present, incorporate their key information into the summary.",
            condition: " Use table data to identify when rules apply (e.g., different conditions for different site areas, uses, etc.)",
            requirement: " Use table data to specify requirements (e.g., minimum site areas, specific regulations for different uses, etc.)",
        })
    }
}

pub(super) fn render_translation_prompt(section: &Section) -> Result<String> {
    let TableNotes {
        tables_text,
        instruction: tables_instruction,
        important: tables_important,
        description: description_note,
        condition: condition_note,
        requirement: requirement_note,
    } = TableNotes::for_section(section)?;
    let section_id = &section.section;
    let section_title = section.section_title.as_deref().unwrap_or("N/A");
    let section_body_text = section.section_body_text.as_deref().unwrap_or_default();

    Ok(format!(
        r#"You are a legal document translator. Convert this bylaw section into plain English components.

Section ID: {section_id}
Section Title: {section_title}
Section Text:
{section_body_text}
{tables_text}

{tables_instruction}

Extract and return ONLY a valid JSON object with these exact fields:
{{
  "description": "A plain English summary of the entire section, readable by a regular person (not legal jargon).{description_note}",
  "condition_english": "When does this rule apply? What triggers this section?{condition_note} If not applicable, use null.",
  "requirement_english": "What must someone actually do to comply? What are the specific requirements?{requirement_note} If not applicable, use null.",
  "exception": {{
    "condition_english": "Under what circumstances can the requirement be changed?",
    "requirement_english": "What happens if the exception applies?"
  }} OR null if no exception exists
}}

IMPORTANT:
- Return ONLY valid JSON, no markdown, no code blocks, no explanations
- Use null (not "null" string) for fields that don't apply
- If there's no exception clause, set "exception" to null
- Keep descriptions clear and concise
- Focus on actionable requirements when present
{tables_important}

JSON:"#
    ))
}

pub(super) fn build_translation_request(
    section: &Section,
    model_name: &str,
) -> Result<TranslationRequest> {
    Ok(TranslationRequest {
        id: section.section.clone(),
        model: model_name.to_string(),
        temperature: TRANSLATION_TEMPERATURE,
        system: SYSTEM_MESSAGE.to_string(),
        prompt: render_translation_prompt(section)?,
        response_format: RESPONSE_FORMAT.to_string(),
    })
}
