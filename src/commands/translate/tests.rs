use serde_json::json;

use super::*;
use crate::cli::{CollectArgs, PromptsArgs};
use crate::commands::job::JobPaths;
use crate::model::{
    Section, SectionsFile, TableCellRecord, TableSummary, TranslatedFile, TranslationRequestsFile,
    TranslationResponse, TranslationResponsesFile,
};
use crate::util::{read_json, write_json_pretty};

fn section(id: &str, body: Option<&str>, tables: Vec<TableSummary>) -> Section {
    Section {
        parent_section: id
            .rsplit_once('.')
            .map(|(parent, _)| parent.to_string())
            .unwrap_or_default(),
        section: id.to_string(),
        section_title: Some(format!("Title {id}")),
        section_body_text: body.map(ToOwned::to_owned),
        section_start_page: Some(1),
        section_end_page: Some(1),
        tables,
    }
}

fn cell(row: i64, col: i64, text: &str) -> TableCellRecord {
    TableCellRecord {
        row: Some(row),
        col: Some(col),
        text: text.to_string(),
        column_header: row == 0,
        row_header: false,
    }
}

fn setback_table() -> TableSummary {
    TableSummary {
        page_no: Some(12),
        cells: vec![
            cell(0, 0, "Zone"),
            cell(0, 1, "Front"),
            cell(0, 2, "Rear"),
            cell(1, 0, "R1"),
            cell(1, 2, "7.5 m"),
            cell(2, 0, "R2"),
            cell(2, 1, "6 m"),
        ],
    }
}

#[test]
fn candidates_keep_text_sections_then_table_sections_without_duplicates() {
    let sections = vec![
        section("1", None, vec![setback_table()]),
        section("2", Some("Body"), Vec::new()),
        section("3", Some("   "), Vec::new()),
        section("4", Some("Body"), vec![setback_table()]),
        section("5", None, Vec::new()),
    ];

    let ids = select_translation_candidates(&sections)
        .into_iter()
        .map(|section| section.section.as_str())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["2", "4", "1"]);
}

#[test]
fn candidates_with_repeated_ids_keep_first_position_and_last_record() {
    let sections = vec![
        section("7", Some("first"), Vec::new()),
        section("8", Some("other"), Vec::new()),
        section("7", Some("second"), Vec::new()),
    ];

    let selected = select_translation_candidates(&sections);
    assert_eq!(selected.len(), 2);
    assert_eq!(selected[0].section, "7");
    assert_eq!(selected[0].section_body_text.as_deref(), Some("second"));
    assert_eq!(selected[1].section, "8");
}

#[test]
fn table_prompt_is_empty_without_tables() {
    assert_eq!(format_tables_for_prompt(&[]).expect("formats"), "");
}

#[test]
fn table_prompt_renders_sparse_grid_with_header_separator() {
    let formatted = format_tables_for_prompt(&[setback_table()]).expect("formats");
    assert_eq!(
        formatted,
        "\n\nTables in this section:\n\
         \nTable 1 (Page 12):\n\
         | Zone | Front | Rear |\n\
         | --- | --- | --- |\n\
         | R1 |  | 7.5 m |\n\
         | R2 | 6 m |  |\n"
    );
}

#[test]
fn table_prompt_sorts_rows_and_skips_empty_tables() {
    let unordered = TableSummary {
        page_no: None,
        cells: vec![cell(3, 0, "late"), cell(1, 0, "early"), cell(1, 0, "override")],
    };
    let empty = TableSummary {
        page_no: Some(4),
        cells: Vec::new(),
    };

    let formatted = format_tables_for_prompt(&[empty, unordered]).expect("formats");
    assert_eq!(
        formatted,
        "\n\nTables in this section:\n\
         \nTable 2 (Page None):\n\
         | override |\n\
         | --- |\n\
         | late |\n"
    );
}

#[test]
fn prompt_includes_section_fields_and_table_instructions() {
    let with_table = section("4.2", Some("Fences shall not exceed 2 m."), vec![setback_table()]);
    let prompt = render_translation_prompt(&with_table).expect("prompt renders");

    assert!(prompt.contains("Section ID: 4.2\n"));
    assert!(prompt.contains("Section Title: Title 4.2\n"));
    assert!(prompt.contains("Section Text:\nFences shall not exceed 2 m.\n"));
    assert!(prompt.contains("| Zone | Front | Rear |"));
    assert!(prompt.contains("You MUST use the table data"));
    assert!(prompt.contains("\"exception\": {\n"));
    assert!(prompt.ends_with("JSON:"));
}

#[test]
fn prompt_without_tables_or_title_uses_placeholders() {
    let mut plain = section("9", Some("Enforcement text."), Vec::new());
    plain.section_title = None;
    let prompt = render_translation_prompt(&plain).expect("prompt renders");

    assert!(prompt.contains("Section Title: N/A\n"));
    assert!(!prompt.contains("Tables in this section"));
    assert!(!prompt.contains("You MUST use the table data"));
    assert!(prompt.contains("(not legal jargon).\",\n"));
}

#[test]
fn translation_request_carries_model_settings() {
    let request = build_translation_request(&section("2", Some("Body"), Vec::new()), "gpt-4o-mini")
        .expect("request builds");
    assert_eq!(request.id, "2");
    assert_eq!(request.model, "gpt-4o-mini");
    assert_eq!(request.temperature, TRANSLATION_TEMPERATURE);
    assert_eq!(request.system, SYSTEM_MESSAGE);
    assert_eq!(request.response_format, "json_object");
}

#[test]
fn strip_code_fences_handles_markdown_wrapped_json() {
    assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
    assert_eq!(strip_code_fences("```\n{\"a\": 1}```"), "{\"a\": 1}");
    assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
}

#[test]
fn reply_parsing_reads_fields_and_nulls() {
    let reply = r#"```json
{
  "description": "Sets fence heights.",
  "condition_english": "Applies to residential lots.",
  "requirement_english": null,
  "exception": { "condition_english": "Corner lots", "requirement_english": "1 m limit" }
}
```"#;

    let translated = parse_translation_reply("4.2", reply);
    assert_eq!(translated.id, "4.2");
    assert_eq!(translated.description, "Sets fence heights.");
    assert_eq!(
        translated.condition_english,
        Some(json!("Applies to residential lots."))
    );
    assert_eq!(translated.requirement_english, None);
    assert_eq!(
        translated.exception,
        Some(json!({ "condition_english": "Corner lots", "requirement_english": "1 m limit" }))
    );
}

#[test]
fn reply_parsing_falls_back_on_invalid_json() {
    let translated = parse_translation_reply("3", "Sure! Here is the translation:");
    assert_eq!(translated.description, "Translation error for section 3");
    assert_eq!(translated.condition_english, None);
    assert_eq!(translated.exception, None);

    let not_object = parse_translation_reply("3", "[1, 2]");
    assert!(
        not_object
            .description
            .as_str()
            .is_some_and(|text| text.starts_with("Translation error: "))
    );
}

#[test]
fn missing_description_defaults_to_empty() {
    let translated = parse_translation_reply("5", r#"{"description": null}"#);
    assert_eq!(translated.description, "");

    let unset = parse_translation_reply("5", r#"{"description": false}"#);
    assert_eq!(unset.description, "");
}

#[test]
fn structured_description_is_kept_as_json() {
    let translated = parse_translation_reply(
        "6",
        r#"{"description": ["Limits fence height.", "Applies citywide."]}"#,
    );
    assert_eq!(
        translated.description,
        json!(["Limits fence height.", "Applies citywide."])
    );
}

#[test]
fn recorded_errors_and_missing_responses_become_error_records() {
    let failed = TranslationResponse {
        id: "1".to_string(),
        content: None,
        error: Some("rate limited".to_string()),
    };
    assert_eq!(
        translate_response("1", Some(&failed)).description,
        "Translation error: rate limited"
    );
    assert_eq!(
        translate_response("2", None).description,
        "Translation error: no response recorded"
    );
}

#[test]
fn prompts_then_collect_round_trip_through_job_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    let paths = JobPaths::new(dir.path(), "job-flow").expect("valid job id");
    write_json_pretty(
        &paths.sections,
        &SectionsFile {
            sections: vec![
                section("1", None, Vec::new()),
                section("2", Some("Lots shall be 500 m2."), Vec::new()),
                section("3", None, vec![setback_table()]),
            ],
        },
    )
    .expect("write sections");

    run_prompts(PromptsArgs {
        output_dir: dir.path().to_path_buf(),
        job_id: "job-flow".to_string(),
        model_name: "gpt-4o-mini".to_string(),
    })
    .expect("prompts succeed");

    let requests: TranslationRequestsFile = read_json(&paths.requests).expect("requests parse");
    let ids = requests
        .requests
        .iter()
        .map(|request| request.id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["2", "3"]);

    write_json_pretty(
        &paths.responses,
        &TranslationResponsesFile {
            responses: vec![TranslationResponse {
                id: "2".to_string(),
                content: Some(r#"{"description": "Minimum lot size."}"#.to_string()),
                error: None,
            }],
        },
    )
    .expect("write responses");

    run_collect(CollectArgs {
        output_dir: dir.path().to_path_buf(),
        job_id: "job-flow".to_string(),
        responses_path: None,
    })
    .expect("collect succeeds");

    let translated: TranslatedFile = read_json(&paths.translated).expect("translated parses");
    assert_eq!(translated.translated_sections.len(), 2);
    assert_eq!(translated.translated_sections[0].description, "Minimum lot size.");
    assert_eq!(
        translated.translated_sections[1].description,
        "Translation error: no response recorded"
    );
}

#[test]
fn prompts_require_extracted_sections() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = run_prompts(PromptsArgs {
        output_dir: dir.path().to_path_buf(),
        job_id: "job-missing".to_string(),
        model_name: "gpt-4o-mini".to_string(),
    });
    assert!(result.is_err());
}
