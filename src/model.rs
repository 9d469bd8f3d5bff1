use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCellRecord {
    pub row: Option<i64>,
    pub col: Option<i64>,
    pub text: String,
    pub column_header: bool,
    pub row_header: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSummary {
    pub page_no: Option<i64>,
    pub cells: Vec<TableCellRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub parent_section: String,
    pub section: String,
    pub section_title: Option<String>,
    pub section_body_text: Option<String>,
    pub section_start_page: Option<i64>,
    pub section_end_page: Option<i64>,
    #[serde(default)]
    pub tables: Vec<TableSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionsFile {
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractCounts {
    pub sections: usize,
    pub sections_with_body_text: usize,
    pub tables_kept: usize,
    pub tables_dropped_before_heading: usize,
    pub lines_dropped_before_heading: usize,
    pub nodes_skipped_non_body: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractRunManifest {
    pub manifest_version: u32,
    pub job_id: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub source_path: String,
    pub source_sha256: String,
    pub sections_path: String,
    pub counts: ExtractCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub id: String,
    pub model: String,
    pub temperature: f64,
    pub system: String,
    pub prompt: String,
    pub response_format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequestsFile {
    pub job_id: String,
    pub generated_at: String,
    pub requests: Vec<TranslationRequest>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub id: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationResponsesFile {
    pub responses: Vec<TranslationResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslatedSection {
    pub id: String,
    pub description: Value,
    pub condition_english: Option<Value>,
    pub requirement_english: Option<Value>,
    pub exception: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatedFile {
    pub translated_sections: Vec<TranslatedSection>,
}
