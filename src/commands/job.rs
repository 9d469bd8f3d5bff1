use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use chrono::Utc;

use crate::util::utc_compact_string;

pub const SECTIONS_SUFFIX: &str = "_sections.json";
pub const EXTRACT_MANIFEST_SUFFIX: &str = "_extract_manifest.json";
pub const REQUESTS_SUFFIX: &str = "_translation_requests.json";
pub const RESPONSES_SUFFIX: &str = "_translation_responses.json";
pub const TRANSLATED_SUFFIX: &str = "_translated.json";

#[derive(Debug, Clone)]
pub struct JobPaths {
    pub job_id: String,
    pub sections: PathBuf,
    pub extract_manifest: PathBuf,
    pub requests: PathBuf,
    pub responses: PathBuf,
    pub translated: PathBuf,
}

impl JobPaths {
    pub fn new(output_dir: &Path, job_id: &str) -> Result<Self> {
        validate_job_id(job_id)?;

        let path = |suffix: &str| output_dir.join(format!("{job_id}{suffix}"));
        Ok(Self {
            job_id: job_id.to_string(),
            sections: path(SECTIONS_SUFFIX),
            extract_manifest: path(EXTRACT_MANIFEST_SUFFIX),
            requests: path(REQUESTS_SUFFIX),
            responses: path(RESPONSES_SUFFIX),
            translated: path(TRANSLATED_SUFFIX),
        })
    }
}

pub fn new_job_id() -> String {
    format!("job-{}", utc_compact_string(Utc::now()))
}

fn validate_job_id(job_id: &str) -> Result<()> {
    if job_id.is_empty() {
        bail!("job id must not be empty");
    }
    if !job_id
        .chars()
        .all(|character| character.is_ascii_alphanumeric() || matches!(character, '-' | '_'))
    {
        bail!("job id may only contain ASCII letters, digits, '-' and '_': {job_id}");
    }
    Ok(())
}
