use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::commands::job::JobPaths;
use crate::model::{ExtractRunManifest, SectionsFile, TranslatedFile, TranslationRequestsFile};
use crate::util::read_json;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobStatus {
    pub job_id: String,
    pub sections: usize,
    pub extract_status: Option<String>,
    pub extracted_at: Option<String>,
    pub requests: Option<usize>,
    pub translated: Option<usize>,
}

pub fn run(args: StatusArgs) -> Result<()> {
    info!(output_dir = %args.output_dir.display(), "status requested");

    if !args.output_dir.exists() {
        warn!(path = %args.output_dir.display(), "output directory missing");
        return Ok(());
    }

    let jobs = collect_job_statuses(&args.output_dir)?;
    if jobs.is_empty() {
        warn!(path = %args.output_dir.display(), "no extracted jobs found");
    }

    for job in &jobs {
        info!(
            job_id = %job.job_id,
            sections = job.sections,
            extract_status = %job.extract_status.as_deref().unwrap_or_default(),
            extracted_at = %job.extracted_at.as_deref().unwrap_or_default(),
            requests = ?job.requests,
            translated = ?job.translated,
            "job status"
        );
    }

    info!(jobs = jobs.len(), "status completed");
    Ok(())
}

pub fn collect_job_statuses(output_dir: &Path) -> Result<Vec<JobStatus>> {
    let pattern = Regex::new(r"^([A-Za-z0-9_-]+)_sections\.json$")
        .context("failed to compile sections filename regex")?;

    let mut job_ids = Vec::new();
    let entries = fs::read_dir(output_dir)
        .with_context(|| format!("failed to read {}", output_dir.display()))?;
    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", output_dir.display()))?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        if let Some(captures) = pattern.captures(file_name) {
            job_ids.push(captures[1].to_string());
        }
    }
    job_ids.sort();

    job_ids
        .iter()
        .map(|job_id| job_status(output_dir, job_id))
        .collect()
}

fn job_status(output_dir: &Path, job_id: &str) -> Result<JobStatus> {
    let paths = JobPaths::new(output_dir, job_id)?;
    let sections: SectionsFile = read_json(&paths.sections)?;

    let manifest = if paths.extract_manifest.exists() {
        Some(read_json::<ExtractRunManifest>(&paths.extract_manifest)?)
    } else {
        None
    };
    let requests = if paths.requests.exists() {
        Some(read_json::<TranslationRequestsFile>(&paths.requests)?.requests.len())
    } else {
        None
    };
    let translated = if paths.translated.exists() {
        Some(read_json::<TranslatedFile>(&paths.translated)?.translated_sections.len())
    } else {
        None
    };

    Ok(JobStatus {
        job_id: job_id.to_string(),
        sections: sections.sections.len(),
        extract_status: manifest.as_ref().map(|value| value.status.clone()),
        extracted_at: manifest.map(|value| value.updated_at),
        requests,
        translated,
    })
}
