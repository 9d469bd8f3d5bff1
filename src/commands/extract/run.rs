use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::info;

use super::{Extraction, SectionExtractor};
use crate::cli::ExtractArgs;
use crate::commands::job::{JobPaths, new_job_id};
use crate::model::{ExtractCounts, ExtractRunManifest, SectionsFile};
use crate::util::{now_utc_string, read_file_bytes, sha256_bytes, write_json_pretty};

pub fn run(args: ExtractArgs) -> Result<JobPaths> {
    let job_id = args.job_id.clone().unwrap_or_else(new_job_id);
    extract_to_job(&args.input, &args.output_dir, &job_id)
}

pub fn extract_to_job(input: &Path, output_dir: &Path, job_id: &str) -> Result<JobPaths> {
    let started_at = now_utc_string();
    let paths = JobPaths::new(output_dir, job_id)?;

    info!(job_id = %job_id, input = %input.display(), "starting extract");

    let raw = read_file_bytes(input)?;
    let source_sha256 = sha256_bytes(&raw);
    let doc: Value = serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse document tree {}", input.display()))?;
    if !doc.is_object() {
        bail!("document tree root must be a JSON object: {}", input.display());
    }

    let extractor = SectionExtractor::new()?;
    let extraction = extractor
        .extract(&doc)
        .with_context(|| format!("failed to extract sections from {}", input.display()))?;
    let counts = summarize(&extraction);

    write_json_pretty(
        &paths.sections,
        &SectionsFile {
            sections: extraction.sections,
        },
    )?;

    let manifest = ExtractRunManifest {
        manifest_version: 1,
        job_id: job_id.to_string(),
        status: "completed".to_string(),
        started_at,
        updated_at: now_utc_string(),
        source_path: input.display().to_string(),
        source_sha256,
        sections_path: paths.sections.display().to_string(),
        counts,
    };
    write_json_pretty(&paths.extract_manifest, &manifest)?;

    info!(
        job_id = %job_id,
        sections = manifest.counts.sections,
        tables = manifest.counts.tables_kept,
        path = %paths.sections.display(),
        "extract completed"
    );

    Ok(paths)
}

fn summarize(extraction: &Extraction) -> ExtractCounts {
    ExtractCounts {
        sections: extraction.sections.len(),
        sections_with_body_text: extraction
            .sections
            .iter()
            .filter(|section| section.section_body_text.is_some())
            .count(),
        tables_kept: extraction.stats.tables_kept,
        tables_dropped_before_heading: extraction.stats.tables_dropped_before_heading,
        lines_dropped_before_heading: extraction.stats.lines_dropped_before_heading,
        nodes_skipped_non_body: extraction.stats.nodes_skipped_non_body,
    }
}
