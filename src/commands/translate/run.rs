use std::collections::HashMap;

use anyhow::{Result, bail};
use tracing::{info, warn};

use super::{build_translation_request, select_translation_candidates, translate_response};
use crate::cli::{CollectArgs, PromptsArgs};
use crate::commands::job::JobPaths;
use crate::model::{
    SectionsFile, TranslatedFile, TranslationRequest, TranslationRequestsFile,
    TranslationResponse, TranslationResponsesFile,
};
use crate::util::{now_utc_string, read_json, write_json_pretty};

pub fn run_prompts(args: PromptsArgs) -> Result<()> {
    let paths = JobPaths::new(&args.output_dir, &args.job_id)?;
    write_translation_requests(&paths, &args.model_name)?;
    Ok(())
}

pub fn write_translation_requests(paths: &JobPaths, model_name: &str) -> Result<usize> {
    if !paths.sections.exists() {
        bail!(
            "sections file not found for job {}: {} (run extract first)",
            paths.job_id,
            paths.sections.display()
        );
    }

    let sections_file: SectionsFile = read_json(&paths.sections)?;
    let candidates = select_translation_candidates(&sections_file.sections);

    let requests = candidates
        .into_iter()
        .map(|section| build_translation_request(section, model_name))
        .collect::<Result<Vec<TranslationRequest>>>()?;

    let request_count = requests.len();
    write_json_pretty(
        &paths.requests,
        &TranslationRequestsFile {
            job_id: paths.job_id.clone(),
            generated_at: now_utc_string(),
            requests,
        },
    )?;

    info!(
        job_id = %paths.job_id,
        sections = sections_file.sections.len(),
        requests = request_count,
        model = %model_name,
        path = %paths.requests.display(),
        "wrote translation requests"
    );

    Ok(request_count)
}

pub fn run_collect(args: CollectArgs) -> Result<()> {
    let paths = JobPaths::new(&args.output_dir, &args.job_id)?;
    if !paths.requests.exists() {
        bail!(
            "translation requests not found for job {}: {} (run prompts first)",
            paths.job_id,
            paths.requests.display()
        );
    }

    let requests_file: TranslationRequestsFile = read_json(&paths.requests)?;
    let responses_path = args.responses_path.unwrap_or_else(|| paths.responses.clone());
    let responses = if responses_path.exists() {
        read_json::<TranslationResponsesFile>(&responses_path)?.responses
    } else {
        warn!(path = %responses_path.display(), "translation responses missing");
        Vec::new()
    };

    let by_id = responses
        .iter()
        .map(|response| (response.id.as_str(), response))
        .collect::<HashMap<&str, &TranslationResponse>>();

    let translated_sections = requests_file
        .requests
        .iter()
        .map(|request| translate_response(&request.id, by_id.get(request.id.as_str()).copied()))
        .collect::<Vec<_>>();

    let failed = translated_sections
        .iter()
        .filter(|section| {
            section
                .description
                .as_str()
                .is_some_and(|text| text.starts_with("Translation error"))
        })
        .count();

    write_json_pretty(
        &paths.translated,
        &TranslatedFile {
            translated_sections,
        },
    )?;

    info!(
        job_id = %paths.job_id,
        translated = requests_file.requests.len(),
        failed,
        path = %paths.translated.display(),
        "collected translations"
    );

    Ok(())
}
