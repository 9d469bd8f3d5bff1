use anyhow::Result;
use tracing::info;

use crate::cli::ProcessArgs;
use crate::commands::extract::extract_to_job;
use crate::commands::job::new_job_id;
use crate::commands::translate::write_translation_requests;

pub fn run(args: ProcessArgs) -> Result<()> {
    let job_id = args.job_id.clone().unwrap_or_else(new_job_id);

    let paths = extract_to_job(&args.input, &args.output_dir, &job_id)?;
    let request_count = write_translation_requests(&paths, &args.model_name)?;

    info!(
        job_id = %job_id,
        requests = request_count,
        sections = %paths.sections.display(),
        requests_path = %paths.requests.display(),
        "process completed"
    );

    Ok(())
}
