mod candidates;
mod prompt;
mod response;
mod run;
mod table_prompt;
#[cfg(test)]
mod tests;

pub use run::{run_collect, run_prompts, write_translation_requests};

use candidates::*;
use prompt::*;
use response::*;
use table_prompt::*;
