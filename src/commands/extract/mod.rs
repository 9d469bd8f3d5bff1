mod error;
mod heading_and_parent;
mod reference_and_page;
mod run;
mod section_builder;
mod table_summary;

pub use error::ExtractError;
pub use run::{extract_to_job, run};

use heading_and_parent::*;
use reference_and_page::*;
use section_builder::*;
use table_summary::*;
