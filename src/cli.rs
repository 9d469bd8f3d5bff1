use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "bylaw-sections",
    version,
    about = "Reduce docling document exports to numbered bylaw sections"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Extract(ExtractArgs),
    Prompts(PromptsArgs),
    Collect(CollectArgs),
    Process(ProcessArgs),
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long, default_value = "outputs")]
    pub output_dir: PathBuf,

    #[arg(long)]
    pub job_id: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct PromptsArgs {
    #[arg(long, default_value = "outputs")]
    pub output_dir: PathBuf,

    #[arg(long)]
    pub job_id: String,

    #[arg(long, default_value = "gpt-4o-mini")]
    pub model_name: String,
}

#[derive(Args, Debug, Clone)]
pub struct CollectArgs {
    #[arg(long, default_value = "outputs")]
    pub output_dir: PathBuf,

    #[arg(long)]
    pub job_id: String,

    #[arg(long)]
    pub responses_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ProcessArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long, default_value = "outputs")]
    pub output_dir: PathBuf,

    #[arg(long)]
    pub job_id: Option<String>,

    #[arg(long, default_value = "gpt-4o-mini")]
    pub model_name: String,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = "outputs")]
    pub output_dir: PathBuf,
}
