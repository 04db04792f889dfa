//! Implementation of `variant-processing` subcommand.

use std::path::{Path, PathBuf};

pub mod analysis;
pub mod catalog;
pub mod filename;
pub mod output;
pub mod payload;
pub mod redact;
pub mod staging;

use self::{
    analysis::SourceAnalysis,
    catalog::VariantMetadataCatalog,
    filename::DotDelimitedDecoder,
    payload::{FileAccess, PayloadAssembler, WorkflowConfig},
    redact::SampleRedactor,
};
use crate::err::Error;

/// Command line arguments for `variant-processing` subcommand.
#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about = "generate payload for variant processing outputs",
    long_about = None
)]
pub struct Args {
    /// Path to JSON file with the upstream variant calling analysis.
    #[clap(long)]
    pub path_analysis: PathBuf,
    /// Path(s) to the files to upload.
    #[clap(long, required = true, num_args = 1..)]
    pub path_files: Vec<PathBuf>,
    /// Workflow full name key.
    #[clap(long)]
    pub wf_name: String,
    /// Workflow short name.
    #[clap(long)]
    pub wf_short_name: String,
    /// Workflow version.
    #[clap(long)]
    pub wf_version: String,
    /// Workflow run ID.
    #[clap(long)]
    pub wf_run: String,
    /// Workflow session ID.
    #[clap(long)]
    pub wf_session: String,
    /// Set files to be open access.
    #[clap(long)]
    pub open: bool,
    /// Directory to create the renamed file links in.
    #[clap(long, default_value = staging::DEFAULT_STAGING_DIR)]
    pub path_staging: PathBuf,
    /// Directory to write the payload JSON file to.
    #[clap(long, default_value = ".")]
    pub path_output_dir: PathBuf,
}

impl Args {
    /// Workflow run metadata from the command line.
    pub fn workflow_config(&self) -> WorkflowConfig {
        WorkflowConfig {
            name: self.wf_name.clone(),
            short_name: self.wf_short_name.clone(),
            version: self.wf_version.clone(),
            run_id: self.wf_run.clone(),
            session_id: self.wf_session.clone(),
            file_access: FileAccess::from(self.open),
        }
    }
}

/// Build the payload and the staging links; return the path of the payload file.
pub fn generate<P: AsRef<Path>>(
    catalog: &VariantMetadataCatalog,
    config: &WorkflowConfig,
    path_analysis: &Path,
    paths: &[P],
    path_staging: &Path,
    path_output_dir: &Path,
) -> Result<PathBuf, Error> {
    tracing::info!("Loading analysis from {:?}", path_analysis);
    let analysis = SourceAnalysis::from_path(path_analysis)?;
    tracing::info!(
        "... analysis {} of study {} with {} sample(s)",
        &analysis.analysis_id,
        &analysis.study_id,
        analysis.samples.len()
    );

    tracing::info!("Assembling payload for {} file(s)", paths.len());
    let assembler = PayloadAssembler {
        catalog,
        decoder: DotDelimitedDecoder,
        redactor: SampleRedactor::default(),
        config,
    };
    let payload = assembler.assemble(&analysis, paths, path_staging)?;

    output::write_payload(&payload, path_output_dir)
}

/// Main entry point for `variant-processing` sub command.
pub fn run(args_common: &crate::common::Args, args: &Args) -> Result<(), anyhow::Error> {
    let before_anything = std::time::Instant::now();
    tracing::info!("args_common = {:#?}", &args_common);
    tracing::info!("args = {:#?}", &args);

    let catalog = VariantMetadataCatalog::default();
    tracing::debug!(
        "registered variant types: {:?}",
        catalog.variant_types().collect::<Vec<_>>()
    );
    let config = args.workflow_config();
    let path = generate(
        &catalog,
        &config,
        &args.path_analysis,
        &args.path_files,
        &args.path_staging,
        &args.path_output_dir,
    )?;
    println!("{}", path.display());

    tracing::info!(
        "All of `variant-processing` completed in {:?}",
        before_anything.elapsed()
    );
    Ok(())
}
