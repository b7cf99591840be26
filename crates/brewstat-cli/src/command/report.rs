use std::path::PathBuf;

use brewstat_analysis::pipeline::{Pipeline, PipelineConfig};
use clap::Args;

use super::SelectionArg;
use crate::util::JsonOutput;

#[derive(Debug, Clone, Args)]
pub(crate) struct ReportArg {
    #[clap(flatten)]
    pub selection: SelectionArg,

    /// Output file path [default: stdout]
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ReportArg, config: &PipelineConfig) -> anyhow::Result<()> {
    let (dataset, filter) = arg.selection.load(config)?;
    let report = Pipeline::new(config.clone()).run(&dataset, &filter);

    let output = JsonOutput::from_output_path(arg.output.clone());
    output.write_json(&report)?;
    tracing::info!(rows = report.rows.len(), %output, "report written");
    Ok(())
}
