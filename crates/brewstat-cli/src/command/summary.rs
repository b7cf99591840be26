use brewstat_analysis::{pipeline::PipelineConfig, summary};
use clap::Args;

use super::SelectionArg;
use crate::table;

#[derive(Debug, Clone, Args)]
pub(crate) struct SummaryArg {
    #[clap(flatten)]
    pub selection: SelectionArg,
}

pub(crate) fn run(arg: &SummaryArg, config: &PipelineConfig) -> anyhow::Result<()> {
    let view = arg.selection.load_view(config)?;

    println!(
        "Summary: {} / {} ({} rows)",
        arg.selection.style,
        arg.selection.location,
        view.len()
    );
    println!();
    table::print_summary_table(&summary::summarize(&view));
    Ok(())
}
