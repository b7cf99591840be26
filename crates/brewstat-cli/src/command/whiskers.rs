use brewstat_analysis::{
    pipeline::PipelineConfig,
    record::{CategoricalColumn, NumericColumn},
    whisker,
};
use clap::Args;

use super::SelectionArg;
use crate::table;

#[derive(Debug, Clone, Args)]
pub(crate) struct WhiskersArg {
    #[clap(flatten)]
    pub selection: SelectionArg,

    /// Categorical column to group by [default: from configuration]
    #[arg(long)]
    pub group: Option<CategoricalColumn>,

    /// Numeric column to summarize [default: from configuration]
    #[arg(long)]
    pub value: Option<NumericColumn>,

    /// Whisker reach in multiples of the IQR [default: from configuration]
    #[arg(long)]
    pub multiplier: Option<f64>,
}

pub(crate) fn run(arg: &WhiskersArg, config: &PipelineConfig) -> anyhow::Result<()> {
    let group = arg.group.unwrap_or(config.whisker_group);
    let value = arg.value.unwrap_or(config.whisker_value);
    let multiplier = arg.multiplier.unwrap_or(config.whisker_multiplier);
    if !multiplier.is_finite() || multiplier < 0.0 {
        anyhow::bail!("Whisker multiplier must be a non-negative number, got {multiplier}");
    }

    let view = arg.selection.load_view(config)?;
    let records = whisker::group_whiskers(&view, group, value, multiplier);

    println!(
        "Whiskers of {value} by {group}: {} / {} ({} rows, {multiplier} x IQR)",
        arg.selection.style,
        arg.selection.location,
        view.len()
    );
    println!();
    table::print_whisker_table(&group.to_string(), &records);
    Ok(())
}
