use anyhow::Context;
use brewstat_analysis::{
    derived::DerivedView, pipeline::PipelineConfig, record::Measure, regression,
};
use clap::Args;

use super::SelectionArg;
use crate::table;

#[derive(Debug, Clone, Args)]
pub(crate) struct RegressArg {
    #[clap(flatten)]
    pub selection: SelectionArg,

    /// Measure on the x axis
    #[arg(long)]
    pub x: Measure,

    /// Measure on the y axis
    #[arg(long)]
    pub y: Measure,

    /// Polynomial degree
    #[arg(long)]
    pub degree: usize,

    /// Number of curve points [default: from configuration]
    #[arg(long)]
    pub samples: Option<usize>,
}

pub(crate) fn run(arg: &RegressArg, config: &PipelineConfig) -> anyhow::Result<()> {
    let samples = arg.samples.unwrap_or(config.curve_samples);
    let view = arg.selection.load_view(config)?;
    let derived = DerivedView::new(&view);

    let curve = regression::fit_curve(&derived, arg.x, arg.y, arg.degree, samples)
        .with_context(|| format!("Failed to fit {} against {}", arg.y, arg.x))?;

    println!(
        "Degree-{} fit of {} against {}: {} / {}",
        arg.degree, arg.y, arg.x, arg.selection.style, arg.selection.location
    );
    println!();
    if curve.is_empty() {
        println!("No rows with both {} and {} defined.", arg.x, arg.y);
        return Ok(());
    }
    table::print_coefficients(&curve.coefficients);
    println!();
    table::print_curve_table(&arg.x.to_string(), &arg.y.to_string(), &curve.points);
    Ok(())
}
