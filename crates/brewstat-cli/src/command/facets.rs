use std::path::PathBuf;

use brewstat_analysis::{pipeline::PipelineConfig, record::CategoricalColumn};
use clap::Args;

#[derive(Debug, Clone, Args)]
pub(crate) struct FacetsArg {
    /// Path to the brewery CSV file
    pub csv: PathBuf,
}

pub(crate) fn run(arg: &FacetsArg, config: &PipelineConfig) -> anyhow::Result<()> {
    let dataset = super::load_dataset(&arg.csv, config)?;

    println!("Facets of {} ({} rows)", arg.csv.display(), dataset.len());
    for column in [CategoricalColumn::BeerStyle, CategoricalColumn::Location] {
        let values = dataset.distinct_values(column);
        println!();
        println!("{column} ({} values):", values.len());
        for value in values {
            println!("  {value}");
        }
    }
    Ok(())
}
