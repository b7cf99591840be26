use std::path::{Path, PathBuf};

use anyhow::Context;
use brewstat_analysis::{
    dataset::{Dataset, FilteredView},
    facet::FacetFilter,
    loader,
    pipeline::PipelineConfig,
};
use clap::{Args, Parser, Subcommand};

use self::{
    facets::FacetsArg, regress::RegressArg, report::ReportArg, summary::SummaryArg,
    whiskers::WhiskersArg,
};
use crate::settings;

mod facets;
mod regress;
mod report;
mod summary;
mod whiskers;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Maximum number of CSV data rows to read
    #[arg(long, global = true)]
    row_limit: Option<usize>,

    /// What to compute
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// List the beer styles and locations available for selection
    Facets(#[clap(flatten)] FacetsArg),
    /// Print summary statistics of every numeric column
    Summary(#[clap(flatten)] SummaryArg),
    /// Print box-plot whisker statistics per group
    Whiskers(#[clap(flatten)] WhiskersArg),
    /// Fit a polynomial trend of one measure against another
    Regress(#[clap(flatten)] RegressArg),
    /// Write the full analysis of a selection as JSON
    Report(#[clap(flatten)] ReportArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let mut config = settings::load(args.config.as_deref())?;
    if let Some(row_limit) = args.row_limit {
        config.row_limit = Some(row_limit);
    }

    match &args.mode {
        Mode::Facets(arg) => facets::run(arg, &config)?,
        Mode::Summary(arg) => summary::run(arg, &config)?,
        Mode::Whiskers(arg) => whiskers::run(arg, &config)?,
        Mode::Regress(arg) => regress::run(arg, &config)?,
        Mode::Report(arg) => report::run(arg, &config)?,
    }
    Ok(())
}

/// Source file and facet values shared by the per-selection commands.
#[derive(Debug, Clone, Args)]
pub(crate) struct SelectionArg {
    /// Path to the brewery CSV file
    pub csv: PathBuf,

    /// Beer style to select
    #[arg(long)]
    pub style: String,

    /// Location to select
    #[arg(long)]
    pub location: String,
}

impl SelectionArg {
    pub(crate) fn filter(&self) -> FacetFilter {
        FacetFilter::style_and_location(&self.style, &self.location)
    }

    /// Loads the dataset and checks that the selected values exist in it.
    pub(crate) fn load(&self, config: &PipelineConfig) -> anyhow::Result<(Dataset, FacetFilter)> {
        let dataset = load_dataset(&self.csv, config)?;
        let filter = self.filter();
        filter
            .validate(&dataset)
            .with_context(|| format!("Invalid selection for {}", self.csv.display()))?;
        Ok((dataset, filter))
    }

    pub(crate) fn load_view(&self, config: &PipelineConfig) -> anyhow::Result<FilteredView> {
        let (dataset, filter) = self.load(config)?;
        Ok(filter.apply(&dataset))
    }
}

pub(crate) fn load_dataset(path: &Path, config: &PipelineConfig) -> anyhow::Result<Dataset> {
    loader::load_from_path(path, config.row_limit)
        .with_context(|| format!("Failed to load dataset: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args = CommandArgs::try_parse_from([
            "brewstat",
            "summary",
            "data.csv",
            "--style",
            "Stout",
            "--location",
            "Whitefield",
            "--row-limit",
            "10",
        ])
        .unwrap();
        assert_eq!(args.row_limit, Some(10));
        let Mode::Summary(arg) = args.mode else {
            panic!("expected summary");
        };
        assert_eq!(arg.selection.style, "Stout");
        assert_eq!(arg.selection.location, "Whitefield");
    }

    #[test]
    fn test_regress_rejects_unknown_measure() {
        let result = CommandArgs::try_parse_from([
            "brewstat", "regress", "data.csv", "--style", "IPA", "--location", "A", "--x", "hops",
            "--y", "total_sales", "--degree", "2",
        ]);
        assert!(result.is_err());
    }
}
