//! Pipeline configuration from a TOML file and the environment
//!
//! Sources are layered in increasing priority: built-in defaults, the
//! `--config` file, then `BREWSTAT_*` environment variables (for example
//! `BREWSTAT_CURVE_SAMPLES=200`). Command-line flags are applied on top by
//! the individual commands.
//!
//! ```toml
//! whisker_multiplier = 1.5
//! curve_samples = 100
//! row_limit = 15000
//! whisker_group = "location"
//! whisker_value = "quality_score"
//!
//! [[relationships]]
//! x = "bitterness"
//! y = "sales_volume_ratio"
//! degree = 6
//! ```

use std::path::Path;

use anyhow::Context;
use brewstat_analysis::pipeline::PipelineConfig;
use config::{Config, Environment, File, FileFormat};

const ENV_PREFIX: &str = "BREWSTAT";

pub(crate) fn load(config_path: Option<&Path>) -> anyhow::Result<PipelineConfig> {
    build(config_path, Environment::with_prefix(ENV_PREFIX))
}

fn build(config_path: Option<&Path>, environment: Environment) -> anyhow::Result<PipelineConfig> {
    let mut builder = Config::builder();
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).format(FileFormat::Toml));
    }

    let config = builder
        .add_source(environment.try_parsing(true))
        .build()
        .context("Failed to read configuration")?
        .try_deserialize::<PipelineConfig>()
        .context("Invalid configuration")?;

    config.validate()?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use brewstat_analysis::{
        record::{CategoricalColumn, Measure, NumericColumn},
        regression::ScatterRelationship,
    };

    use super::*;

    fn environment(vars: &[(&str, &str)]) -> Environment {
        Environment::with_prefix(ENV_PREFIX).source(Some(
            vars.iter()
                .map(|&(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
        ))
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = build(None, environment(&[])).unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_file_then_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brewstat.toml");
        fs::write(
            &path,
            r#"
curve_samples = 40
whisker_group = "sku"

[[relationships]]
x = "bitterness"
y = "sales_volume_ratio"
degree = 4
"#,
        )
        .unwrap();

        let config = build(
            Some(&path),
            environment(&[("BREWSTAT_CURVE_SAMPLES", "25"), ("OTHER_ROW_LIMIT", "3")]),
        )
        .unwrap();
        assert_eq!(config.curve_samples, 25);
        assert_eq!(config.whisker_group, CategoricalColumn::Sku);
        assert_eq!(config.whisker_value, NumericColumn::QualityScore);
        assert_eq!(config.row_limit, Some(15_000));
        assert_eq!(
            config.relationships,
            vec![ScatterRelationship::new(
                NumericColumn::Bitterness,
                Measure::SalesVolumeRatio,
                4
            )]
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(build(Some(&path), environment(&[])).is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brewstat.toml");
        fs::write(&path, "whisker_value = \"hops\"\n").unwrap();
        assert!(build(Some(&path), environment(&[])).is_err());

        let err = build(None, environment(&[("BREWSTAT_WHISKER_MULTIPLIER", "-1")])).unwrap_err();
        assert!(err.to_string().contains("whisker_multiplier"));
    }
}
