//! Dataset loading from CSV
//!
//! The source is a CSV export of brewery operations with one row per batch.
//! Headers are validated before any row is parsed: if a column the pipeline
//! depends on is absent, loading fails with [`LoadError::MissingColumn`]
//! instead of surfacing later inside a computation.
//!
//! # Required Columns
//!
//! `Beer_Style`, `Location`, `SKU`, `Brew_Date`, `Quality_Score`,
//! `Bitterness`, `Alcohol_Content`, `Fermentation_Time`, `Total_Sales`,
//! `Volume_Produced`. Every other known column is optional and loads as
//! missing when absent; unknown columns are ignored.
//!
//! # Caching
//!
//! [`DatasetCache`] memoizes loads by `(path, row_limit)`. It never looks at
//! file contents, so a file changed on disk after loading is only picked up
//! after [`DatasetCache::clear`].
//!
//! # Examples
//!
//! ```
//! use brewstat_analysis::loader;
//!
//! let csv = "\
//! Batch_ID,Brew_Date,Beer_Style,SKU,Location,Fermentation_Time,Alcohol_Content,Bitterness,Volume_Produced,Total_Sales,Quality_Score
//! 1,2020-01-01 00:00:19,Lager,Kegs,Whitefield,16,5.4,31,4666,2664.7,8.57
//! 2,2020-01-01 00:00:31,Wheat Beer,Kegs,Whitefield,13,5.1,29,832,9758.1,7.42
//! ";
//! let dataset = loader::load_from_reader(csv.as_bytes(), None).unwrap();
//! assert_eq!(dataset.len(), 2);
//! assert_eq!(dataset.records()[1].beer_style, "Wheat Beer");
//! ```

use std::{
    collections::HashMap,
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;

use crate::{
    dataset::Dataset,
    record::{BatchRecord, CategoricalColumn, NumericColumn},
};

/// Number of rows the application reads from the source by default.
pub const DEFAULT_ROW_LIMIT: usize = 15_000;

const BREW_DATE_HEADER: &str = "Brew_Date";

const REQUIRED_HEADERS: [&str; 10] = [
    CategoricalColumn::BeerStyle.header(),
    CategoricalColumn::Location.header(),
    CategoricalColumn::Sku.header(),
    BREW_DATE_HEADER,
    NumericColumn::QualityScore.header(),
    NumericColumn::Bitterness.header(),
    NumericColumn::AlcoholContent.header(),
    NumericColumn::FermentationTime.header(),
    NumericColumn::TotalSales.header(),
    NumericColumn::VolumeProduced.header(),
];

const DATE_TIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum LoadError {
    #[display("failed to open {}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("missing required column '{column}'")]
    MissingColumn { column: &'static str },
    #[display("invalid brew date '{value}' in data row {row}")]
    InvalidDate { row: usize, value: String },
    #[display("malformed CSV: {_0}")]
    #[from]
    Csv(csv::Error),
}

/// One CSV row as it appears in the file.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Batch_ID", default)]
    batch_id: Option<u64>,
    #[serde(rename = "Brew_Date")]
    brew_date: String,
    #[serde(rename = "Beer_Style")]
    beer_style: String,
    #[serde(rename = "SKU")]
    sku: String,
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "Fermentation_Time")]
    fermentation_time: Option<f64>,
    #[serde(rename = "Temperature", default)]
    temperature: Option<f64>,
    #[serde(rename = "pH_Level", default)]
    ph_level: Option<f64>,
    #[serde(rename = "Gravity", default)]
    gravity: Option<f64>,
    #[serde(rename = "Alcohol_Content")]
    alcohol_content: Option<f64>,
    #[serde(rename = "Bitterness")]
    bitterness: Option<f64>,
    #[serde(rename = "Color", default)]
    color: Option<f64>,
    #[serde(rename = "Ingredient_Ratio", default)]
    ingredient_ratio: Option<String>,
    #[serde(rename = "Volume_Produced")]
    volume_produced: Option<f64>,
    #[serde(rename = "Total_Sales")]
    total_sales: Option<f64>,
    #[serde(rename = "Quality_Score")]
    quality_score: Option<f64>,
    #[serde(rename = "Brewhouse_Efficiency", default)]
    brewhouse_efficiency: Option<f64>,
    #[serde(rename = "Loss_During_Brewing", default)]
    loss_during_brewing: Option<f64>,
    #[serde(rename = "Loss_During_Fermentation", default)]
    loss_during_fermentation: Option<f64>,
    #[serde(rename = "Loss_During_Bottling_Kegging", default)]
    loss_during_bottling_kegging: Option<f64>,
}

impl CsvRow {
    fn into_record(self, row: usize) -> Result<BatchRecord, LoadError> {
        let brew_date = parse_brew_date(&self.brew_date).ok_or_else(|| LoadError::InvalidDate {
            row,
            value: self.brew_date.clone(),
        })?;
        let missing = |v: Option<f64>| v.unwrap_or(f64::NAN);

        Ok(BatchRecord {
            batch_id: self.batch_id,
            brew_date,
            beer_style: self.beer_style,
            sku: self.sku,
            location: self.location,
            fermentation_time: missing(self.fermentation_time),
            temperature: missing(self.temperature),
            ph_level: missing(self.ph_level),
            gravity: missing(self.gravity),
            alcohol_content: missing(self.alcohol_content),
            bitterness: missing(self.bitterness),
            color: missing(self.color),
            ingredient_ratio: self.ingredient_ratio.filter(|r| !r.is_empty()),
            volume_produced: missing(self.volume_produced),
            total_sales: missing(self.total_sales),
            quality_score: missing(self.quality_score),
            brewhouse_efficiency: missing(self.brewhouse_efficiency),
            loss_during_brewing: missing(self.loss_during_brewing),
            loss_during_fermentation: missing(self.loss_during_fermentation),
            loss_during_bottling_kegging: missing(self.loss_during_bottling_kegging),
        })
    }
}

/// Parses a brew date, accepting date-times and bare dates (taken as midnight).
#[must_use]
pub fn parse_brew_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// Loads at most `row_limit` data rows from CSV text.
pub fn load_from_reader<R>(reader: R, row_limit: Option<usize>) -> Result<Dataset, LoadError>
where
    R: Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if let Some(column) = REQUIRED_HEADERS
        .into_iter()
        .find(|required| !headers.iter().any(|h| h == *required))
    {
        return Err(LoadError::MissingColumn { column });
    }

    let mut records = vec![];
    for (index, row) in reader
        .deserialize::<CsvRow>()
        .take(row_limit.unwrap_or(usize::MAX))
        .enumerate()
    {
        records.push(row?.into_record(index + 1)?);
    }

    tracing::info!(rows = records.len(), ?row_limit, "dataset loaded");
    Ok(Dataset::new(records))
}

/// Loads at most `row_limit` data rows from a CSV file.
pub fn load_from_path<P>(path: P, row_limit: Option<usize>) -> Result<Dataset, LoadError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_owned(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "reading dataset");
    load_from_reader(file, row_limit)
}

/// Identity of a load: where it came from and how many rows were read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceKey {
    pub path: PathBuf,
    pub row_limit: Option<usize>,
}

/// Memoized dataset loads keyed by [`SourceKey`].
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<SourceKey, Dataset>,
}

impl DatasetCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached dataset for this source, loading it on first use.
    pub fn get_or_load<P>(&mut self, path: P, row_limit: Option<usize>) -> Result<Dataset, LoadError>
    where
        P: AsRef<Path>,
    {
        let key = SourceKey {
            path: path.as_ref().to_owned(),
            row_limit,
        };
        if let Some(dataset) = self.entries.get(&key) {
            tracing::debug!(path = %key.path.display(), "dataset cache hit");
            return Ok(dataset.clone());
        }

        let dataset = load_from_path(&key.path, row_limit)?;
        self.entries.insert(key, dataset.clone());
        Ok(dataset)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
