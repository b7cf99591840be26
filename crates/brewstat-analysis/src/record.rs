//! Batch records and typed column access
//!
//! A [`BatchRecord`] is one row of the brewery production table. Columns are
//! addressed through the [`CategoricalColumn`], [`NumericColumn`] and
//! [`Measure`] enums instead of by name, so a misspelled column is rejected
//! when it is parsed rather than deep inside a computation.
//!
//! # Missing Values
//!
//! Numeric cells that are empty in the source load as `NaN`. Every
//! computation in this crate treats non-finite values as missing and skips
//! them.
//!
//! # Column Names
//!
//! Every column has a snake_case name (used on the command line, in
//! configuration and in JSON output) and the header it carries in the source
//! CSV:
//!
//! ```text
//! name                          CSV header
//! ----------------------------  ----------------------------
//! beer_style                    Beer_Style
//! location                      Location
//! sku                           SKU
//! quality_score                 Quality_Score
//! volume_produced               Volume_Produced
//! ph_level                      pH_Level
//! ...
//! ```
//!
//! # Examples
//!
//! ```
//! use brewstat_analysis::record::{BatchRecord, Measure, NumericColumn};
//!
//! let record = BatchRecord {
//!     total_sales: 100.0,
//!     volume_produced: 40.0,
//!     bitterness: 35.0,
//!     ..BatchRecord::default()
//! };
//!
//! let column: NumericColumn = "bitterness".parse().unwrap();
//! assert_eq!(column.value(&record), 35.0);
//!
//! let measure: Measure = "sales_volume_ratio".parse().unwrap();
//! assert_eq!(measure, Measure::SalesVolumeRatio);
//! ```

use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One production batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchRecord {
    pub batch_id: Option<u64>,
    pub brew_date: NaiveDateTime,
    pub beer_style: String,
    pub sku: String,
    pub location: String,
    /// Days
    pub fermentation_time: f64,
    pub temperature: f64,
    pub ph_level: f64,
    pub gravity: f64,
    /// Percent alcohol by volume
    pub alcohol_content: f64,
    /// IBU
    pub bitterness: f64,
    pub color: f64,
    /// Ingredient proportions as written in the source, e.g. `1:0.32:0.16`
    pub ingredient_ratio: Option<String>,
    pub volume_produced: f64,
    pub total_sales: f64,
    pub quality_score: f64,
    pub brewhouse_efficiency: f64,
    pub loss_during_brewing: f64,
    pub loss_during_fermentation: f64,
    pub loss_during_bottling_kegging: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown {kind} column '{name}'")]
pub struct ParseColumnError {
    kind: &'static str,
    name: String,
}

/// String-valued columns usable as facets or grouping keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalColumn {
    BeerStyle,
    Location,
    Sku,
}

impl CategoricalColumn {
    pub const ALL: [Self; 3] = [Self::BeerStyle, Self::Location, Self::Sku];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BeerStyle => "beer_style",
            Self::Location => "location",
            Self::Sku => "sku",
        }
    }

    /// Header of this column in the source CSV.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::BeerStyle => "Beer_Style",
            Self::Location => "Location",
            Self::Sku => "SKU",
        }
    }

    #[must_use]
    pub fn value(self, record: &BatchRecord) -> &str {
        match self {
            Self::BeerStyle => &record.beer_style,
            Self::Location => &record.location,
            Self::Sku => &record.sku,
        }
    }
}

impl fmt::Display for CategoricalColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.name(), f)
    }
}

impl FromStr for CategoricalColumn {
    type Err = ParseColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| ParseColumnError {
                kind: "categorical",
                name: s.to_owned(),
            })
    }
}

/// Numeric measurement columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericColumn {
    FermentationTime,
    Temperature,
    PhLevel,
    Gravity,
    AlcoholContent,
    Bitterness,
    Color,
    VolumeProduced,
    TotalSales,
    QualityScore,
    BrewhouseEfficiency,
    LossDuringBrewing,
    LossDuringFermentation,
    LossDuringBottlingKegging,
}

impl NumericColumn {
    pub const ALL: [Self; 14] = [
        Self::FermentationTime,
        Self::Temperature,
        Self::PhLevel,
        Self::Gravity,
        Self::AlcoholContent,
        Self::Bitterness,
        Self::Color,
        Self::VolumeProduced,
        Self::TotalSales,
        Self::QualityScore,
        Self::BrewhouseEfficiency,
        Self::LossDuringBrewing,
        Self::LossDuringFermentation,
        Self::LossDuringBottlingKegging,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FermentationTime => "fermentation_time",
            Self::Temperature => "temperature",
            Self::PhLevel => "ph_level",
            Self::Gravity => "gravity",
            Self::AlcoholContent => "alcohol_content",
            Self::Bitterness => "bitterness",
            Self::Color => "color",
            Self::VolumeProduced => "volume_produced",
            Self::TotalSales => "total_sales",
            Self::QualityScore => "quality_score",
            Self::BrewhouseEfficiency => "brewhouse_efficiency",
            Self::LossDuringBrewing => "loss_during_brewing",
            Self::LossDuringFermentation => "loss_during_fermentation",
            Self::LossDuringBottlingKegging => "loss_during_bottling_kegging",
        }
    }

    /// Header of this column in the source CSV.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::FermentationTime => "Fermentation_Time",
            Self::Temperature => "Temperature",
            Self::PhLevel => "pH_Level",
            Self::Gravity => "Gravity",
            Self::AlcoholContent => "Alcohol_Content",
            Self::Bitterness => "Bitterness",
            Self::Color => "Color",
            Self::VolumeProduced => "Volume_Produced",
            Self::TotalSales => "Total_Sales",
            Self::QualityScore => "Quality_Score",
            Self::BrewhouseEfficiency => "Brewhouse_Efficiency",
            Self::LossDuringBrewing => "Loss_During_Brewing",
            Self::LossDuringFermentation => "Loss_During_Fermentation",
            Self::LossDuringBottlingKegging => "Loss_During_Bottling_Kegging",
        }
    }

    /// Raw cell value; `NaN` when the cell was missing.
    #[must_use]
    pub fn value(self, record: &BatchRecord) -> f64 {
        match self {
            Self::FermentationTime => record.fermentation_time,
            Self::Temperature => record.temperature,
            Self::PhLevel => record.ph_level,
            Self::Gravity => record.gravity,
            Self::AlcoholContent => record.alcohol_content,
            Self::Bitterness => record.bitterness,
            Self::Color => record.color,
            Self::VolumeProduced => record.volume_produced,
            Self::TotalSales => record.total_sales,
            Self::QualityScore => record.quality_score,
            Self::BrewhouseEfficiency => record.brewhouse_efficiency,
            Self::LossDuringBrewing => record.loss_during_brewing,
            Self::LossDuringFermentation => record.loss_during_fermentation,
            Self::LossDuringBottlingKegging => record.loss_during_bottling_kegging,
        }
    }

    /// Cell value, or `None` when it is missing or non-finite.
    #[must_use]
    pub fn defined_value(self, record: &BatchRecord) -> Option<f64> {
        Some(self.value(record)).filter(|v| v.is_finite())
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.name(), f)
    }
}

impl FromStr for NumericColumn {
    type Err = ParseColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| ParseColumnError {
                kind: "numeric",
                name: s.to_owned(),
            })
    }
}

/// A numeric quantity per row: a stored column or the derived sales/volume ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Measure {
    Column(NumericColumn),
    SalesVolumeRatio,
}

impl Measure {
    pub const SALES_VOLUME_RATIO_NAME: &'static str = "sales_volume_ratio";

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Column(column) => column.name(),
            Self::SalesVolumeRatio => Self::SALES_VOLUME_RATIO_NAME,
        }
    }
}

impl From<NumericColumn> for Measure {
    fn from(column: NumericColumn) -> Self {
        Self::Column(column)
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.name(), f)
    }
}

impl FromStr for Measure {
    type Err = ParseColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::SALES_VOLUME_RATIO_NAME {
            return Ok(Self::SalesVolumeRatio);
        }
        s.parse::<NumericColumn>()
            .map(Self::Column)
            .map_err(|_| ParseColumnError {
                kind: "measure",
                name: s.to_owned(),
            })
    }
}

impl TryFrom<String> for Measure {
    type Error = ParseColumnError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Measure> for String {
    fn from(measure: Measure) -> Self {
        measure.name().to_owned()
    }
}
