//! JSON request bodies

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Maximum number of industries a holding record can carry.
pub const MAX_INDUSTRIES: usize = 5;

/// One NAV observation, for `POST /api/nav/` and `POST /api/nav/manual`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavRecordInput {
    /// Fund code
    pub fund_code: String,
    /// Fund name, used to create the fund if it does not exist yet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fund_name: Option<String>,
    /// Valuation date
    pub nav_date: NaiveDate,
    /// Unit NAV, strictly positive
    pub unit_nav: f64,
    /// Accumulated NAV, strictly positive
    pub accum_nav: f64,
}

impl NavRecordInput {
    /// Create a record without a fund name.
    pub fn new(fund_code: impl Into<String>, nav_date: NaiveDate, unit_nav: f64, accum_nav: f64) -> Self {
        Self {
            fund_code: fund_code.into(),
            fund_name: None,
            nav_date,
            unit_nav,
            accum_nav,
        }
    }

    /// Attach the fund name.
    pub fn with_fund_name(mut self, fund_name: impl Into<String>) -> Self {
        self.fund_name = Some(fund_name.into());
        self
    }
}

/// Body of the bulk NAV delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavIds {
    /// Record ids to delete
    pub nav_ids: Vec<i64>,
}

/// A fund's strategy classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyInput {
    /// Six-character fund code
    pub fund_code: String,
    /// Main strategy
    pub main_strategy: String,
    /// Sub-strategy
    pub sub_strategy: String,
    /// Whether the fund is a QDII product
    pub is_qd: bool,
}

/// Body of the QD status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QdStatus {
    /// New QD flag
    pub is_qd: bool,
}

/// Body of the bulk strategy delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FundCodes {
    /// Fund codes whose strategy should be removed
    pub fund_codes: Vec<String>,
}

/// Asset-class split of a project for one month. Ratios are percentages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssetRatios {
    /// A-shares
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a_share_ratio: Option<f64>,
    /// H-shares
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h_share_ratio: Option<f64>,
    /// US equities
    #[serde(skip_serializing_if = "Option::is_none")]
    pub us_share_ratio: Option<f64>,
    /// Other equity markets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_market_ratio: Option<f64>,
    /// Global bonds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_bond_ratio: Option<f64>,
    /// Convertible bonds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub convertible_bond_ratio: Option<f64>,
    /// Everything else
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_ratio: Option<f64>,
}

/// A new asset allocation record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetAllocation {
    /// Project the record belongs to
    pub project_name: String,
    /// Month; the backend keeps year and month only
    pub month: NaiveDate,
    /// The split
    #[serde(flatten)]
    pub ratios: AssetRatios,
}

/// How industry ratios are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioType {
    /// Share of the equity sleeve
    BasedOnStock,
    /// Share of the whole portfolio
    BasedOnTotal,
}

/// One industry and its ratio. Ratios may be negative for short books.
#[derive(Debug, Clone, PartialEq)]
pub struct IndustryWeight {
    /// Industry name
    pub name: String,
    /// Ratio in percent
    pub ratio: Option<f64>,
}

impl IndustryWeight {
    /// Create a weight.
    pub fn new(name: impl Into<String>, ratio: f64) -> Self {
        Self {
            name: name.into(),
            ratio: Some(ratio),
        }
    }
}

/// Industry allocation of a project for one month.
///
/// Serializes the backend's flat `industry1`, `industry1_ratio`, …
/// `industry5_ratio` columns. More than five industries fail serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct IndustryAllocation {
    /// Project the record belongs to
    pub project_name: String,
    /// Month; the backend keeps year and month only
    pub month: NaiveDate,
    /// How ratios are expressed
    pub ratio_type: RatioType,
    /// Industries, largest first
    pub industries: Vec<IndustryWeight>,
}

impl Serialize for IndustryAllocation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("project_name", &self.project_name)?;
        map.serialize_entry("month", &self.month)?;
        map.serialize_entry("ratio_type", &self.ratio_type)?;
        serialize_industries(&mut map, &self.industries)?;
        map.end()
    }
}

/// Partial update of an industry allocation record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndustryAllocationUpdate {
    /// New ratio type
    pub ratio_type: Option<RatioType>,
    /// Replacement industry list; empty leaves them unchanged
    pub industries: Vec<IndustryWeight>,
}

impl Serialize for IndustryAllocationUpdate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(ratio_type) = &self.ratio_type {
            map.serialize_entry("ratio_type", ratio_type)?;
        }
        serialize_industries(&mut map, &self.industries)?;
        map.end()
    }
}

fn serialize_industries<M: SerializeMap>(map: &mut M, industries: &[IndustryWeight]) -> Result<(), M::Error> {
    if industries.len() > MAX_INDUSTRIES {
        return Err(<M::Error as serde::ser::Error>::custom(format!(
            "at most {} industries per record, got {}",
            MAX_INDUSTRIES,
            industries.len()
        )));
    }

    for (i, industry) in industries.iter().enumerate() {
        let slot = i + 1;
        map.serialize_entry(&format!("industry{}", slot), &industry.name)?;
        if let Some(ratio) = industry.ratio {
            map.serialize_entry(&format!("industry{}_ratio", slot), &ratio)?;
        }
    }
    Ok(())
}
