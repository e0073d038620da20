//! Query-string parameter structs
//!
//! Fields serialize in declaration order. `None` fields are left out of the
//! query string so the backend applies its own defaults.

use chrono::NaiveDate;
use serde::Serialize;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

/// Bucket size for cash-flow analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePeriod {
    /// One bucket per day
    Daily,
    /// One bucket per week
    Weekly,
    /// One bucket per month
    Monthly,
    /// One bucket per quarter
    Quarterly,
}

/// Filter on the sign of a stage return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceFilter {
    /// Gains only
    Positive,
    /// Losses only
    Negative,
    /// Flat only
    Neutral,
}

/// Filters for `GET /api/nav/list`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NavListParams {
    /// Fund code filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fund_code: Option<String>,
    /// First NAV date, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Last NAV date, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Page number, from 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Rows per page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Sort column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// Sort direction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

impl NavListParams {
    /// Filter by fund code.
    pub fn fund(fund_code: impl Into<String>) -> Self {
        Self {
            fund_code: Some(fund_code.into()),
            ..Self::default()
        }
    }

    /// Restrict to a date range.
    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Select a page.
    pub fn page(mut self, page: u32, page_size: u32) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }
}

/// Filters for `GET /api/nav/export`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NavExportParams {
    /// Fund code filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fund_code: Option<String>,
    /// First NAV date, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Last NAV date, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// Filters for `GET /api/position/list`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PositionListParams {
    /// Client group id filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    /// Fund code filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fund_code: Option<String>,
    /// First position date, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Last position date, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Financial planner filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domestic_planner: Option<String>,
    /// Page number, from 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Rows per page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// Filters for `GET /api/position/clients`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClientListParams {
    /// Page number, from 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Rows per page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Matches group id or client name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Financial planner filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planner: Option<String>,
    /// Sort column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// Sort direction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

/// Dates for `GET /api/position/clients/{group_id}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClientDetailParams {
    /// Holdings as of this date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of_date: Option<NaiveDate>,
    /// Start of the stage-return window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// End of the stage-return window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// Filters for `GET /api/strategy/` and `GET /api/strategy/export`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StrategyListParams {
    /// Fund code filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fund_code: Option<String>,
    /// Main strategy filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_strategy: Option<String>,
    /// Sub-strategy filter
    #[serde(rename = "subStrategy", skip_serializing_if = "Option::is_none")]
    pub sub_strategy: Option<String>,
    /// Fund code search
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Page number, from 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Rows per page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Sort column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// Sort direction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

/// Filters for `GET /api/trade/flow-analysis`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CashFlowParams {
    /// Fund code filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fund_code: Option<String>,
    /// Window start
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Window end
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Bucket size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_period: Option<TimePeriod>,
}

/// Filters for `GET /api/trade/client-activity`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClientActivityParams {
    /// Window start
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Window end
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Ignore clients with fewer trades
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_transactions: Option<u32>,
}

/// Filters for `GET /api/trade/fund-performance`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FundPerformanceParams {
    /// Fund code filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fund_code: Option<String>,
    /// Benchmark return to compare against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark_return: Option<f64>,
    /// Length of the analysis window in days
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_days: Option<u32>,
}

/// Filters for `GET /api/trade/seasonal-analysis`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeasonalParams {
    /// Fund code filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fund_code: Option<String>,
    /// Calendar year
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

/// Filters for `GET /api/transaction/clients`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionClientParams {
    /// Matches group id or client name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Window start
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Window end
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Page number, from 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Rows per page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// Filters for `GET /api/transaction/clients/{group_id}/transactions`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClientTransactionParams {
    /// Window start
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Window end
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Transaction type filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<String>,
    /// Fund name filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fund_name: Option<String>,
    /// Page number, from 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Rows per page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// An optional date window.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DateRangeParams {
    /// Window start
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Window end
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// A mandatory date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodParams {
    /// Window start
    pub start_date: NaiveDate,
    /// Window end
    pub end_date: NaiveDate,
}

impl PeriodParams {
    /// Create a window.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }
}

/// Filters for `GET /api/stage-performance/weekly`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WeeklyPerformanceParams {
    /// Matches product name or code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Main strategy filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_strategy: Option<String>,
    /// Sub-strategy filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_strategy: Option<String>,
    /// Sign of the return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_filter: Option<PerformanceFilter>,
    /// How many recent days of NAV data to consider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_limit: Option<u32>,
}

/// Filters for `GET /api/stage-performance/period`.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodPerformanceParams {
    /// Window start
    pub start_date: NaiveDate,
    /// Window end
    pub end_date: NaiveDate,
    /// Matches product name or code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Main strategy filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_strategy: Option<String>,
    /// Sub-strategy filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_strategy: Option<String>,
}

impl PeriodPerformanceParams {
    /// Filters covering `start_date..=end_date` with nothing else set.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            search: None,
            major_strategy: None,
            sub_strategy: None,
        }
    }
}

/// Month window for `GET /api/project-holding/{project_name}/analysis`.
///
/// Months are `YYYY-MM` strings, as the backend expects them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MonthRangeParams {
    /// First month, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_month: Option<String>,
    /// Last month, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_month: Option<String>,
}
