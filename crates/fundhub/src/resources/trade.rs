//! Trade analytics endpoints

use serde_json::Value;

use super::{Resource, endpoint};
use crate::{
    client::Client,
    error::Result,
    http::RequestDescriptor,
    types::{CashFlowParams, ClientActivityParams, FundPerformanceParams, SeasonalParams},
};

const PREFIX: &str = "/api/trade";

/// Trade analytics resource. Read-only.
#[derive(Debug, Clone)]
pub struct Trades {
    client: Client,
}

impl Trades {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Subscriptions and redemptions bucketed over time.
    pub async fn cash_flow(&self, params: &CashFlowParams) -> Result<Value> {
        self.get("flow-analysis", params).await
    }

    /// How often each client trades.
    pub async fn client_activity(&self, params: &ClientActivityParams) -> Result<Value> {
        self.get("client-activity", params).await
    }

    /// Fund returns against an optional benchmark.
    pub async fn fund_performance(&self, params: &FundPerformanceParams) -> Result<Value> {
        self.get("fund-performance", params).await
    }

    /// Trading volume by month of the year.
    pub async fn seasonal_patterns(&self, params: &SeasonalParams) -> Result<Value> {
        self.get("seasonal-analysis", params).await
    }

    async fn get<P: serde::Serialize>(&self, path: &str, params: &P) -> Result<Value> {
        let request = RequestDescriptor::get(endpoint(PREFIX, &[path])).query_params(params)?;
        self.client.send_value(request).await
    }
}

impl Resource for Trades {
    fn client(&self) -> &Client {
        &self.client
    }
}
