//! Stage performance endpoints

use serde_json::Value;

use super::{Resource, endpoint};
use crate::{
    client::Client,
    error::Result,
    http::RequestDescriptor,
    types::{PeriodPerformanceParams, WeeklyPerformanceParams},
};

const PREFIX: &str = "/api/stage-performance";

/// Stage performance resource.
#[derive(Debug, Clone)]
pub struct StagePerformance {
    client: Client,
}

impl StagePerformance {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Product returns over the last week.
    pub async fn weekly(&self, params: &WeeklyPerformanceParams) -> Result<Value> {
        let request = RequestDescriptor::get(endpoint(PREFIX, &["weekly"])).query_params(params)?;
        self.client.send_value(request).await
    }

    /// Product returns over a custom window.
    pub async fn period(&self, params: &PeriodPerformanceParams) -> Result<Value> {
        let request = RequestDescriptor::get(endpoint(PREFIX, &["period"])).query_params(params)?;
        self.client.send_value(request).await
    }
}

impl Resource for StagePerformance {
    fn client(&self) -> &Client {
        &self.client
    }
}
