//! Endpoint catalog
//!
//! One handle per backend area. Each handle is a cheap clone of the
//! [`Client`] and builds a [`RequestDescriptor`](crate::http::RequestDescriptor)
//! per call; none of them talk to the network directly.

pub mod nav;
pub mod position;
pub mod project_holding;
pub mod stage_performance;
pub mod strategy;
pub mod trade;
pub mod transaction;

pub use nav::Nav;
pub use position::Positions;
pub use project_holding::ProjectHoldings;
pub use stage_performance::StagePerformance;
pub use strategy::Strategies;
pub use trade::Trades;
pub use transaction::Transactions;

use crate::client::Client;
use crate::http::encode_path_segment;

/// Base trait for API resources.
pub trait Resource {
    /// Get a reference to the client.
    fn client(&self) -> &Client;
}

/// Join a resource prefix and path segments, percent-encoding each segment.
pub(crate) fn endpoint(prefix: &str, segments: &[&str]) -> String {
    let mut path = prefix.trim_end_matches('/').to_string();
    for segment in segments {
        path.push('/');
        path.push_str(&encode_path_segment(segment));
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_encodes_each_segment() {
        assert_eq!(endpoint("/api/nav", &["fund", "SX1234"]), "/api/nav/fund/SX1234");
        assert_eq!(
            endpoint("/api/project-holding/", &["Alpha Fund/II", "analysis"]),
            "/api/project-holding/Alpha%20Fund%2FII/analysis"
        );
        assert_eq!(endpoint("/api/strategy", &[]), "/api/strategy");
    }
}
