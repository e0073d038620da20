//! Request types for the endpoint catalog
//!
//! Responses are returned as `serde_json::Value`; the backend's envelopes
//! differ from endpoint to endpoint. Requests are typed.

pub use bodies::*;
pub use params::*;

pub mod bodies;
pub mod params;
