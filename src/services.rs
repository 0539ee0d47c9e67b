//! Mock range data service.
//!
//! Stands in for the backend that supplies widget bounds: each call waits a
//! fixed delay and then deserializes a canned JSON payload, so the demo
//! exercises the same async initialization path a real endpoint would.

use std::fmt;

use gloo_timers::future::TimeoutFuture;
use serde::Deserialize;

use crate::config::FETCH_DELAY_MS;

/// Bounds payload for a normal-mode range.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct NormalRange {
    pub min: f64,
    pub max: f64,
}

/// Allowed-values payload for a fixed-mode range.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FixedRange {
    #[serde(rename = "rangeValues")]
    pub values: Vec<f64>,
}

#[derive(Debug)]
pub enum ServiceError {
    BadPayload(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::BadPayload(detail) => {
                write!(f, "Malformed range payload: {}", detail)
            }
        }
    }
}

impl std::error::Error for ServiceError {}

const NORMAL_RANGE_JSON: &str = r#"{ "min": 1, "max": 100 }"#;
const FIXED_RANGE_JSON: &str = r#"{ "rangeValues": [1.99, 5.99, 10.99, 30.99, 50.99, 70.99] }"#;

pub async fn fetch_normal_range() -> Result<NormalRange, ServiceError> {
    TimeoutFuture::new(FETCH_DELAY_MS).await;
    serde_json::from_str(NORMAL_RANGE_JSON).map_err(|e| ServiceError::BadPayload(e.to_string()))
}

pub async fn fetch_fixed_range() -> Result<FixedRange, ServiceError> {
    TimeoutFuture::new(FETCH_DELAY_MS).await;
    serde_json::from_str(FIXED_RANGE_JSON).map_err(|e| ServiceError::BadPayload(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_payload_deserializes() {
        let range: NormalRange = serde_json::from_str(NORMAL_RANGE_JSON).unwrap();
        assert_eq!(range, NormalRange { min: 1.0, max: 100.0 });
    }

    #[test]
    fn fixed_payload_deserializes_in_order() {
        let range: FixedRange = serde_json::from_str(FIXED_RANGE_JSON).unwrap();
        assert_eq!(range.values.len(), 6);
        assert_eq!(range.values.first(), Some(&1.99));
        assert_eq!(range.values.last(), Some(&70.99));
    }
}
