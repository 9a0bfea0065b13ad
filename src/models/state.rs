//! The org-chart aggregate record and its request/response shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The single aggregate record holding the entire org-chart state.
///
/// Exactly one logical instance exists per deployment. The employee and
/// training-topic lists are opaque client-defined JSON. The store owns
/// `last_updated`; values supplied by callers are ignored on write.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgChartState {
    pub employees: Vec<Value>,
    pub custom_training_topics: Vec<Value>,
    pub available_training_topics: Vec<Value>,
    #[serde(default)]
    pub last_updated: String,
}

/// Request body for the full-state replace endpoint.
///
/// `employees` stays a raw `Value` so the handler can reject a missing or
/// non-array field with a 400 instead of a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceStateRequest {
    #[serde(default)]
    pub employees: Option<Value>,
    #[serde(default)]
    pub custom_training_topics: Vec<Value>,
    #[serde(default)]
    pub available_training_topics: Vec<Value>,
}

/// Response body for `GET /api/employees`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateResponse {
    pub employees: Vec<Value>,
    pub custom_training_topics: Vec<Value>,
    pub available_training_topics: Vec<Value>,
}

/// Response body for a successful full-state replace.
#[derive(Debug, Clone, Serialize)]
pub struct SaveResponse {
    pub message: String,
}

/// Response body for a successful photo upload.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoResponse {
    pub photo: String,
}
