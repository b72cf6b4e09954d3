//! Tool type definitions
//!
//! Structs representing tool data as returned by the Ark API.
//! These mirror the JSON structure of `/api/v1/namespaces/{namespace}/tools`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A tool as shown in listings
///
/// `id` is not sent by the API; [`crate::ToolsService::get_all`] fills it
/// from `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// Identifier used by the UI (always equal to `name` once listed)
    #[serde(default)]
    pub id: String,

    /// Tool name, unique within its namespace
    pub name: String,

    /// Namespace the tool lives in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Tool type (e.g. "http", "agent", "mcp")
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub tool_type: Option<String>,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Resource annotations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,

    /// Resource labels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
}

impl Tool {
    /// Set `id` to mirror `name`
    pub fn with_id_from_name(mut self) -> Self {
        self.id = self.name.clone();
        self
    }
}

/// Response of the tool listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolListResponse {
    /// Tools in the namespace, in API order
    pub items: Vec<Tool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,

    /// Count as emitted by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl ToolListResponse {
    /// Number of tools, preferring `count` over `total`
    pub fn count(&self) -> u64 {
        self.count.or(self.total).unwrap_or(0)
    }
}

/// Detailed view of a single tool, including its schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDetail {
    pub name: String,

    #[serde(default)]
    pub namespace: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<ToolDetailSpec>,

    /// Controller-reported status, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Map<String, Value>>,
}

/// Spec section of a [`ToolDetail`]
///
/// Only `type` and `inputSchema` are named; every other key (`http`,
/// `agent`, `description`, ...) is kept verbatim in `extra`. Nothing is
/// added on re-serialization, so a detail round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDetailSpec {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub tool_type: Option<String>,

    /// Input schema as sent; normally an object, but not guaranteed
    #[serde(
        rename = "inputSchema",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub input_schema: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ToolDetailSpec {
    /// Input schema, when it is a JSON object
    pub fn input_schema_object(&self) -> Option<&Map<String, Value>> {
        self.input_schema.as_ref()?.as_object()
    }

    /// Endpoint URL of an HTTP tool, if present
    pub fn http_url(&self) -> Option<&str> {
        self.extra.get("http")?.get("url")?.as_str()
    }

    /// Target agent name of an agent tool, if present
    pub fn agent_name(&self) -> Option<&str> {
        self.extra.get("agent")?.get("name")?.as_str()
    }
}
