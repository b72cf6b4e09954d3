//! Tool creation and update payloads
//!
//! Callers describe a tool loosely with [`NewTool`] / [`ToolUpdate`]; the
//! `build_*` functions assemble the exact JSON bodies the API expects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

/// An input schema as supplied by a caller
///
/// Forms usually hand over the raw text of a JSON editor, while programmatic
/// callers already hold a parsed object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputSchema {
    /// Already-parsed JSON object
    Object(Map<String, Value>),
    /// Unparsed JSON text
    Raw(String),
}

impl InputSchema {
    /// Resolve to a JSON object, discarding anything that is not one
    ///
    /// Blank text resolves to `None`. Malformed text is dropped with a
    /// warning instead of failing the request.
    pub fn resolve(self) -> Option<Map<String, Value>> {
        match self {
            InputSchema::Object(map) => Some(map),
            InputSchema::Raw(text) => parse_input_schema(&text),
        }
    }
}

impl From<String> for InputSchema {
    fn from(text: String) -> Self {
        InputSchema::Raw(text)
    }
}

impl From<&str> for InputSchema {
    fn from(text: &str) -> Self {
        InputSchema::Raw(text.to_string())
    }
}

impl From<Map<String, Value>> for InputSchema {
    fn from(map: Map<String, Value>) -> Self {
        InputSchema::Object(map)
    }
}

/// Parse schema text, returning `None` for blank, malformed or non-object input
pub fn parse_input_schema(text: &str) -> Option<Map<String, Value>> {
    if text.trim().is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        Ok(other) => {
            warn!(value = %other, "discarding inputSchema that is not a JSON object");
            None
        }
        Err(e) => {
            warn!(error = %e, "discarding malformed inputSchema");
            None
        }
    }
}

/// Type-specific tool settings as supplied by a caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSpecInput {
    /// Tool type ("http", "agent", ...)
    #[serde(rename = "type")]
    pub tool_type: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<InputSchema>,

    /// Endpoint URL, used only when `tool_type` is "http"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Target agent name, used only when `tool_type` is "agent"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
}

impl ToolSpecInput {
    /// Assemble the wire spec
    ///
    /// `http` is emitted only for "http" tools with a non-empty URL, and
    /// `agent` only for "agent" tools with a non-empty agent name.
    pub fn into_spec(self) -> ToolSpec {
        let input_schema = self.input_schema.and_then(InputSchema::resolve);

        let http = match self.url {
            Some(url) if self.tool_type == "http" && !url.is_empty() => Some(HttpTarget { url }),
            _ => None,
        };
        let agent = match self.agent {
            Some(name) if self.tool_type == "agent" && !name.is_empty() => {
                Some(AgentRef { name })
            }
            _ => None,
        };

        ToolSpec {
            tool_type: self.tool_type,
            description: self.description,
            input_schema,
            http,
            agent,
        }
    }
}

/// A tool to create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTool {
    pub name: String,

    #[serde(flatten)]
    pub spec: ToolSpecInput,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
}

impl NewTool {
    pub fn new(
        name: impl Into<String>,
        tool_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            spec: ToolSpecInput {
                tool_type: tool_type.into(),
                description: description.into(),
                ..ToolSpecInput::default()
            },
            annotations: None,
            labels: None,
        }
    }

    pub fn with_input_schema(mut self, schema: impl Into<InputSchema>) -> Self {
        self.spec.input_schema = Some(schema.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.spec.url = Some(url.into());
        self
    }

    pub fn with_agent(mut self, agent: impl Into<String>) -> Self {
        self.spec.agent = Some(agent.into());
        self
    }

    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Changes to apply to an existing tool
///
/// Fields left as `None` are not sent and stay as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,

    /// Replacement spec; the whole spec is replaced, not merged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<ToolSpecInput>,
}

/// HTTP endpoint of an "http" tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpTarget {
    pub url: String,
}

/// Agent reference of an "agent" tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRef {
    pub name: String,
}

/// Tool spec as sent to the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSpec {
    #[serde(rename = "type")]
    pub tool_type: String,

    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpTarget>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<AgentRef>,
}

/// Body of `POST /api/v1/namespaces/{namespace}/tools`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateToolRequest {
    pub name: String,
    pub namespace: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,

    pub spec: ToolSpec,
}

/// Body of `PUT /api/v1/namespaces/{namespace}/tools/{name}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateToolRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<ToolSpec>,
}

/// Build the creation body for `tool` in `namespace`
pub fn build_create_request(namespace: &str, tool: NewTool) -> CreateToolRequest {
    CreateToolRequest {
        name: tool.name,
        namespace: namespace.to_string(),
        annotations: tool.annotations,
        labels: tool.labels,
        spec: tool.spec.into_spec(),
    }
}

/// Build the update body for `changes`
pub fn build_update_request(changes: ToolUpdate) -> UpdateToolRequest {
    UpdateToolRequest {
        labels: changes.labels,
        annotations: changes.annotations,
        spec: changes.spec.map(ToolSpecInput::into_spec),
    }
}
