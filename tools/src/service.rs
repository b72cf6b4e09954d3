//! Tool access service
//!
//! Thin typed wrapper over the `/api/v1/namespaces/{namespace}/tools`
//! endpoints. Each call is one stateless round trip through the injected
//! [`ApiClient`]; errors from the transport are returned unchanged.

use ark_common::{ApiClient, ApiResult};
use tracing::{debug, info, instrument};

use crate::types::{
    build_create_request, build_update_request, NewTool, Tool, ToolDetail, ToolListResponse,
    ToolUpdate,
};

/// Path of the tool collection in `namespace`
pub fn tools_path(namespace: &str) -> String {
    format!("/api/v1/namespaces/{}/tools", namespace)
}

/// Path of a single tool in `namespace`
///
/// Names are inserted as given, without percent-encoding; they are expected
/// to be Kubernetes resource names.
pub fn tool_path(namespace: &str, name: &str) -> String {
    format!("/api/v1/namespaces/{}/tools/{}", namespace, name)
}

/// Client for namespaced tool resources
#[derive(Debug, Clone)]
pub struct ToolsService<C> {
    client: C,
}

impl<C: ApiClient> ToolsService<C> {
    /// Create a service over the given transport
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// The underlying transport
    pub fn client(&self) -> &C {
        &self.client
    }

    /// List all tools in a namespace
    ///
    /// Every returned tool has `id` set to its `name`.
    #[instrument(skip(self))]
    pub async fn get_all(&self, namespace: &str) -> ApiResult<Vec<Tool>> {
        let body = self.client.get(&tools_path(namespace)).await?;
        let response: ToolListResponse = serde_json::from_value(body)?;
        debug!(count = response.items.len(), "listed tools");

        Ok(response
            .items
            .into_iter()
            .map(Tool::with_id_from_name)
            .collect())
    }

    /// Get detailed tool information including its schema
    ///
    /// `tool_name` is not percent-encoded (see [`tool_path`]).
    #[instrument(skip(self))]
    pub async fn get_detail(&self, namespace: &str, tool_name: &str) -> ApiResult<ToolDetail> {
        let body = self.client.get(&tool_path(namespace, tool_name)).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Delete a tool
    ///
    /// `identifier` is not percent-encoded (see [`tool_path`]).
    #[instrument(skip(self))]
    pub async fn delete(&self, namespace: &str, identifier: &str) -> ApiResult<()> {
        self.client.delete(&tool_path(namespace, identifier)).await?;
        info!("tool deleted");
        Ok(())
    }

    /// Create a new tool
    ///
    /// A malformed `inputSchema` string is dropped from the request rather
    /// than failing the call.
    #[instrument(skip(self, tool), fields(name = %tool.name, tool_type = %tool.spec.tool_type))]
    pub async fn create(&self, namespace: &str, tool: NewTool) -> ApiResult<()> {
        let payload = serde_json::to_value(build_create_request(namespace, tool))?;
        self.client.post(&tools_path(namespace), &payload).await?;
        info!("tool created");
        Ok(())
    }

    /// Update labels, annotations and/or spec of an existing tool
    #[instrument(skip(self, changes))]
    pub async fn update(
        &self,
        namespace: &str,
        tool_name: &str,
        changes: ToolUpdate,
    ) -> ApiResult<ToolDetail> {
        let payload = serde_json::to_value(build_update_request(changes))?;
        let body = self
            .client
            .put(&tool_path(namespace, tool_name), &payload)
            .await?;
        info!("tool updated");
        Ok(serde_json::from_value(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_common::{async_trait, ApiError};
    use serde_json::{json, Value};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// A request seen by [`RecordingClient`]
    #[derive(Debug, Clone, PartialEq)]
    struct Recorded {
        method: &'static str,
        path: String,
        body: Option<Value>,
    }

    /// In-memory transport that records requests and replays canned replies
    #[derive(Default)]
    struct RecordingClient {
        requests: Mutex<Vec<Recorded>>,
        replies: Mutex<VecDeque<ApiResult<Value>>>,
    }

    impl RecordingClient {
        fn replying(replies: Vec<ApiResult<Value>>) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                replies: Mutex::new(replies.into()),
            })
        }

        fn requests(&self) -> Vec<Recorded> {
            self.requests.lock().unwrap().clone()
        }

        fn respond(
            &self,
            method: &'static str,
            path: &str,
            body: Option<&Value>,
        ) -> ApiResult<Value> {
            self.requests.lock().unwrap().push(Recorded {
                method,
                path: path.to_string(),
                body: body.cloned(),
            });
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(Value::Null))
        }
    }

    #[async_trait]
    impl ApiClient for RecordingClient {
        async fn get(&self, path: &str) -> ApiResult<Value> {
            self.respond("GET", path, None)
        }

        async fn post(&self, path: &str, body: &Value) -> ApiResult<Value> {
            self.respond("POST", path, Some(body))
        }

        async fn put(&self, path: &str, body: &Value) -> ApiResult<Value> {
            self.respond("PUT", path, Some(body))
        }

        async fn delete(&self, path: &str) -> ApiResult<()> {
            self.respond("DELETE", path, None).map(|_| ())
        }
    }

    #[tokio::test]
    async fn test_get_all_sets_id_from_name() {
        let client = RecordingClient::replying(vec![Ok(json!({
            "items": [
                { "name": "weather", "type": "http" },
                { "id": "ignored", "name": "planner", "type": "agent" }
            ],
            "count": 2
        }))]);
        let service = ToolsService::new(client.clone());

        let tools = service.get_all("team-a").await.unwrap();

        assert_eq!(tools.len(), 2);
        assert!(tools.iter().all(|t| t.id == t.name));
        assert_eq!(tools[0].name, "weather");
        assert_eq!(tools[1].name, "planner");
        assert_eq!(
            client.requests(),
            vec![Recorded {
                method: "GET",
                path: "/api/v1/namespaces/team-a/tools".to_string(),
                body: None,
            }]
        );
    }

    #[tokio::test]
    async fn test_get_detail_returns_response_verbatim() {
        let reply = json!({
            "name": "weather",
            "namespace": "team-a",
            "spec": { "type": "http", "http": { "url": "https://weather.example.com" } }
        });
        let client = RecordingClient::replying(vec![Ok(reply.clone())]);
        let service = ToolsService::new(client.clone());

        let detail = service.get_detail("team-a", "weather").await.unwrap();

        assert_eq!(serde_json::to_value(&detail).unwrap(), reply);
        assert_eq!(
            client.requests()[0].path,
            "/api/v1/namespaces/team-a/tools/weather"
        );
    }

    #[tokio::test]
    async fn test_get_detail_keeps_untyped_spec_verbatim() {
        let reply = json!({
            "name": "legacy",
            "namespace": "team-a",
            "spec": { "description": "no type", "inputSchema": [1] }
        });
        let client = RecordingClient::replying(vec![Ok(reply.clone())]);
        let service = ToolsService::new(client);

        let detail = service.get_detail("team-a", "legacy").await.unwrap();

        assert_eq!(serde_json::to_value(&detail).unwrap(), reply);
    }

    #[tokio::test]
    async fn test_delete_issues_delete() {
        let client = RecordingClient::replying(vec![]);
        let service = ToolsService::new(client.clone());

        service.delete("team-a", "weather").await.unwrap();

        let requests = client.requests();
        assert_eq!(requests[0].method, "DELETE");
        assert_eq!(requests[0].path, "/api/v1/namespaces/team-a/tools/weather");
    }

    #[tokio::test]
    async fn test_create_posts_assembled_payload() {
        let client = RecordingClient::replying(vec![]);
        let service = ToolsService::new(client.clone());

        service
            .create(
                "team-a",
                NewTool::new("weather", "http", "Current weather")
                    .with_input_schema("{bad")
                    .with_url("https://weather.example.com"),
            )
            .await
            .unwrap();

        let requests = client.requests();
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].path, "/api/v1/namespaces/team-a/tools");
        assert_eq!(
            requests[0].body,
            Some(json!({
                "name": "weather",
                "namespace": "team-a",
                "spec": {
                    "type": "http",
                    "description": "Current weather",
                    "http": { "url": "https://weather.example.com" }
                }
            }))
        );
    }

    #[tokio::test]
    async fn test_update_puts_changes_and_decodes_detail() {
        let client = RecordingClient::replying(vec![Ok(json!({
            "name": "weather",
            "namespace": "team-a",
            "annotations": { "owner": "infra" }
        }))]);
        let service = ToolsService::new(client.clone());

        let mut annotations = std::collections::BTreeMap::new();
        annotations.insert("owner".to_string(), "infra".to_string());
        let detail = service
            .update(
                "team-a",
                "weather",
                ToolUpdate {
                    annotations: Some(annotations),
                    ..ToolUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(detail.annotations.unwrap()["owner"], "infra");
        let requests = client.requests();
        assert_eq!(requests[0].method, "PUT");
        assert_eq!(
            requests[0].body,
            Some(json!({ "annotations": { "owner": "infra" } }))
        );
    }

    #[test]
    fn test_tool_path_inserts_names_as_given() {
        assert_eq!(tools_path("team-a"), "/api/v1/namespaces/team-a/tools");
        assert_eq!(
            tool_path("team-a", "a?b"),
            "/api/v1/namespaces/team-a/tools/a?b"
        );
    }

    #[tokio::test]
    async fn test_service_over_borrowed_transport() {
        let client = RecordingClient::replying(vec![Ok(json!({ "items": [] }))]);
        let service = ToolsService::new(&*client);

        let tools = service.get_all("team-a").await.unwrap();

        assert!(tools.is_empty());
        assert_eq!(service.client().requests().len(), 1);
        assert_eq!(
            service.client().requests()[0].path,
            "/api/v1/namespaces/team-a/tools"
        );
    }

    #[tokio::test]
    async fn test_transport_errors_propagate_unchanged() {
        let client = RecordingClient::replying(vec![Err(ApiError::Status {
            status: 503,
            body: "backend unavailable".to_string(),
        })]);
        let service = ToolsService::new(client);

        let err = service.get_all("team-a").await.unwrap_err();

        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "backend unavailable");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unexpected_list_shape_is_json_error() {
        let client = RecordingClient::replying(vec![Ok(json!({ "tools": [] }))]);
        let service = ToolsService::new(client);

        let err = service.get_all("team-a").await.unwrap_err();
        assert!(matches!(err, ApiError::Json(_)));
    }
}
