//! Capability-to-tool adaptation.
//!
//! Turns each agent [`Capability`] into an rmcp tool route: the descriptor
//! carries the capability's name, documentation, and parameter schema
//! verbatim, and the invocation thunk converts every per-call failure
//! (error return or panic) into a textual tool result. The thunk never
//! surfaces a protocol-level fault; only bind-time adaptation problems are
//! hard errors.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use futures::FutureExt;
use rmcp::ErrorData as McpError;
use rmcp::handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter};
use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use tracing::{error, info, warn};

use crate::agent::{Agent, Capability};

use super::error::{Error, Result};

/// Adapt one capability into a tool route.
///
/// Fails only when the capability is malformed (empty name); all later
/// per-call failures are absorbed by the route's thunk.
pub fn make_tool<S>(capability: Arc<dyn Capability>) -> Result<ToolRoute<S>>
where
    S: Send + Sync + 'static,
{
    let name = capability.name();
    if name.is_empty() {
        return Err(Error::adaptation("capability has an empty name"));
    }

    let tool = Tool {
        name: name.to_string().into(),
        description: Some(capability.description().to_string().into()),
        input_schema: capability.input_schema(),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    };

    Ok(ToolRoute::new_dyn(tool, move |ctx: ToolCallContext<'_, S>| {
        let capability = capability.clone();
        let args = ctx.arguments.clone().unwrap_or_default();
        async move { Ok::<_, McpError>(invoke(&*capability, args)) }.boxed()
    }))
}

/// The invocation thunk: run the capability synchronously and always
/// produce a tool result.
fn invoke(capability: &dyn Capability, args: JsonObject) -> CallToolResult {
    let name = capability.name();
    info!("Invoking capability: {}", name);

    match catch_unwind(AssertUnwindSafe(|| capability.apply(args))) {
        Ok(Ok(text)) => CallToolResult::success(vec![Content::text(text)]),
        Ok(Err(e)) => {
            warn!("Capability '{}' failed: {}", name, e);
            CallToolResult::error(vec![Content::text(format!("Error executing {name}: {e}"))])
        }
        Err(panic) => {
            let msg = panic
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            error!("Capability '{}' panicked: {}", name, msg);
            CallToolResult::error(vec![Content::text(format!(
                "Error executing {name}: capability panicked: {msg}"
            ))])
        }
    }
}

/// Build the tool router from an agent's capability set.
///
/// Router keys are capability names; binding a second capability under an
/// existing name replaces the prior route.
pub fn build_tool_router<S>(agent: &Agent) -> Result<ToolRouter<S>>
where
    S: Send + Sync + 'static,
{
    let mut router = ToolRouter::new();
    for capability in agent.capabilities().values() {
        router = router.with_route(make_tool(capability.clone())?);
    }
    Ok(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::CapabilityError;
    use rmcp::model::RawContent;

    struct TestServer {}

    fn object_schema() -> Arc<JsonObject> {
        Arc::new(
            serde_json::json!({ "type": "object", "properties": {} })
                .as_object()
                .unwrap()
                .clone(),
        )
    }

    struct StaticCapability {
        name: &'static str,
        description: &'static str,
        outcome: fn(JsonObject) -> std::result::Result<String, CapabilityError>,
    }

    impl Capability for StaticCapability {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            self.description
        }

        fn input_schema(&self) -> Arc<JsonObject> {
            object_schema()
        }

        fn apply(&self, args: JsonObject) -> std::result::Result<String, CapabilityError> {
            (self.outcome)(args)
        }
    }

    fn result_text(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_descriptor_carries_name_and_description() {
        let capability = Arc::new(StaticCapability {
            name: "echo",
            description: "Echoes nothing.",
            outcome: |_| Ok("done".to_string()),
        });

        let route: ToolRoute<TestServer> = make_tool(capability).unwrap();
        let router = ToolRouter::new().with_route(route);
        let tools = router.list_all();

        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name.as_ref(), "echo");
        assert_eq!(tools[0].description.as_deref(), Some("Echoes nothing."));
    }

    #[test]
    fn test_empty_description_kept_verbatim() {
        let capability = Arc::new(StaticCapability {
            name: "undocumented",
            description: "",
            outcome: |_| Ok(String::new()),
        });

        let route: ToolRoute<TestServer> = make_tool(capability).unwrap();
        let router = ToolRouter::new().with_route(route);
        assert_eq!(router.list_all()[0].description.as_deref(), Some(""));
    }

    #[test]
    fn test_empty_name_is_adaptation_error() {
        let capability = Arc::new(StaticCapability {
            name: "",
            description: "broken",
            outcome: |_| Ok(String::new()),
        });

        let result: Result<ToolRoute<TestServer>> = make_tool(capability);
        assert!(matches!(result, Err(Error::Adaptation(_))));
    }

    #[test]
    fn test_thunk_success_payload() {
        let capability = StaticCapability {
            name: "ok",
            description: "",
            outcome: |_| Ok("payload".to_string()),
        };

        let result = invoke(&capability, JsonObject::new());
        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(result_text(&result), "payload");
    }

    #[test]
    fn test_thunk_absorbs_capability_error() {
        let capability = StaticCapability {
            name: "failing",
            description: "",
            outcome: |_| Err(CapabilityError::execution_failed("disk on fire")),
        };

        let result = invoke(&capability, JsonObject::new());
        assert!(result.is_error.unwrap_or(false));
        let text = result_text(&result);
        assert!(text.contains("failing"));
        assert!(text.contains("disk on fire"));
    }

    #[test]
    fn test_thunk_absorbs_panic() {
        let capability = StaticCapability {
            name: "panicking",
            description: "",
            outcome: |_| panic!("boom"),
        };

        let result = invoke(&capability, JsonObject::new());
        assert!(result.is_error.unwrap_or(false));
        assert!(result_text(&result).contains("boom"));
    }

    #[test]
    fn test_duplicate_names_last_write_wins() {
        let first = Arc::new(StaticCapability {
            name: "dup",
            description: "first",
            outcome: |_| Ok(String::new()),
        });
        let second = Arc::new(StaticCapability {
            name: "dup",
            description: "second",
            outcome: |_| Ok(String::new()),
        });

        let router: ToolRouter<TestServer> = ToolRouter::new()
            .with_route(make_tool(first).unwrap())
            .with_route(make_tool(second).unwrap());

        let tools = router.list_all();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].description.as_deref(), Some("second"));
    }

    #[test]
    fn test_router_built_from_agent() {
        use std::fs;
        use tempfile::TempDir;

        let temp_dir = TempDir::new().unwrap();
        let project_file = temp_dir.path().join("proj.yml");
        fs::write(&project_file, "language: rust\n").unwrap();

        let agent = Agent::new(&project_file, false).unwrap();
        let router: ToolRouter<TestServer> = build_tool_router(&agent).unwrap();
        let tools = router.list_all();

        assert_eq!(tools.len(), 3);
        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"read_file"));
        assert!(names.contains(&"list_dir"));
        assert!(names.contains(&"search_for_pattern"));
    }
}
