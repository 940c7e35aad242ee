//! Integration tests for workflow loading and execution
//!
//! These tests drive complete workflows through the engine using mock
//! models and tools, plus the real built-in file tools against temp dirs.

use async_trait::async_trait;
use codeflow_rs::adk::error::ModelError;
use codeflow_rs::adk::model::{Model, ModelRequest, ModelResponse, TurnRole};
use codeflow_rs::adk::tool::{Tool, ToolOutput};
use codeflow_rs::codeflow::config::ProviderSettings;
use codeflow_rs::codeflow::workflow::state::{
    Message, Role, LAST_TOOL_RESULT, LAST_TOOL_SUCCEEDED,
};
use codeflow_rs::codeflow::workflow::{
    presets, AgentState, GraphExecutionResult, NodeType, ToolRegistry, Workflow, WorkflowEdge,
    WorkflowEngine, WorkflowLoader, WorkflowNode, END,
};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

// ============================================================================
// Mock Components
// ============================================================================

/// Mock model that returns predefined replies and records every request
struct MockModel {
    replies: Vec<String>,
    requests: Mutex<Vec<ModelRequest>>,
}

impl MockModel {
    fn new(replies: &[&str]) -> Self {
        Self {
            replies: replies.iter().map(|r| r.to_string()).collect(),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Model for MockModel {
    async fn generate(&self, request: &ModelRequest) -> Result<ModelResponse, ModelError> {
        let mut requests = self.requests.lock().unwrap();
        let idx = requests.len();
        requests.push(request.clone());
        let text = self
            .replies
            .get(idx)
            .cloned()
            .unwrap_or_else(|| "Max responses reached".to_string());
        Ok(ModelResponse {
            text,
            stop_reason: Some("end_turn".to_string()),
        })
    }
}

/// Model whose provider always rejects the call
struct RateLimitedModel;

#[async_trait]
impl Model for RateLimitedModel {
    async fn generate(&self, _request: &ModelRequest) -> Result<ModelResponse, ModelError> {
        Err(ModelError::Status {
            provider: "Anthropic".to_string(),
            status: 429,
            message: "rate limited".to_string(),
        })
    }
}

/// Static schema for MockTool
static MOCK_TOOL_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "path": {"type": "string"}
        }
    })
});

/// Mock tool that returns a predefined output and records its args
struct MockTool {
    name: String,
    description: String,
    output: ToolOutput,
    calls: Mutex<Vec<Value>>,
}

impl MockTool {
    fn new(name: &str, output: ToolOutput) -> Self {
        Self {
            name: name.to_string(),
            description: format!("Mock tool: {}", name),
            output,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<Value> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Tool for MockTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn schema(&self) -> &Value {
        &MOCK_TOOL_SCHEMA
    }

    async fn execute(&self, args: Value) -> ToolOutput {
        self.calls.lock().unwrap().push(args);
        self.output.clone()
    }
}

fn llm(id: &str, prompt: &str) -> WorkflowNode {
    WorkflowNode::new(id, id, NodeType::Llm).with_config(json!({ "systemPrompt": prompt }))
}

fn tool(id: &str, tool_name: &str) -> WorkflowNode {
    WorkflowNode::new(id, id, NodeType::Tool).with_config(json!({ "toolName": tool_name }))
}

fn step_ids(result: &GraphExecutionResult) -> Vec<&str> {
    result.steps.iter().map(|s| s.node_id.as_str()).collect()
}

// ============================================================================
// Tool workflows
// ============================================================================

#[tokio::test]
async fn test_single_tool_node_with_mock_capability() {
    let listing = r#"[{"name":"a.txt","isDirectory":false}]"#;
    let mock = Arc::new(MockTool::new("list_directory", ToolOutput::success(listing)));
    let registry = ToolRegistry::new();
    registry.register(mock.clone()).await;

    let workflow = Workflow::new("list", "List")
        .with_node(
            WorkflowNode::new("n1", "List", NodeType::Tool)
                .with_config(json!({"toolName": "list_directory", "args": {"path": "/proj"}})),
        )
        .with_edge(WorkflowEdge::new("e1", "n1", END))
        .with_entry_point("n1");

    let engine = WorkflowEngine::new(Arc::new(MockModel::new(&[])), registry);
    let initial = AgentState::new().with_project_path("/proj");
    let result = engine.execute_workflow(&workflow, initial).await;

    assert!(result.success, "{:?}", result.error);
    assert_eq!(result.steps.len(), 1);
    let output = result.output.unwrap();
    assert_eq!(output.messages, vec![Message::tool(listing)]);
    assert_eq!(output.context[LAST_TOOL_SUCCEEDED], true);
    assert_eq!(mock.calls(), vec![json!({"path": "/proj"})]);
}

#[tokio::test]
async fn test_read_file_resolves_current_file_against_project() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("main.rs"), "fn main() {}\n").unwrap();

    let workflow = Workflow::new("read", "Read")
        .with_node(tool("read", "read_file"))
        .with_entry_point("read");

    let engine = WorkflowEngine::new(
        Arc::new(MockModel::new(&[])),
        ToolRegistry::with_builtins(),
    );
    let initial = AgentState::new()
        .with_project_path(dir.path().to_string_lossy())
        .with_current_file("main.rs");
    let result = engine.execute_workflow(&workflow, initial).await;

    assert!(result.success);
    assert_eq!(result.final_reply(), Some("fn main() {}\n"));
}

#[tokio::test]
async fn test_read_file_with_explicit_path_records_content() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("notes.md");
    std::fs::write(&file, "# Notes\nship it\n").unwrap();
    let path = file.to_string_lossy().to_string();

    let workflow = Workflow::new("read", "Read")
        .with_node(
            WorkflowNode::new("read", "Read", NodeType::Tool)
                .with_config(json!({"toolName": "read_file", "args": {"path": path}})),
        )
        .with_edge(WorkflowEdge::new("e1", "read", END))
        .with_entry_point("read");

    let engine = WorkflowEngine::new(
        Arc::new(MockModel::new(&[])),
        ToolRegistry::with_builtins(),
    );
    // current_file must not override the explicit path
    let initial = AgentState::new().with_current_file("elsewhere.md");
    let result = engine.execute_workflow(&workflow, initial).await;

    assert!(result.success, "{:?}", result.error);
    let output = result.output.unwrap();
    assert_eq!(output.messages, vec![Message::tool("# Notes\nship it\n")]);
    assert_eq!(output.context[LAST_TOOL_RESULT], "# Notes\nship it\n");
    assert_eq!(output.context[LAST_TOOL_SUCCEEDED], true);
}

#[tokio::test]
async fn test_tool_only_workflow_runs_without_provider_keys() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), "a").unwrap();

    let workflow = Workflow::new("w", "w")
        .with_node(
            WorkflowNode::new("ls", "List", NodeType::Tool).with_config(json!({
                "toolName": "list_directory",
                "args": {"path": dir.path().to_string_lossy()}
            })),
        )
        .with_node(WorkflowNode::new("review", "Review", NodeType::Human))
        .with_node(llm("answer", "Answer."))
        .with_edge(WorkflowEdge::new("e1", "ls", "review"))
        .with_entry_point("ls");

    let model = ProviderSettings::default().build_model().unwrap();
    let engine = WorkflowEngine::new(model.clone(), ToolRegistry::with_builtins());
    let result = engine.execute_workflow(&workflow, AgentState::new()).await;

    assert!(result.success, "{:?}", result.error);
    assert_eq!(step_ids(&result), vec!["ls", "review"]);
    assert!(result.final_reply().unwrap().contains("a.txt"));

    // reaching an llm node is what needs a credential
    let with_llm = workflow.with_edge(WorkflowEdge::new("e2", "review", "answer"));
    let engine = WorkflowEngine::new(model, ToolRegistry::with_builtins());
    let result = engine.execute_workflow(&with_llm, AgentState::new()).await;

    assert!(!result.success);
    assert!(result.error.as_deref().unwrap().contains("API key not configured"));
    assert_eq!(step_ids(&result), vec!["ls", "review"]);
}

#[tokio::test]
async fn test_null_config_values_run_with_defaults() {
    let workflow = Workflow::new("w", "w")
        .with_node(WorkflowNode::new("gate", "Gate", NodeType::Conditional).with_config(
            json!({"condition": ""}),
        ))
        .with_node(WorkflowNode::new("ask", "Ask", NodeType::Llm).with_config(json!({
            "systemPrompt": "",
            "model": "",
            "temperature": null
        })))
        .with_edge(WorkflowEdge::new("e1", "gate", "ask"))
        .with_entry_point("gate");

    let model = Arc::new(MockModel::new(&["ok"]));
    let engine = WorkflowEngine::new(model.clone(), ToolRegistry::new());
    let result = engine
        .execute_workflow(&workflow, AgentState::new().with_message(Message::user("q")))
        .await;

    assert!(result.success, "{:?}", result.error);
    assert_eq!(result.steps[0].output.next_action, None);

    let request = &model.requests()[0];
    assert_eq!(request.model, "claude-3-5-sonnet-20241022");
    assert_eq!(request.system.as_deref(), Some("You are a helpful assistant."));
    assert_eq!(request.config.temperature, Some(0.7));
}

#[tokio::test]
async fn test_missing_tool_aborts_run() {
    let workflow = Workflow::new("w", "w")
        .with_node(tool("t", "deploy"))
        .with_entry_point("t");

    let engine = WorkflowEngine::new(Arc::new(MockModel::new(&[])), ToolRegistry::new());
    let result = engine.execute_workflow(&workflow, AgentState::new()).await;

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("Tool not found: deploy"));
    assert!(result.steps.is_empty());
}

// ============================================================================
// Branching
// ============================================================================

/// read → check(has_error) → summarize | report
fn review_workflow() -> Workflow {
    Workflow::new("review", "Review")
        .with_node(tool("read", "read_file"))
        .with_node(
            WorkflowNode::new("check", "Check", NodeType::Conditional)
                .with_config(json!({"condition": "has_error"})),
        )
        .with_node(llm("summarize", "Summarize the file."))
        .with_node(llm("report", "Explain the failure."))
        .with_edge(WorkflowEdge::new("e1", "read", "check"))
        .with_edge(WorkflowEdge::new("e2", "check", "report").when("error"))
        .with_edge(WorkflowEdge::new("e3", "check", "summarize").when("success"))
        .with_edge(WorkflowEdge::new("e4", "summarize", END))
        .with_edge(WorkflowEdge::new("e5", "report", END))
        .with_entry_point("read")
}

#[tokio::test]
async fn test_has_error_takes_success_branch() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("lib.rs");
    std::fs::write(&file, "pub fn add() {}").unwrap();

    let model = Arc::new(MockModel::new(&["Looks fine."]));
    let engine = WorkflowEngine::new(model.clone(), ToolRegistry::with_builtins());
    let initial = AgentState::new()
        .with_message(Message::user("review this"))
        .with_current_file(file.to_string_lossy());

    let result = engine.execute_workflow(&review_workflow(), initial).await;

    assert!(result.success);
    assert_eq!(step_ids(&result), vec!["read", "check", "summarize"]);
    assert_eq!(result.final_reply(), Some("Looks fine."));

    let requests = model.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].system.as_deref(), Some("Summarize the file."));
    // tool output goes back to the provider as a user turn
    let last = requests[0].messages.last().unwrap();
    assert_eq!(last.role, TurnRole::User);
    assert_eq!(last.content, "pub fn add() {}");
}

#[tokio::test]
async fn test_has_error_takes_error_branch() {
    let engine = WorkflowEngine::new(
        Arc::new(MockModel::new(&["The file is missing."])),
        ToolRegistry::with_builtins(),
    );
    let initial = AgentState::new().with_current_file("/nonexistent/lib.rs");

    let result = engine.execute_workflow(&review_workflow(), initial).await;

    assert!(result.success);
    assert_eq!(step_ids(&result), vec!["read", "check", "report"]);
    let output = result.output.unwrap();
    assert_eq!(output.next_action.as_deref(), Some("error"));
    assert!(output.messages[0].content.starts_with("Error reading file"));
}

#[tokio::test]
async fn test_has_file_routes_both_ways() {
    let workflow = Workflow::new("w", "w")
        .with_node(
            WorkflowNode::new("check", "Check", NodeType::Conditional)
                .with_config(json!({"condition": "has_file"})),
        )
        .with_node(WorkflowNode::new("ask", "Ask", NodeType::Human))
        .with_node(WorkflowNode::new("open", "Open", NodeType::Human))
        .with_edge(WorkflowEdge::new("e1", "check", "open").when("with_file"))
        .with_edge(WorkflowEdge::new("e2", "check", "ask").when("no_file"))
        .with_entry_point("check");
    let engine = WorkflowEngine::new(Arc::new(MockModel::new(&[])), ToolRegistry::new());

    let with_file = engine
        .execute_workflow(&workflow, AgentState::new().with_current_file("a.rs"))
        .await;
    let without = engine.execute_workflow(&workflow, AgentState::new()).await;

    assert_eq!(step_ids(&with_file), vec!["check", "open"]);
    assert_eq!(step_ids(&without), vec!["check", "ask"]);
}

// ============================================================================
// Failure handling
// ============================================================================

#[tokio::test]
async fn test_model_status_error_is_reported() {
    let workflow = Workflow::new("w", "w")
        .with_node(WorkflowNode::new("greet", "Greet", NodeType::Human))
        .with_node(llm("answer", "Answer."))
        .with_edge(WorkflowEdge::new("e1", "greet", "answer"))
        .with_entry_point("greet");

    let engine = WorkflowEngine::new(Arc::new(RateLimitedModel), ToolRegistry::new());
    let result = engine
        .execute_workflow(&workflow, AgentState::new().with_message(Message::user("hi")))
        .await;

    assert!(!result.success);
    assert!(result.output.is_none());
    let error = result.error.as_deref().unwrap();
    assert!(error.contains("429"), "{}", error);
    assert!(error.contains("rate limited"));
    assert_eq!(step_ids(&result), vec!["greet"]);
}

#[tokio::test]
async fn test_dangling_edge_is_node_not_found() {
    let workflow = Workflow::new("w", "w")
        .with_node(WorkflowNode::new("a", "A", NodeType::Human))
        .with_edge(WorkflowEdge::new("e1", "a", "ghost"))
        .with_entry_point("a");

    let engine = WorkflowEngine::new(Arc::new(MockModel::new(&[])), ToolRegistry::new());
    let result = engine.execute_workflow(&workflow, AgentState::new()).await;

    assert_eq!(result.error.as_deref(), Some("Node not found: ghost"));
    assert_eq!(step_ids(&result), vec!["a"]);
}

// ============================================================================
// Loader, presets, concurrency
// ============================================================================

#[tokio::test]
async fn test_loaded_yaml_workflow_runs() {
    let yaml = r#"
id: chat
name: Chat
entryPoint: plan
nodes:
  - id: plan
    name: Plan
    type: llm
    config:
      systemPrompt: "Plan the answer."
      temperature: 0
  - id: answer
    name: Answer
    type: llm
edges:
  - { id: e1, source: plan, target: answer }
  - { id: e2, source: answer, target: END }
"#;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat.yaml");
    std::fs::write(&path, yaml).unwrap();
    let workflow = WorkflowLoader::new().load_workflow(&path).unwrap();

    let model = Arc::new(MockModel::new(&["plan", "answer"]));
    let engine = WorkflowEngine::new(model.clone(), ToolRegistry::new());
    let result = engine
        .execute_workflow(&workflow, AgentState::new().with_message(Message::user("q")))
        .await;

    assert!(result.success);
    let roles: Vec<Role> = result.output.as_ref().unwrap().messages.iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::User, Role::Assistant, Role::Assistant]);

    let requests = model.requests();
    assert_eq!(requests[0].config.temperature, Some(0.0));
    assert_eq!(requests[1].system.as_deref(), Some("You are a helpful assistant."));
    assert_eq!(requests[1].messages.len(), 2);
}

#[tokio::test]
async fn test_file_analysis_preset() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("util.py"), "# helpers\ndef f():\n    pass\n").unwrap();

    let model = Arc::new(MockModel::new(&["Small helper module."]));
    let engine = WorkflowEngine::new(model.clone(), ToolRegistry::with_builtins());
    let initial = AgentState::new()
        .with_message(Message::user("what does this do?"))
        .with_project_path(dir.path().to_string_lossy())
        .with_current_file("util.py");

    let result = engine
        .execute_workflow(&presets::file_analysis(), initial)
        .await;

    assert!(result.success, "{:?}", result.error);
    assert_eq!(step_ids(&result), vec!["read", "analyze"]);
    assert_eq!(result.final_reply(), Some("Small helper module."));
    assert_eq!(model.requests()[0].model, "claude-3-5-sonnet-20241022");
}

#[tokio::test]
async fn test_concurrent_runs_share_one_engine() {
    let workflow = Workflow::new("w", "w")
        .with_node(llm("only", "Reply."))
        .with_entry_point("only");
    let engine = WorkflowEngine::new(
        Arc::new(MockModel::new(&["r1", "r2", "r3", "r4"])),
        ToolRegistry::new(),
    );

    let runs = (0..4).map(|i| {
        engine.execute_workflow(
            &workflow,
            AgentState::new().with_message(Message::user(format!("q{}", i))),
        )
    });
    let results = futures::future::join_all(runs).await;

    let mut run_ids: Vec<&str> = results.iter().map(|r| r.run_id.as_str()).collect();
    run_ids.sort();
    run_ids.dedup();
    assert_eq!(run_ids.len(), 4);

    for result in &results {
        assert!(result.success);
        let messages = &result.output.as_ref().unwrap().messages;
        assert_eq!(messages.len(), 2);
        assert!(messages[0].content.starts_with('q'));
        assert!(messages[1].content.starts_with('r'));
    }
}
