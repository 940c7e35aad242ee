// SPDX-License-Identifier: MIT

//! Pre-built workflows for common coding tasks

use super::types::{NodeType, Workflow, WorkflowEdge, WorkflowNode, END};
use serde_json::json;

const PRESET_MODEL: &str = "claude-3-5-sonnet-20241022";

fn llm(id: &str, name: &str, system_prompt: &str) -> WorkflowNode {
    WorkflowNode::new(id, name, NodeType::Llm).with_config(json!({
        "systemPrompt": system_prompt,
        "model": PRESET_MODEL
    }))
}

fn tool(id: &str, name: &str, tool_name: &str) -> WorkflowNode {
    WorkflowNode::new(id, name, NodeType::Tool).with_config(json!({ "toolName": tool_name }))
}

/// Chain nodes in order and end after the last
fn linear(mut workflow: Workflow, nodes: Vec<WorkflowNode>) -> Workflow {
    if let Some(first) = nodes.first() {
        workflow.entry_point = first.id.clone();
    }

    let ids: Vec<String> = nodes.iter().map(|n| n.id.clone()).collect();
    for (i, source) in ids.iter().enumerate() {
        let target = ids.get(i + 1).map(String::as_str).unwrap_or(END);
        workflow = workflow.with_edge(WorkflowEdge::new(format!("e{}", i + 1), source, target));
    }

    workflow.nodes = nodes;
    workflow
}

/// Single LLM turn
pub fn simple_code_assistant() -> Workflow {
    linear(
        Workflow::new("simple-code-assistant", "Simple Code Assistant")
            .with_description("A single-step workflow for code assistance"),
        vec![llm(
            "understand",
            "Understand Request",
            "You are a helpful code assistant. Analyze the user request and provide helpful guidance.",
        )],
    )
}

/// Read the current file, then review it
pub fn file_analysis() -> Workflow {
    linear(
        Workflow::new("file-analysis", "File Analysis")
            .with_description("Analyze the current file and provide insights"),
        vec![
            tool("read", "Read File", "read_file"),
            llm(
                "analyze",
                "Analyze Content",
                "Analyze the file content and provide insights about code structure, potential improvements, and best practices.",
            ),
        ],
    )
}

pub fn refactoring_assistant() -> Workflow {
    linear(
        Workflow::new("refactoring-assistant", "Refactoring Assistant")
            .with_description("Help refactor code with best practices"),
        vec![
            llm(
                "understand",
                "Understand Code",
                "Analyze the user's refactoring request and plan the approach.",
            ),
            llm(
                "suggest",
                "Suggest Refactoring",
                "Based on the analysis, provide specific refactoring suggestions with code examples.",
            ),
        ],
    )
}

pub fn documentation_generator() -> Workflow {
    linear(
        Workflow::new("documentation-generator", "Documentation Generator")
            .with_description("Generate documentation for code"),
        vec![
            tool("analyze_code", "Analyze Code Structure", "analyze_code"),
            llm(
                "generate_docs",
                "Generate Documentation",
                "Generate comprehensive documentation for the analyzed code, including function descriptions, parameters, return values, and usage examples.",
            ),
        ],
    )
}

/// Plan, analyze, answer
pub fn code_assistant() -> Workflow {
    linear(
        Workflow::new("code-assistant", "Code Assistant")
            .with_description("A workflow for assisting with code-related tasks"),
        vec![
            llm(
                "understand",
                "Understand Request",
                "You are a helpful code assistant. Understand what the user wants and plan the approach.",
            ),
            tool("analyze", "Analyze Code", "analyze_code"),
            llm(
                "generate",
                "Generate Response",
                "Based on the analysis, provide a helpful response to the user.",
            ),
        ],
    )
}

/// Every preset, in display order
pub fn all() -> Vec<Workflow> {
    vec![
        simple_code_assistant(),
        file_analysis(),
        refactoring_assistant(),
        documentation_generator(),
        code_assistant(),
    ]
}

pub fn by_id(id: &str) -> Option<Workflow> {
    all().into_iter().find(|w| w.id == id)
}
