// SPDX-License-Identifier: MIT

use super::{parse_args, schema_of};
use crate::adk::tool::{Tool, ToolOutput};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

static ANALYZE_CODE_SCHEMA: Lazy<Value> = Lazy::new(schema_of::<AnalyzeCodeArgs>);

/// Languages whose line comments start with `#`
const HASH_COMMENT_LANGUAGES: &[&str] = &["python", "ruby", "shell", "yaml", "toml"];

/// Line prefixes counted as function declarations
const FUNCTION_PREFIXES: &[&str] = &[
    "fn ",
    "pub fn ",
    "async fn ",
    "pub async fn ",
    "def ",
    "func ",
];

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AnalyzeCodeArgs {
    /// The code to analyze
    #[serde(default)]
    pub code: Option<String>,
    /// File to read the code from when `code` is not given
    #[serde(default)]
    pub path: Option<String>,
    /// Programming language of the code
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeAnalysis {
    pub lines: usize,
    pub language: String,
    pub has_comments: bool,
    pub functions: usize,
}

/// Guess a language name from a file extension
pub fn detect_language(path: &str) -> Option<&'static str> {
    let ext = Path::new(path).extension()?.to_str()?;
    let lang = match ext.to_ascii_lowercase().as_str() {
        "rs" => "rust",
        "ts" | "tsx" => "typescript",
        "js" | "jsx" | "mjs" | "cjs" => "javascript",
        "py" => "python",
        "go" => "go",
        "java" => "java",
        "c" | "h" => "c",
        "cc" | "cpp" | "hpp" => "cpp",
        "rb" => "ruby",
        "sh" | "bash" => "shell",
        "yml" | "yaml" => "yaml",
        "toml" => "toml",
        "json" => "json",
        "md" => "markdown",
        _ => return None,
    };
    Some(lang)
}

/// Naive line statistics; no parsing
pub fn analyze(code: &str, language: &str) -> CodeAnalysis {
    let hash_comments = HASH_COMMENT_LANGUAGES.contains(&language);
    let lines: Vec<&str> = code.split('\n').collect();

    let has_comments = lines.iter().any(|line| {
        line.contains("//")
            || line.contains("/*")
            || (hash_comments && line.trim_start().starts_with('#'))
    });

    let functions = lines
        .iter()
        .filter(|line| {
            let t = line.trim_start();
            t.contains("function")
                || t.contains("=>")
                || FUNCTION_PREFIXES.iter().any(|p| t.starts_with(p))
        })
        .count();

    CodeAnalysis {
        lines: lines.len(),
        language: language.to_string(),
        has_comments,
        functions,
    }
}

pub struct AnalyzeCodeTool;

#[async_trait]
impl Tool for AnalyzeCodeTool {
    fn name(&self) -> &str {
        "analyze_code"
    }

    fn description(&self) -> &str {
        "Analyze code structure: line count, language, comment presence and function count"
    }

    fn schema(&self) -> &Value {
        &ANALYZE_CODE_SCHEMA
    }

    async fn execute(&self, args: Value) -> ToolOutput {
        let args: AnalyzeCodeArgs = match parse_args(self.name(), args) {
            Ok(a) => a,
            Err(out) => return out,
        };

        let code = match (&args.code, &args.path) {
            (Some(code), _) => code.clone(),
            (None, Some(path)) => match tokio::fs::read_to_string(path).await {
                Ok(content) => content,
                Err(e) => {
                    return ToolOutput::failure(format!("Error analyzing code: {}: {}", path, e))
                }
            },
            (None, None) => {
                return ToolOutput::failure(
                    "Error analyzing code: either 'code' or 'path' is required",
                )
            }
        };

        let language = args
            .language
            .clone()
            .or_else(|| {
                args.path
                    .as_deref()
                    .and_then(detect_language)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "unknown".to_string());

        match serde_json::to_string_pretty(&analyze(&code, &language)) {
            Ok(json) => ToolOutput::success(json),
            Err(e) => ToolOutput::failure(format!("Error analyzing code: {}", e)),
        }
    }
}
