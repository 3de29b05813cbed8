//! Tool call scanner
//!
//! Agents trigger tools by writing calls in plain text:
//!
//! ```text
//! call     := toolName "(" [ "'" argument "'" ] ")"
//! argument := any characters except a single quote
//! ```
//!
//! Each registered name is searched independently, once for the quoted form
//! and once for the bare form, and the executor runs one handler per
//! occurrence in order of position. A call written inside another call's
//! argument is therefore its own occurrence. Calls that do not fit the
//! grammar exactly (unknown names, unbalanced quotes) are ignored.

use crate::tools::registry::ToolRegistry;
use crate::tools::types::{ToolContext, ToolExecution};
use regex::Regex;
use std::ops::Range;
use std::time::Instant;

/// A tool call found in agent text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub tool_name: String,
    /// `Some` for `Name('arg')` (possibly empty), `None` for `Name()`
    pub argument: Option<String>,
    /// Byte range of the whole call in the scanned text
    pub span: Range<usize>,
}

impl ToolInvocation {
    /// Argument passed to the handler; the bare form passes an empty string
    pub fn argument_str(&self) -> &str {
        self.argument.as_deref().unwrap_or("")
    }
}

/// Both call forms for one tool name
#[derive(Debug, Clone)]
struct ToolPattern {
    name: String,
    quoted: Regex,
    bare: Regex,
}

impl ToolPattern {
    fn new(name: &str) -> Result<Self, regex::Error> {
        let escaped = regex::escape(name);
        Ok(Self {
            name: name.to_string(),
            quoted: Regex::new(&format!(r"{}\('([^']*)'\)", escaped))?,
            bare: Regex::new(&format!(r"{}\(\)", escaped))?,
        })
    }

    fn find_all(&self, text: &str, found: &mut Vec<ToolInvocation>) {
        for caps in self.quoted.captures_iter(text) {
            let (Some(whole), Some(arg)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            found.push(ToolInvocation {
                tool_name: self.name.clone(),
                argument: Some(arg.as_str().to_string()),
                span: whole.range(),
            });
        }

        for m in self.bare.find_iter(text) {
            found.push(ToolInvocation {
                tool_name: self.name.clone(),
                argument: None,
                span: m.range(),
            });
        }
    }
}

/// Matches textual tool calls for a fixed set of tool names
#[derive(Debug, Clone)]
pub struct ToolCallScanner {
    patterns: Vec<ToolPattern>,
}

impl ToolCallScanner {
    pub fn new<I, S>(tool_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = tool_names
            .into_iter()
            .map(|n| n.as_ref().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        names.sort();
        names.dedup();

        let patterns = names
            .iter()
            .filter_map(|name| match ToolPattern::new(name) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    log::error!("[SCANNER] Failed to build call pattern for '{}': {}", name, e);
                    None
                }
            })
            .collect();

        Self { patterns }
    }

    /// Scanner for every tool in the registry
    pub fn for_registry(registry: &ToolRegistry) -> Self {
        Self::new(registry.names())
    }

    /// Find all tool calls, ordered by where they start in the text
    pub fn scan(&self, text: &str) -> Vec<ToolInvocation> {
        let mut found = Vec::new();
        for pattern in &self.patterns {
            pattern.find_all(text, &mut found);
        }
        found.sort_by_key(|inv| inv.span.start);
        found
    }
}

/// Scan `text` and execute every tool call found, in textual order
pub async fn run_tool_calls(
    registry: &ToolRegistry,
    scanner: &ToolCallScanner,
    text: &str,
    context: &ToolContext,
) -> Vec<ToolExecution> {
    let invocations = scanner.scan(text);
    if !invocations.is_empty() {
        log::info!("[SCANNER] Found {} tool call(s)", invocations.len());
    }

    let mut executions = Vec::with_capacity(invocations.len());
    for invocation in invocations {
        let started = Instant::now();
        let result = registry
            .execute(&invocation.tool_name, invocation.argument_str(), context)
            .await;
        let duration_ms = started.elapsed().as_millis() as u64;

        log::debug!(
            "[SCANNER] {} at {:?} -> success={} ({}ms)",
            invocation.tool_name,
            invocation.span,
            result.success,
            duration_ms
        );

        if let Some(error) = &result.error {
            log::warn!("[SCANNER] {} failed: {}", invocation.tool_name, error);
        }

        executions.push(ToolExecution {
            tool_name: invocation.tool_name,
            argument: invocation.argument,
            result,
        });
    }
    executions
}
