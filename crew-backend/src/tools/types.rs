use crate::tools::task_store::TaskStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Tool groups for access control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolGroup {
    #[default]
    Tasks,
    Filesystem,
}

impl ToolGroup {
    pub fn all() -> Vec<ToolGroup> {
        vec![ToolGroup::Tasks, ToolGroup::Filesystem]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolGroup::Tasks => "tasks",
            ToolGroup::Filesystem => "filesystem",
        }
    }
}

/// Tool profiles for quick configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolProfile {
    /// Task creation and listing only
    Tasks,
    /// Task tools plus file writing
    Full,
}

impl Default for ToolProfile {
    fn default() -> Self {
        ToolProfile::Full
    }
}

impl ToolProfile {
    pub fn allowed_groups(&self) -> Vec<ToolGroup> {
        match self {
            ToolProfile::Tasks => vec![ToolGroup::Tasks],
            ToolProfile::Full => ToolGroup::all(),
        }
    }

    pub fn allows(&self, group: ToolGroup) -> bool {
        self.allowed_groups().contains(&group)
    }

    pub fn from_str(s: &str) -> Option<ToolProfile> {
        match s.to_lowercase().as_str() {
            "tasks" | "minimal" => Some(ToolProfile::Tasks),
            "full" => Some(ToolProfile::Full),
            _ => None,
        }
    }
}

/// Tool definition shown to the agents and to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Name the agents write in their output, e.g. `TaskManagerTool`
    pub name: String,
    pub description: String,
    /// Example invocation in the textual call syntax
    pub usage: String,
    #[serde(skip)]
    pub group: ToolGroup,
}

/// Result of tool execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success(content: impl Into<String>) -> Self {
        ToolResult {
            success: true,
            content: content.into(),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        let msg = message.into();
        ToolResult {
            success: false,
            content: msg.clone(),
            error: Some(msg),
        }
    }
}

/// A single executed tool call found in agent output
#[derive(Debug, Clone)]
pub struct ToolExecution {
    pub tool_name: String,
    /// `None` for the bare `ToolName()` form
    pub argument: Option<String>,
    pub result: ToolResult,
}

impl ToolExecution {
    /// Render the call the way it appeared in the text
    pub fn display_call(&self) -> String {
        match &self.argument {
            Some(arg) => format!("{}('{}')", self.tool_name, arg),
            None => format!("{}()", self.tool_name),
        }
    }
}

/// Context provided to tools during execution
#[derive(Debug, Clone, Default)]
pub struct ToolContext {
    /// Base directory for relative file paths (current directory when unset)
    pub workspace_dir: Option<PathBuf>,
    /// Task store shared by the task tools
    pub tasks: TaskStore,
}

impl ToolContext {
    pub fn new(tasks: TaskStore) -> Self {
        ToolContext {
            workspace_dir: None,
            tasks,
        }
    }

    pub fn with_workspace(mut self, workspace_dir: impl Into<PathBuf>) -> Self {
        self.workspace_dir = Some(workspace_dir.into());
        self
    }

    /// Resolve a tool-supplied path against the workspace directory.
    /// Absolute paths are returned unchanged.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let candidate = Path::new(path);
        match &self.workspace_dir {
            Some(dir) if candidate.is_relative() => dir.join(candidate),
            _ => candidate.to_path_buf(),
        }
    }
}
