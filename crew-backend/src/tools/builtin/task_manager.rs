//! Task creation tool
//!
//! Argument format is `title|description`; the description is optional.

use crate::tools::registry::Tool;
use crate::tools::types::{ToolContext, ToolDefinition, ToolGroup, ToolResult};
use async_trait::async_trait;

pub struct TaskManagerTool {
    definition: ToolDefinition,
}

impl TaskManagerTool {
    pub const NAME: &'static str = "TaskManagerTool";

    pub fn new() -> Self {
        TaskManagerTool {
            definition: ToolDefinition {
                name: Self::NAME.to_string(),
                description: "Create a task. Argument is 'Title|Description'; the description may be omitted.".to_string(),
                usage: format!("{}('Title|Description')", Self::NAME),
                group: ToolGroup::Tasks,
            },
        }
    }

    /// Split on the first `|`; no separator means an empty description
    fn split_argument(argument: &str) -> (&str, &str) {
        argument.split_once('|').unwrap_or((argument, ""))
    }
}

impl Default for TaskManagerTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for TaskManagerTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, argument: &str, context: &ToolContext) -> ToolResult {
        let (title, description) = Self::split_argument(argument);
        context.tasks.add(title, description);

        // Echo what the agent supplied, not the trimmed stored values
        ToolResult::success(format!("Task created: '{}' => {}", title, description))
    }
}
