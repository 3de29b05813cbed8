use crate::tools::registry::Tool;
use crate::tools::types::{ToolContext, ToolDefinition, ToolGroup, ToolResult};
use async_trait::async_trait;

/// Lists every task in creation order. Any argument is ignored.
pub struct ListTasksTool {
    definition: ToolDefinition,
}

impl ListTasksTool {
    pub const NAME: &'static str = "ListTasks";

    pub fn new() -> Self {
        ListTasksTool {
            definition: ToolDefinition {
                name: Self::NAME.to_string(),
                description: "List all tasks created so far.".to_string(),
                usage: format!("{}()", Self::NAME),
                group: ToolGroup::Tasks,
            },
        }
    }
}

impl Default for ListTasksTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ListTasksTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, _argument: &str, context: &ToolContext) -> ToolResult {
        ToolResult::success(context.tasks.format_listing())
    }
}
