pub mod builtin;
pub mod registry;
pub mod scanner;
pub mod task_store;
pub mod types;

pub use registry::ToolRegistry;
pub use scanner::{run_tool_calls, ToolCallScanner};
pub use task_store::TaskStore;
pub use types::{ToolContext, ToolDefinition, ToolExecution, ToolProfile};

use std::sync::Arc;

/// Register all built-in tools to a registry
fn register_all_tools(registry: &mut ToolRegistry) {
    // Task tools
    registry.register(Arc::new(builtin::TaskManagerTool::new()));
    registry.register(Arc::new(builtin::ListTasksTool::new()));

    // Filesystem tools
    registry.register(Arc::new(builtin::WriteFileTool::new()));
}

/// Create a new ToolRegistry with all built-in tools registered
#[cfg(test)]
pub fn create_default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    register_all_tools(&mut registry);
    registry
}

/// Create a registry limited to the groups of a profile
pub fn create_registry_with_profile(profile: ToolProfile) -> ToolRegistry {
    let mut registry = ToolRegistry::with_profile(profile);
    register_all_tools(&mut registry);
    registry
}
