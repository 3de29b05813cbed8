use crate::tools::types::{ToolContext, ToolDefinition, ToolProfile, ToolResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// A local action the agents can trigger by writing `Name('arg')` in their output
#[async_trait]
pub trait Tool: Send + Sync {
    fn definition(&self) -> ToolDefinition;

    /// Execute with the raw text argument (empty for the `Name()` form)
    async fn execute(&self, argument: &str, context: &ToolContext) -> ToolResult;
}

/// Registry of tools keyed by their invocation name.
///
/// Tools are registered once at startup; names are unique.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    profile: ToolProfile,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::with_profile(ToolProfile::default())
    }

    pub fn with_profile(profile: ToolProfile) -> Self {
        ToolRegistry {
            tools: HashMap::new(),
            profile,
        }
    }

    /// Register a tool. Returns false when the name is taken or the tool's
    /// group is not allowed by the registry profile.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> bool {
        let definition = tool.definition();

        if !self.profile.allows(definition.group) {
            log::debug!(
                "[TOOLS] Skipping '{}' (group '{}' not in profile {:?})",
                definition.name,
                definition.group.as_str(),
                self.profile
            );
            return false;
        }

        if self.tools.contains_key(&definition.name) {
            log::warn!("[TOOLS] Tool '{}' is already registered", definition.name);
            return false;
        }

        self.tools.insert(definition.name, tool);
        true
    }

    #[cfg(test)]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Registered tool names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Definitions of all registered tools, sorted by name
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<ToolDefinition> = self.tools.values().map(|t| t.definition()).collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    pub fn profile(&self) -> ToolProfile {
        self.profile
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Invoke a tool by name
    pub async fn execute(&self, name: &str, argument: &str, context: &ToolContext) -> ToolResult {
        match self.tools.get(name) {
            Some(tool) => tool.execute(argument, context).await,
            None => ToolResult::error(format!("Unknown tool: {}", name)),
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::types::ToolGroup;

    struct EchoTool {
        name: &'static str,
        group: ToolGroup,
    }

    #[async_trait]
    impl Tool for EchoTool {
        fn definition(&self) -> ToolDefinition {
            ToolDefinition {
                name: self.name.to_string(),
                description: "Echo the argument".to_string(),
                usage: format!("{}('text')", self.name),
                group: self.group,
            }
        }

        async fn execute(&self, argument: &str, _context: &ToolContext) -> ToolResult {
            ToolResult::success(format!("echo:{}", argument))
        }
    }

    fn echo(name: &'static str, group: ToolGroup) -> Arc<dyn Tool> {
        Arc::new(EchoTool { name, group })
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut registry = ToolRegistry::new();
        assert!(registry.register(echo("Echo", ToolGroup::Tasks)));
        assert!(!registry.register(echo("Echo", ToolGroup::Tasks)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_profile_filters_groups() {
        let mut registry = ToolRegistry::with_profile(ToolProfile::Tasks);
        assert!(registry.register(echo("Echo", ToolGroup::Tasks)));
        assert!(!registry.register(echo("Writer", ToolGroup::Filesystem)));
        assert_eq!(registry.names(), vec!["Echo".to_string()]);
    }

    #[tokio::test]
    async fn test_execute_known_and_unknown() {
        let mut registry = ToolRegistry::new();
        registry.register(echo("Echo", ToolGroup::Tasks));
        let ctx = ToolContext::default();

        let ok = registry.execute("Echo", "hi", &ctx).await;
        assert!(ok.success);
        assert_eq!(ok.content, "echo:hi");

        let missing = registry.execute("Nope", "", &ctx).await;
        assert!(!missing.success);
        assert!(missing.content.contains("Nope"));
    }
}
