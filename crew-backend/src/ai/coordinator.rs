//! Coordinator - lets the lead role hand work to the other roles
//!
//! The lead's response may contain directives of the form
//!
//! ```text
//! Developer: "Implement login"
//! QA: "Write tests"
//! ```
//!
//! Each directive is dispatched to the named role in order of appearance.
//! Only Developer, QA and DevOps are dispatch targets, and dispatched
//! responses are never scanned for further directives.

use crate::ai::roles::{RoleAgent, RoleCatalog, RoleKey};
use crate::ai::TextGenerator;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;

/// `Role: "instruction"` with the role drawn from the dispatchable set
static DIRECTIVE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let roles = RoleKey::dispatchable()
        .iter()
        .map(|r| regex::escape(r.as_ref()))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r#"({}):\s*"([^"]+)""#, roles)).unwrap()
});

/// An instruction from the lead role to another role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub target_role: RoleKey,
    pub instruction: String,
}

/// Extract directives in order of appearance
pub fn parse_directives(text: &str) -> Vec<Directive> {
    DIRECTIVE_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            let role = RoleKey::from_name(caps.get(1)?.as_str())?;
            Some(Directive {
                target_role: role,
                instruction: caps.get(2)?.as_str().to_string(),
            })
        })
        .collect()
}

/// Fixed dispatch table from role name to agent
pub struct Coordinator {
    agents: HashMap<RoleKey, RoleAgent>,
}

impl Coordinator {
    pub fn new(catalog: &RoleCatalog, generator: Arc<dyn TextGenerator>) -> Self {
        let agents = RoleKey::dispatchable()
            .into_iter()
            .map(|key| (key, RoleAgent::new(catalog.get(key).clone(), generator.clone())))
            .collect();
        Self { agents }
    }

    /// Send `instruction` to the role called exactly `role_name`
    /// (`Developer`, `QA` or `DevOps`).
    ///
    /// Any other name, aliases included, yields a descriptive message
    /// (and no backend call) rather than an error. Backend failures are
    /// returned as `Err`.
    pub async fn dispatch(&self, role_name: &str, instruction: &str) -> Result<String, String> {
        let agent = RoleKey::dispatchable()
            .into_iter()
            .find(|key| key.as_ref() == role_name)
            .and_then(|key| self.agents.get(&key));

        let Some(agent) = agent else {
            log::warn!("[COORDINATOR] No sub-agent for '{}'", role_name);
            return Ok(format!(
                "[Coordinator] Error: no sub-agent exists for '{}'",
                role_name
            ));
        };

        log::info!("[COORDINATOR] Dispatching to {}", agent.role());
        let reply = agent.respond(instruction).await?;
        Ok(reply.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::testing::StubGenerator;

    fn catalog() -> RoleCatalog {
        RoleCatalog::defaults("llama2", "http://localhost:11434")
    }

    #[test]
    fn test_parse_directives_in_order() {
        let directives = parse_directives(r#"Plan: Developer: "Implement login" QA: "Write tests""#);
        assert_eq!(
            directives,
            vec![
                Directive {
                    target_role: RoleKey::Developer,
                    instruction: "Implement login".to_string()
                },
                Directive {
                    target_role: RoleKey::Qa,
                    instruction: "Write tests".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_parse_directives_multiline_and_whitespace() {
        let text = "DevOps:\n   \"Set up CI\"\nDeveloper:\"Refactor auth\"";
        let directives = parse_directives(text);
        assert_eq!(directives.len(), 2);
        assert_eq!(directives[0].target_role, RoleKey::DevOps);
        assert_eq!(directives[0].instruction, "Set up CI");
        assert_eq!(directives[1].instruction, "Refactor auth");
    }

    #[test]
    fn test_parse_ignores_lead_unknown_and_empty() {
        let text = r#"ProductOwner: "me" Designer: "draw" QA: "" Developer: unquoted"#;
        assert!(parse_directives(text).is_empty());
    }

    #[test]
    fn test_parse_no_escaped_quotes() {
        let directives = parse_directives(r#"QA: "check the \"login\" page""#);
        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0].instruction, r"check the \");
    }

    #[tokio::test]
    async fn test_dispatch_calls_role_agent() {
        let stub = Arc::new(StubGenerator::new("fallback").reply_when("You are QA", "tests written"));
        let coordinator = Coordinator::new(&catalog(), stub.clone());

        let text = coordinator.dispatch("QA", "Write tests").await.unwrap();
        assert_eq!(text, "tests written");

        let calls = stub.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].prompt.ends_with("User question: Write tests"));
    }

    #[tokio::test]
    async fn test_dispatch_unknown_role_is_message_without_backend_call() {
        let stub = Arc::new(StubGenerator::new("should not be used"));
        let coordinator = Coordinator::new(&catalog(), stub.clone());

        let text = coordinator.dispatch("Designer", "draw a logo").await.unwrap();
        assert_eq!(text, "[Coordinator] Error: no sub-agent exists for 'Designer'");

        let lead = coordinator.dispatch("ProductOwner", "x").await.unwrap();
        assert!(lead.starts_with("[Coordinator] Error"));

        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_requires_exact_role_name() {
        let stub = Arc::new(StubGenerator::new("should not be used"));
        let coordinator = Coordinator::new(&catalog(), stub.clone());

        for alias in ["dev", "qa", "dev_ops", "developer", " QA"] {
            let text = coordinator.dispatch(alias, "do it").await.unwrap();
            assert_eq!(
                text,
                format!("[Coordinator] Error: no sub-agent exists for '{}'", alias)
            );
        }
        assert!(stub.calls().is_empty());

        let text = coordinator.dispatch("DevOps", "deploy").await.unwrap();
        assert_eq!(text, "should not be used");
    }

    #[tokio::test]
    async fn test_dispatch_propagates_backend_failure() {
        let stub = Arc::new(StubGenerator::new("ok").fail_when("You are DevOps", "model not found"));
        let coordinator = Coordinator::new(&catalog(), stub);

        let err = coordinator.dispatch("DevOps", "deploy").await.unwrap_err();
        assert_eq!(err, "model not found");
    }
}
