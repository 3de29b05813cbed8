//! Keyword router
//!
//! Picks exactly one role for any input. Rules are checked in priority order
//! against the lower-cased text; the first rule with a matching keyword wins
//! and unmatched input goes to the Developer.

use crate::ai::roles::RoleKey;

/// A routing rule: any keyword (substring match) selects the role
struct RouteRule {
    role: RoleKey,
    keywords: &'static [&'static str],
}

/// Highest priority first
const ROUTE_RULES: &[RouteRule] = &[
    RouteRule {
        role: RoleKey::ProductOwner,
        keywords: &["requisito", "requirement", "backlog"],
    },
    RouteRule {
        role: RoleKey::Qa,
        keywords: &["bug", "test", "qa"],
    },
    RouteRule {
        role: RoleKey::DevOps,
        keywords: &["infra", "deploy", "devops"],
    },
];

const DEFAULT_ROLE: RoleKey = RoleKey::Developer;

/// Classify raw user input into a role
pub fn classify(text: &str) -> RoleKey {
    let lowered = text.to_lowercase();

    let role = ROUTE_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|rule| rule.role)
        .unwrap_or(DEFAULT_ROLE);

    log::debug!("[ROUTER] Routed to {}", role);
    role
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backlog_keywords_pick_lead() {
        assert_eq!(classify("Please groom the BACKLOG"), RoleKey::ProductOwner);
        assert_eq!(classify("nuevo requisito de login"), RoleKey::ProductOwner);
        assert_eq!(classify("new requirements for checkout"), RoleKey::ProductOwner);
    }

    #[test]
    fn test_lead_beats_lower_priorities() {
        assert_eq!(classify("backlog has a bug in the deploy"), RoleKey::ProductOwner);
    }

    #[test]
    fn test_qa_keywords() {
        assert_eq!(classify("Found a Bug on the login page"), RoleKey::Qa);
        assert_eq!(classify("write unit tests"), RoleKey::Qa);
        assert_eq!(classify("ask QA"), RoleKey::Qa);
    }

    #[test]
    fn test_qa_beats_devops() {
        assert_eq!(classify("test the deploy script"), RoleKey::Qa);
    }

    #[test]
    fn test_devops_keywords() {
        assert_eq!(classify("Deploy to production"), RoleKey::DevOps);
        assert_eq!(classify("infrastructure as code"), RoleKey::DevOps);
        assert_eq!(classify("ping the DevOps team"), RoleKey::DevOps);
    }

    #[test]
    fn test_default_is_developer() {
        assert_eq!(classify("implement the login form"), RoleKey::Developer);
        assert_eq!(classify(""), RoleKey::Developer);
        assert_eq!(classify("   "), RoleKey::Developer);
    }

    #[test]
    fn test_substring_matching() {
        // "debug" contains "bug"
        assert_eq!(classify("debugging session"), RoleKey::Qa);
    }
}
