//! Role definitions, prompt templates and the role agent
//!
//! Every role has a fixed instruction template with a single `{input}`
//! placeholder and a backend configuration (model + endpoint). Templates can
//! be overridden from `roles.ron` in the config directory:
//!
//! ```ron
//! {
//!     "Developer": (model: Some("codellama")),
//!     "QA": (template: Some("You are QA...\nUser question: {input}")),
//! }
//! ```

use crate::ai::TextGenerator;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};

/// Placeholder replaced by the user text in every template
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// The fixed set of roles
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, AsRefStr,
)]
pub enum RoleKey {
    ProductOwner,
    Developer,
    #[strum(serialize = "QA")]
    #[serde(rename = "QA")]
    Qa,
    DevOps,
}

impl RoleKey {
    /// Parse a display name or a common alias, case-insensitively
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "productowner" | "product_owner" | "product-owner" | "po" => Some(RoleKey::ProductOwner),
            "developer" | "dev" => Some(RoleKey::Developer),
            "qa" => Some(RoleKey::Qa),
            "devops" | "dev_ops" => Some(RoleKey::DevOps),
            _ => None,
        }
    }

    /// The coordinating role whose output may contain directives
    pub fn is_lead(&self) -> bool {
        matches!(self, RoleKey::ProductOwner)
    }

    /// Roles the coordinator may dispatch to
    pub fn dispatchable() -> [RoleKey; 3] {
        [RoleKey::Developer, RoleKey::Qa, RoleKey::DevOps]
    }
}

/// Immutable per-role configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleProfile {
    pub key: RoleKey,
    pub template: String,
    pub model: String,
    pub endpoint: String,
}

impl RoleProfile {
    /// Substitute the user text into the template
    pub fn render_prompt(&self, input: &str) -> String {
        self.template.replace(INPUT_PLACEHOLDER, input)
    }
}

fn default_template(key: RoleKey) -> &'static str {
    match key {
        RoleKey::ProductOwner => concat!(
            "You are the Product Owner. You manage the backlog and the requirements.\n",
            "If you need to create a task, use TaskManagerTool('Title|Desc').\n\n",
            "If Developer/QA/DevOps should do something, write it in this format:\n",
            "Developer: \"instruction\"\n",
            "QA: \"instruction\"\n",
            "DevOps: \"instruction\"\n\n",
            "User question: {input}"
        ),
        RoleKey::Developer => concat!(
            "You are a Developer. You implement features.\n",
            "You can use TaskManagerTool('Title|Description') to create tasks.\n",
            "Use ListTasks() to see them.\n",
            "To CREATE OR MODIFY code files, use WriteFileTool('file.java|<content>').\n\n",
            "User question: {input}"
        ),
        RoleKey::Qa => concat!(
            "You are QA. You run tests and report bugs.\n",
            "Use TaskManagerTool('Bug|description') for bugs.\n",
            "Use ListTasks() to see tasks.\n\n",
            "User question: {input}"
        ),
        RoleKey::DevOps => concat!(
            "You are DevOps. You handle CI/CD and deployments.\n",
            "Use TaskManagerTool('Infra|desc') for infrastructure tasks.\n",
            "Use ListTasks() to list them.\n\n",
            "User question: {input}"
        ),
    }
}

/// Per-role override read from `roles.ron`
#[derive(Debug, Clone, Default, Deserialize)]
struct RoleOverride {
    #[serde(default)]
    template: Option<String>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    endpoint: Option<String>,
}

/// Profiles for all four roles; lookups are total
#[derive(Debug, Clone)]
pub struct RoleCatalog {
    profiles: HashMap<RoleKey, RoleProfile>,
}

impl RoleCatalog {
    /// Built-in templates, all roles on the same model and endpoint
    pub fn defaults(model: &str, endpoint: &str) -> Self {
        let profiles = RoleKey::iter()
            .map(|key| {
                (
                    key,
                    RoleProfile {
                        key,
                        template: default_template(key).to_string(),
                        model: model.to_string(),
                        endpoint: endpoint.to_string(),
                    },
                )
            })
            .collect();
        Self { profiles }
    }

    /// Defaults plus overrides from `<config_dir>/roles.ron` when present
    pub fn load(config_dir: &Path, model: &str, endpoint: &str) -> Self {
        let mut catalog = Self::defaults(model, endpoint);
        let roles_path = config_dir.join("roles.ron");

        if !roles_path.exists() {
            log::info!("[roles] No role overrides at {:?}, using defaults", roles_path);
            return catalog;
        }

        match std::fs::read_to_string(&roles_path) {
            Ok(content) => match catalog.apply_overrides(&content) {
                Ok(count) => {
                    log::info!("[roles] Loaded {} role overrides from {:?}", count, roles_path)
                }
                Err(e) => log::error!("[roles] Failed to parse role overrides: {}", e),
            },
            Err(e) => log::error!("[roles] Failed to read role overrides file: {}", e),
        }

        catalog
    }

    /// Apply RON overrides; returns how many roles were changed
    fn apply_overrides(&mut self, content: &str) -> Result<usize, String> {
        let overrides: HashMap<String, RoleOverride> =
            ron::from_str(content).map_err(|e| e.to_string())?;

        let mut applied = 0;
        for (name, role_override) in overrides {
            let Some(key) = RoleKey::from_name(&name) else {
                log::warn!("[roles] Ignoring override for unknown role '{}'", name);
                continue;
            };
            let Some(profile) = self.profiles.get_mut(&key) else {
                continue;
            };

            if let Some(template) = role_override.template {
                if !template.contains(INPUT_PLACEHOLDER) {
                    log::warn!(
                        "[roles] Template for {} has no {} placeholder; user text will not be included",
                        key,
                        INPUT_PLACEHOLDER
                    );
                }
                profile.template = template;
            }
            if let Some(model) = role_override.model {
                profile.model = model;
            }
            if let Some(endpoint) = role_override.endpoint {
                profile.endpoint = endpoint;
            }
            applied += 1;
        }
        Ok(applied)
    }

    pub fn get(&self, key: RoleKey) -> &RoleProfile {
        // Every key is inserted by `defaults`
        &self.profiles[&key]
    }
}

/// The agent's reply tagged with the role that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentReply {
    pub role: RoleKey,
    pub text: String,
}

/// A role bound to its template and the text-generation backend
#[derive(Clone)]
pub struct RoleAgent {
    profile: RoleProfile,
    generator: Arc<dyn TextGenerator>,
}

impl RoleAgent {
    pub fn new(profile: RoleProfile, generator: Arc<dyn TextGenerator>) -> Self {
        Self { profile, generator }
    }

    pub fn role(&self) -> RoleKey {
        self.profile.key
    }

    /// One backend call with the user text substituted into the template.
    /// Backend errors are returned as-is; there are no retries.
    pub async fn respond(&self, user_text: &str) -> Result<AgentReply, String> {
        let prompt = self.profile.render_prompt(user_text);
        log::info!("[AGENT] {} responding ({} input chars)", self.profile.key, user_text.len());

        let text = self
            .generator
            .generate(&prompt, &self.profile.model, &self.profile.endpoint)
            .await
            .map_err(|e| {
                log::error!("[AGENT] {} backend failure: {}", self.profile.key, e);
                e
            })?;

        Ok(AgentReply {
            role: self.profile.key,
            text,
        })
    }
}
