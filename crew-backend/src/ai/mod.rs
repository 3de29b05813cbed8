//! Role agents and the dispatch core
//!
//! ```text
//! input → router → role agent → tool scan → (lead only) coordinator
//!                                              └→ sub-agent → tool scan
//! ```
//!
//! The text-generation backend sits behind [`TextGenerator`] so routing,
//! scanning and coordination can run against a deterministic stub.

pub mod coordinator;
pub mod events;
pub mod ollama;
pub mod pipeline;
pub mod roles;
pub mod router;

pub use events::{TurnEvent, TurnObserver};
pub use ollama::OllamaClient;
pub use pipeline::Pipeline;
pub use roles::RoleCatalog;

use async_trait::async_trait;

/// Prompt-in, text-out backend shared by every role agent
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt` with `model` served at `endpoint`
    async fn generate(&self, prompt: &str, model: &str, endpoint: &str) -> Result<String, String>;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::TextGenerator;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    /// A recorded backend call
    #[derive(Debug, Clone)]
    pub struct RecordedCall {
        pub prompt: String,
        pub model: String,
        pub endpoint: String,
    }

    /// Deterministic backend: replies with the first rule whose needle occurs
    /// in the prompt, or the fallback text.
    pub struct StubGenerator {
        rules: Vec<(String, Result<String, String>)>,
        fallback: String,
        calls: Mutex<Vec<RecordedCall>>,
    }

    impl StubGenerator {
        pub fn new(fallback: &str) -> Self {
            Self {
                rules: Vec::new(),
                fallback: fallback.to_string(),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn reply_when(mut self, needle: &str, reply: &str) -> Self {
            self.rules.push((needle.to_string(), Ok(reply.to_string())));
            self
        }

        pub fn fail_when(mut self, needle: &str, error: &str) -> Self {
            self.rules.push((needle.to_string(), Err(error.to_string())));
            self
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, prompt: &str, model: &str, endpoint: &str) -> Result<String, String> {
            self.calls.lock().push(RecordedCall {
                prompt: prompt.to_string(),
                model: model.to_string(),
                endpoint: endpoint.to_string(),
            });

            for (needle, reply) in &self.rules {
                if prompt.contains(needle.as_str()) {
                    return reply.clone();
                }
            }
            Ok(self.fallback.clone())
        }
    }
}
