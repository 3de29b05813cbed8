//! Pipeline - runs one user turn through the dispatch core
//!
//! ```text
//! AwaitInput → Routed → Responded → ToolsScanned → (lead) Coordinating → Done → AwaitInput
//! ```
//!
//! Only the task store outlives a turn. A turn runs to completion or stops at
//! the first backend failure; it cannot be cancelled part-way.

use crate::ai::coordinator::{parse_directives, Coordinator, Directive};
use crate::ai::events::{TurnEvent, TurnObserver};
use crate::ai::roles::{RoleAgent, RoleCatalog, RoleKey};
use crate::ai::router;
use crate::ai::TextGenerator;
use crate::tools::{run_tool_calls, TaskStore, ToolCallScanner, ToolContext, ToolExecution, ToolRegistry};
use std::sync::Arc;
use uuid::Uuid;

/// Where the pipeline is within a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    AwaitInput,
    Routed,
    Responded,
    ToolsScanned,
    Coordinating,
    Done,
}

impl std::fmt::Display for TurnState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnState::AwaitInput => write!(f, "await_input"),
            TurnState::Routed => write!(f, "routed"),
            TurnState::Responded => write!(f, "responded"),
            TurnState::ToolsScanned => write!(f, "tools_scanned"),
            TurnState::Coordinating => write!(f, "coordinating"),
            TurnState::Done => write!(f, "done"),
        }
    }
}

/// A directive and what came of it
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub directive: Directive,
    pub response: String,
    pub tool_results: Vec<ToolExecution>,
}

/// Everything a completed turn produced
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub turn_id: String,
    pub role: RoleKey,
    pub response: String,
    pub tool_results: Vec<ToolExecution>,
    pub dispatches: Vec<DispatchOutcome>,
}

pub struct Pipeline {
    catalog: RoleCatalog,
    generator: Arc<dyn TextGenerator>,
    coordinator: Coordinator,
    registry: Arc<ToolRegistry>,
    scanner: ToolCallScanner,
    context: ToolContext,
    state: TurnState,
}

impl Pipeline {
    pub fn new(
        catalog: RoleCatalog,
        generator: Arc<dyn TextGenerator>,
        registry: Arc<ToolRegistry>,
        context: ToolContext,
    ) -> Self {
        let coordinator = Coordinator::new(&catalog, generator.clone());
        let scanner = ToolCallScanner::for_registry(&registry);
        Self {
            catalog,
            generator,
            coordinator,
            registry,
            scanner,
            context,
            state: TurnState::AwaitInput,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// The task store shared with the task tools
    pub fn tasks(&self) -> &TaskStore {
        &self.context.tasks
    }

    fn transition_to(&mut self, next: TurnState) {
        log::debug!("[PIPELINE] {} → {}", self.state, next);
        self.state = next;
    }

    /// Run one turn for `input`, reporting each step to `observer`
    pub async fn run_turn(
        &mut self,
        input: &str,
        observer: &mut dyn TurnObserver,
    ) -> Result<TurnReport, String> {
        self.transition_to(TurnState::AwaitInput);
        let turn_id = Uuid::new_v4().to_string();

        let result = self.run_steps(&turn_id, input, observer).await;
        match &result {
            Ok(report) => {
                self.transition_to(TurnState::Done);
                log::info!(
                    "[PIPELINE] Turn {} done: {} responded, {} tool call(s), {} dispatch(es)",
                    turn_id,
                    report.role,
                    report.tool_results.len(),
                    report.dispatches.len()
                );
                self.transition_to(TurnState::AwaitInput);
            }
            Err(e) => {
                log::error!("[PIPELINE] Turn {} failed in state {}: {}", turn_id, self.state, e);
                self.transition_to(TurnState::AwaitInput);
            }
        }
        result
    }

    async fn run_steps(
        &mut self,
        turn_id: &str,
        input: &str,
        observer: &mut dyn TurnObserver,
    ) -> Result<TurnReport, String> {
        let role = router::classify(input);
        log::info!("[PIPELINE] Turn {} routed to {}", turn_id, role);
        self.transition_to(TurnState::Routed);
        observer.on_event(&TurnEvent::Routed { role });

        let agent = RoleAgent::new(self.catalog.get(role).clone(), self.generator.clone());
        let reply = agent.respond(input).await?;
        self.transition_to(TurnState::Responded);
        observer.on_event(&TurnEvent::AgentResponse {
            role: reply.role,
            text: reply.text.clone(),
        });

        let tool_results = self.scan_and_report(&reply.text, observer).await;
        self.transition_to(TurnState::ToolsScanned);

        let mut dispatches = Vec::new();
        if role.is_lead() {
            self.transition_to(TurnState::Coordinating);

            for directive in parse_directives(&reply.text) {
                observer.on_event(&TurnEvent::DirectiveDetected(directive.clone()));

                let response = self
                    .coordinator
                    .dispatch(directive.target_role.as_ref(), &directive.instruction)
                    .await?;
                observer.on_event(&TurnEvent::SubAgentResponse {
                    role: directive.target_role,
                    text: response.clone(),
                });

                // Sub-responses get tools run but are not searched for directives
                let sub_results = self.scan_and_report(&response, observer).await;
                dispatches.push(DispatchOutcome {
                    directive,
                    response,
                    tool_results: sub_results,
                });
            }
        }

        Ok(TurnReport {
            turn_id: turn_id.to_string(),
            role,
            response: reply.text,
            tool_results,
            dispatches,
        })
    }

    async fn scan_and_report(
        &self,
        text: &str,
        observer: &mut dyn TurnObserver,
    ) -> Vec<ToolExecution> {
        let executions = run_tool_calls(&self.registry, &self.scanner, text, &self.context).await;
        for execution in &executions {
            observer.on_event(&TurnEvent::ToolExecuted(execution.clone()));
        }
        executions
    }
}
