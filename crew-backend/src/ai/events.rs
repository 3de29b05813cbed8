//! Events emitted while a turn runs
//!
//! Observers see each step as it happens, so the output of a turn that later
//! fails on a backend error is still reported.

use crate::ai::coordinator::Directive;
use crate::ai::roles::RoleKey;
use crate::tools::ToolExecution;

#[derive(Debug, Clone)]
pub enum TurnEvent {
    /// The router picked a role
    Routed { role: RoleKey },
    /// The routed role answered
    AgentResponse { role: RoleKey, text: String },
    /// A tool call found in some response was executed
    ToolExecuted(ToolExecution),
    /// The coordinator found a directive in the lead's response
    DirectiveDetected(Directive),
    /// A dispatched role answered (or the coordinator reported an unknown role)
    SubAgentResponse { role: RoleKey, text: String },
}

impl TurnEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            TurnEvent::Routed { .. } => "turn.routed",
            TurnEvent::AgentResponse { .. } => "agent.response",
            TurnEvent::ToolExecuted(_) => "tool.result",
            TurnEvent::DirectiveDetected(_) => "coordinator.directive",
            TurnEvent::SubAgentResponse { .. } => "coordinator.response",
        }
    }
}

impl std::fmt::Display for TurnEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnEvent::Routed { role } => write!(f, "[Router] -> {}", role),
            TurnEvent::AgentResponse { role, text } | TurnEvent::SubAgentResponse { role, text } => {
                write!(f, "[{} responds]: {}", role, text)
            }
            TurnEvent::ToolExecuted(execution) => write!(
                f,
                "[Executed {}] => {}",
                execution.display_call(),
                execution.result.content
            ),
            TurnEvent::DirectiveDetected(directive) => write!(
                f,
                "[Coordinator] Instruction detected for {}: \"{}\"",
                directive.target_role, directive.instruction
            ),
        }
    }
}

/// Receives turn events in order
pub trait TurnObserver {
    fn on_event(&mut self, event: &TurnEvent);
}

/// Discards every event
#[cfg(test)]
pub struct NullObserver;

#[cfg(test)]
impl TurnObserver for NullObserver {
    fn on_event(&mut self, _event: &TurnEvent) {}
}

/// Collecting observer, handy for tests and batch callers
impl TurnObserver for Vec<TurnEvent> {
    fn on_event(&mut self, event: &TurnEvent) {
        self.push(event.clone());
    }
}
