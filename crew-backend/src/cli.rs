//! Console surface for the interactive loop

use crate::ai::{TurnEvent, TurnObserver};
use crate::tools::ToolDefinition;
use std::io::Write;

/// Printed after every turn
pub const SEPARATOR: &str =
    "----------------------------------------------------------------------";

const EXIT_COMMANDS: &[&str] = &["salir", "exit", "quit"];

pub fn is_exit_command(line: &str) -> bool {
    let line = line.trim();
    EXIT_COMMANDS.iter().any(|cmd| line.eq_ignore_ascii_case(cmd))
}

/// Writes each turn event as a console line. Routing is only logged.
pub struct ConsoleObserver<W: Write> {
    out: W,
}

impl<W: Write> ConsoleObserver<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TurnObserver for ConsoleObserver<W> {
    fn on_event(&mut self, event: &TurnEvent) {
        if let TurnEvent::Routed { .. } = event {
            return;
        }
        if let Err(e) = writeln!(self.out, "{}", event) {
            log::warn!("[CLI] Failed to write event {}: {}", event.kind(), e);
        }
    }
}

pub fn banner(definitions: &[ToolDefinition]) -> String {
    let mut text = String::from("=== Multi-role assistant ===\n");
    text.push_str("Roles: ProductOwner, Developer, QA, DevOps\n");
    text.push_str("Tools:\n");
    for def in definitions {
        text.push_str(&format!("  {}  {}\n", def.usage, def.description));
    }
    text.push_str("Type 'exit' to quit.\n");
    text
}
