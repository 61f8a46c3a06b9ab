//! Scripted in-memory gateway for tests.
//!
//! Every invocation is recorded. Responses come from a per-subcommand queue
//! first, then from a per-subcommand default, and finally fall back to an
//! empty success.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use crate::{Gateway, GatewayOutput, EXIT_NOT_FOUND};

/// A fake [`Gateway`] that never spawns processes.
#[derive(Debug, Default)]
pub struct FakeGateway {
    queued: RefCell<HashMap<String, VecDeque<GatewayOutput>>>,
    defaults: RefCell<HashMap<String, GatewayOutput>>,
    fallback: Option<GatewayOutput>,
    next_pane: Cell<Option<u32>>,
    invocations: RefCell<Vec<Vec<String>>>,
}

impl FakeGateway {
    /// A gateway where every command succeeds with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway that behaves as if tmux is not installed.
    pub fn unavailable() -> Self {
        Self {
            fallback: Some(GatewayOutput::failure(EXIT_NOT_FOUND, "tmux not found in PATH")),
            ..Self::default()
        }
    }

    /// Make unscripted `split-window` calls return `%<n>` with increasing n.
    pub fn with_auto_panes(self, first: u32) -> Self {
        self.next_pane.set(Some(first));
        self
    }

    /// Queue a one-shot response for the next call of `subcommand`.
    pub fn push_response(&self, subcommand: &str, output: GatewayOutput) {
        self.queued
            .borrow_mut()
            .entry(subcommand.to_string())
            .or_default()
            .push_back(output);
    }

    /// Set the response for every unqueued call of `subcommand`.
    pub fn set_default(&self, subcommand: &str, output: GatewayOutput) {
        self.defaults
            .borrow_mut()
            .insert(subcommand.to_string(), output);
    }

    /// Recorded calls, each rendered as `subcommand arg arg ...`.
    pub fn calls(&self) -> Vec<String> {
        self.invocations
            .borrow()
            .iter()
            .map(|argv| argv.join(" "))
            .collect()
    }

    /// Recorded calls as argument vectors (subcommand first).
    pub fn invocations(&self) -> Vec<Vec<String>> {
        self.invocations.borrow().clone()
    }

    /// Number of recorded calls of `subcommand`.
    pub fn count(&self, subcommand: &str) -> usize {
        self.invocations
            .borrow()
            .iter()
            .filter(|argv| argv.first().is_some_and(|s| s == subcommand))
            .count()
    }

    /// Forget recorded calls (scripted responses are kept).
    pub fn clear_calls(&self) {
        self.invocations.borrow_mut().clear();
    }

    fn respond(&self, subcommand: &str) -> GatewayOutput {
        if let Some(output) = self
            .queued
            .borrow_mut()
            .get_mut(subcommand)
            .and_then(VecDeque::pop_front)
        {
            return output;
        }
        if let Some(output) = self.defaults.borrow().get(subcommand) {
            return output.clone();
        }
        if let Some(output) = &self.fallback {
            return output.clone();
        }
        if subcommand == "split-window" {
            if let Some(n) = self.next_pane.get() {
                self.next_pane.set(Some(n + 1));
                return GatewayOutput::ok(format!("%{}\n", n));
            }
        }
        GatewayOutput::ok("")
    }
}

impl Gateway for FakeGateway {
    fn execute(&self, subcommand: &str, args: &[&str]) -> GatewayOutput {
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(subcommand.to_string());
        argv.extend(args.iter().map(|a| a.to_string()));
        self.invocations.borrow_mut().push(argv);
        self.respond(subcommand)
    }
}
