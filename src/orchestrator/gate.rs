// ABOUTME: Fork safety gate deciding whether a run may deploy.
// ABOUTME: Pull requests from forks are refused unless explicitly allowed.

use crate::context::{ForkStatus, RunContext};
use crate::types::PullNumber;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    /// Do not deploy; explain on the pull request instead.
    Refuse { pull: PullNumber },
}

/// Refuse only when a pull request exists, comes from a fork, and forks are not allowed.
pub fn evaluate(context: &RunContext, allow_forks: bool) -> GateDecision {
    match (context.fork_status(), context.pull_number()) {
        (ForkStatus::Fork, Some(pull)) if !allow_forks => GateDecision::Refuse { pull },
        _ => GateDecision::Proceed,
    }
}
