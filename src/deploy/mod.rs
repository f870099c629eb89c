// ABOUTME: GitHub deployment record lifecycle using the type state pattern.
// ABOUTME: Exports state markers and DeploymentTracker for compile-time safe transitions.

mod deployment;
mod error;
mod state;
mod transitions;

pub use deployment::DeploymentTracker;
pub use error::DeployError;
pub use state::{Absent, Created, Failed, Pending, Succeeded};
pub use transitions::TransitionResult;
