// ABOUTME: Command module aggregator for the vercel-deploy CLI.
// ABOUTME: Re-exports deploy and aliases command handlers.

mod aliases;
mod deploy;

pub use aliases::aliases;
pub use deploy::deploy;
