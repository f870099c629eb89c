// ABOUTME: Library root for vercel-deploy - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod alias;
pub mod comment;
pub mod config;
pub mod context;
pub mod deploy;
pub mod diagnostics;
pub mod error;
pub mod github;
pub mod orchestrator;
pub mod output;
pub mod types;
pub mod vercel;
