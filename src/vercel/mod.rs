// ABOUTME: Vercel collaborator: the HostingProvider capability trait and its CLI-backed implementation.
// ABOUTME: Deploys the working tree, assigns alias domains, and reads deployment metadata.

mod cli;
mod error;
mod hosting;
mod request;

pub use cli::{DEFAULT_API_URL, VercelCli, VercelCliConfig};
pub use error::{VercelError, VercelErrorKind};
pub use hosting::{DeploymentInfo, HostingProvider};
pub use request::{CommitMetadata, DeployRequest};
