// ABOUTME: Type-safe identifiers and validated domain types.
// ABOUTME: Uses phantom types to keep GitHub and Vercel identifiers apart at compile time.

mod id;
mod pull_number;
mod repo_slug;
mod revision;

pub use id::{CommentId, DeploymentRecordId, VercelDeploymentId};
pub use pull_number::PullNumber;
pub use repo_slug::{RepoSlug, RepoSlugError};
pub use revision::{Revision, RevisionError, SHORT_SHA_LEN};
