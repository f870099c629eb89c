// ABOUTME: HostingProvider capability trait consumed by the deploy pipeline.
// ABOUTME: Implemented by VercelCli; test fakes implement it in memory.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::VercelError;
use super::request::DeployRequest;
use crate::types::VercelDeploymentId;

/// Metadata of a finished deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentInfo {
    pub id: VercelDeploymentId,
    #[serde(default)]
    pub inspector_url: Option<String>,
}

/// Operations against the hosting provider.
#[async_trait]
pub trait HostingProvider: Send + Sync {
    /// Deploy the working tree and return the deployment URL.
    async fn deploy(&self, request: &DeployRequest) -> Result<String, VercelError>;

    /// Point `domain` at the deployment just produced.
    async fn assign_alias(&self, deployment_url: &str, domain: &str) -> Result<(), VercelError>;

    /// Identifier and inspector URL of the deployment just produced.
    async fn deployment(&self, deployment_url: &str) -> Result<DeploymentInfo, VercelError>;
}
