// ABOUTME: Secrets needed to talk to GitHub and Vercel.
// ABOUTME: Debug output is redacted so tokens never reach logs.

use super::inputs::Inputs;
use crate::error::Result;

#[derive(Clone)]
pub struct Credentials {
    pub github_token: String,
    pub vercel_token: String,
    pub vercel_org_id: String,
    pub vercel_project_id: String,
}

impl Credentials {
    pub fn from_inputs<F>(inputs: &Inputs<F>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            github_token: inputs.required(&["GH_PAT", "GITHUB_TOKEN"])?,
            vercel_token: inputs.required(&["VERCEL_TOKEN"])?,
            vercel_org_id: inputs.required(&["VERCEL_ORG_ID"])?,
            vercel_project_id: inputs.required(&["VERCEL_PROJECT_ID"])?,
        })
    }

    /// Values that must be masked in workflow logs.
    pub fn secrets(&self) -> [&str; 2] {
        [self.github_token.as_str(), self.vercel_token.as_str()]
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("github_token", &"***")
            .field("vercel_token", &"***")
            .field("vercel_org_id", &self.vercel_org_id)
            .field("vercel_project_id", &self.vercel_project_id)
            .finish()
    }
}
