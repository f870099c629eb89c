// ABOUTME: Structured outcome of a completed run.
// ABOUTME: Converts into the named step outputs of the action.

use serde::Serialize;

use crate::types::VercelDeploymentId;

/// Final result of a run that reached a successful terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunResult {
    pub deployment_created: bool,
    pub comment_created: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deployment_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_id: Option<VercelDeploymentId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspector_url: Option<String>,
}

impl RunResult {
    /// Outcome of the fork-refusal short-circuit.
    pub fn refused() -> Self {
        Self {
            deployment_created: false,
            comment_created: true,
            preview_url: None,
            deployment_urls: Vec::new(),
            unique_url: None,
            deployment_id: None,
            inspector_url: None,
        }
    }

    /// Named step outputs. Fields the run never computed are omitted.
    pub fn outputs(&self) -> Vec<(&'static str, String)> {
        let mut outputs = Vec::new();

        if let Some(ref url) = self.preview_url {
            outputs.push(("PREVIEW_URL", url.clone()));
        }
        if !self.deployment_urls.is_empty() {
            // Serializing a Vec<String> cannot fail
            let urls = serde_json::to_string(&self.deployment_urls).unwrap_or_default();
            outputs.push(("DEPLOYMENT_URLS", urls));
        }
        if let Some(ref url) = self.unique_url {
            outputs.push(("DEPLOYMENT_UNIQUE_URL", url.clone()));
        }
        if let Some(ref id) = self.deployment_id {
            outputs.push(("DEPLOYMENT_ID", id.to_string()));
        }
        if let Some(ref url) = self.inspector_url {
            outputs.push(("DEPLOYMENT_INSPECTOR_URL", url.clone()));
        }
        outputs.push(("DEPLOYMENT_CREATED", self.deployment_created.to_string()));
        outputs.push(("COMMENT_CREATED", self.comment_created.to_string()));

        outputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refused_result_only_reports_flags() {
        let outputs = RunResult::refused().outputs();
        assert_eq!(
            outputs,
            vec![
                ("DEPLOYMENT_CREATED", "false".to_string()),
                ("COMMENT_CREATED", "true".to_string()),
            ]
        );
    }

    #[test]
    fn deployment_urls_are_a_json_array() {
        let result = RunResult {
            deployment_created: true,
            comment_created: false,
            preview_url: Some("https://a.example.com".to_string()),
            deployment_urls: vec![
                "https://a.example.com".to_string(),
                "https://proj.vercel.app".to_string(),
            ],
            unique_url: Some("https://proj.vercel.app".to_string()),
            deployment_id: Some(VercelDeploymentId::new("dpl_1")),
            inspector_url: Some("https://vercel.com/i/1".to_string()),
        };
        let outputs = result.outputs();
        let urls = outputs
            .iter()
            .find(|(name, _)| *name == "DEPLOYMENT_URLS")
            .map(|(_, v)| v.as_str());
        assert_eq!(
            urls,
            Some(r#"["https://a.example.com","https://proj.vercel.app"]"#)
        );
        assert_eq!(outputs.len(), 7);
    }
}
