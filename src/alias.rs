// ABOUTME: Alias domain templates and their resolution against the run context.
// ABOUTME: Placeholders are substituted in one pass with URL-safe values, then lowercased.

use crate::context::RunContext;

/// Replace every character outside `[a-zA-Z0-9_~]` with `-`.
pub fn url_safe(input: &str) -> String {
    input
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '~' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Prefix `https://` unless the URL already carries a scheme.
pub fn with_scheme(url: &str) -> String {
    if url.starts_with("https://") || url.starts_with("http://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// A domain template such as `pr-{BRANCH}-{SHA}.example.com`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTemplate(String);

impl AliasTemplate {
    /// `None` for empty or whitespace-only templates, which are skipped.
    pub fn new(template: &str) -> Option<Self> {
        if template.trim().is_empty() {
            None
        } else {
            Some(Self(template.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Expand placeholders and normalize into a concrete domain.
    pub fn resolve(&self, context: &RunContext) -> String {
        let table = substitution_table(context);
        let mut resolved = String::with_capacity(self.0.len());
        let mut rest = self.0.as_str();

        while let Some(start) = rest.find('{') {
            resolved.push_str(&rest[..start]);
            let candidate = &rest[start..];

            match table
                .iter()
                .find(|(placeholder, _)| candidate.starts_with(placeholder))
            {
                Some((placeholder, value)) => {
                    resolved.push_str(value);
                    rest = &candidate[placeholder.len()..];
                }
                None => {
                    resolved.push('{');
                    rest = &candidate[1..];
                }
            }
        }
        resolved.push_str(rest);

        resolved.to_lowercase().trim().to_string()
    }
}

/// Placeholder values for a run, already URL-safe.
fn substitution_table(context: &RunContext) -> [(&'static str, String); 5] {
    let pull = context
        .pull_number()
        .map(|n| n.to_string())
        .unwrap_or_default();

    [
        ("{USER}", url_safe(context.repo().owner())),
        ("{REPO}", url_safe(context.repo().name())),
        ("{BRANCH}", url_safe(context.branch())),
        ("{SHA}", url_safe(context.revision().short())),
        ("{PR}", url_safe(&pull)),
    ]
}

/// Resolve every template, preserving order. Templates that are blank before
/// or after substitution produce no domain.
pub fn resolve_all<'a, I>(templates: I, context: &RunContext) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    templates
        .into_iter()
        .filter_map(|t| AliasTemplate::new(t))
        .map(|t| t.resolve(context))
        .filter(|domain| !domain.trim().is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::AssociatedPull;
    use crate::types::{PullNumber, RepoSlug, Revision};

    fn context(branch: &str) -> RunContext {
        RunContext::new(
            Revision::new("abcdef1234567").unwrap(),
            RepoSlug::parse("Acme/My.Site").unwrap(),
            "octocat",
            branch,
            Some(AssociatedPull {
                number: PullNumber::new(12),
                from_fork: false,
            }),
            None,
        )
    }

    #[test]
    fn resolves_branch_and_sha() {
        let template = AliasTemplate::new("pr-{BRANCH}-{SHA}").unwrap();
        assert_eq!(
            template.resolve(&context("feature/login!")),
            "pr-feature-login--abcdef1"
        );
    }

    #[test]
    fn replaces_every_occurrence() {
        let template = AliasTemplate::new("{SHA}.{SHA}.example.com").unwrap();
        assert_eq!(template.resolve(&context("main")), "abcdef1.abcdef1.example.com");
    }

    #[test]
    fn user_repo_and_pr_are_url_safe_and_lowercase() {
        let template = AliasTemplate::new("{USER}-{REPO}-pr{PR}.example.com").unwrap();
        assert_eq!(
            template.resolve(&context("main")),
            "acme-my-site-pr12.example.com"
        );
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let template = AliasTemplate::new("{BRANCH}.example.com").unwrap();
        // Braces in the branch are replaced by '-' before insertion
        assert_eq!(template.resolve(&context("{SHA}")), "-sha-.example.com");
    }

    #[test]
    fn unknown_placeholders_are_kept_literally() {
        let template = AliasTemplate::new("{NOPE}-{SHA}").unwrap();
        assert_eq!(template.resolve(&context("main")), "{nope}-abcdef1");
    }

    #[test]
    fn blank_templates_are_skipped() {
        assert!(AliasTemplate::new("   ").is_none());
        let templates = vec![
            "".to_string(),
            "a.example.com".to_string(),
            " \t".to_string(),
            "b.example.com".to_string(),
        ];
        assert_eq!(
            resolve_all(&templates, &context("main")),
            vec!["a.example.com", "b.example.com"]
        );
    }

    #[test]
    fn with_scheme_only_adds_when_missing() {
        assert_eq!(with_scheme("a.example.com"), "https://a.example.com");
        assert_eq!(with_scheme("http://a.example.com"), "http://a.example.com");
    }
}
