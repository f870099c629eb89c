// ABOUTME: Configuration types and parsing for vercel-deploy.
// ABOUTME: Optional YAML defaults overlaid with GitHub Actions inputs from the environment.

mod action_env;
mod credentials;
mod deserialize;
mod inputs;

pub use action_env::{ActionEnv, DEFAULT_SERVER_URL};
pub use credentials::Credentials;
pub use inputs::Inputs;

use crate::error::{Error, Result};
use crate::types::RepoSlug;
use deserialize::deserialize_list;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "vercel-deploy.yml";
pub const CONFIG_FILENAME_ALT: &str = "vercel-deploy.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".github/vercel-deploy.yml";

/// Non-secret behaviour switches. Loadable from YAML; inputs override.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    #[serde(default = "default_true")]
    pub production: bool,

    #[serde(default = "default_true")]
    pub github_deployment: bool,

    #[serde(default)]
    pub github_deployment_env: Option<String>,

    #[serde(default = "default_true")]
    pub create_comment: bool,

    #[serde(default = "default_true")]
    pub delete_existing_comment: bool,

    #[serde(default = "default_true")]
    pub attach_commit_metadata: bool,

    #[serde(default)]
    pub deploy_pr_from_fork: bool,

    #[serde(default)]
    pub trim_commit_message: bool,

    #[serde(default)]
    pub prebuilt: bool,

    #[serde(default = "default_pr_labels", deserialize_with = "deserialize_list")]
    pub pr_labels: Vec<String>,

    #[serde(default, deserialize_with = "deserialize_list")]
    pub alias_domains: Vec<String>,

    #[serde(default)]
    pub pr_preview_domain: Option<String>,

    #[serde(default)]
    pub vercel_scope: Option<String>,

    #[serde(default)]
    pub working_directory: Option<PathBuf>,

    #[serde(default, deserialize_with = "deserialize_list")]
    pub build_env: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_pr_labels() -> Vec<String> {
    vec!["deployed".to_string()]
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            production: true,
            github_deployment: true,
            github_deployment_env: None,
            create_comment: true,
            delete_existing_comment: true,
            attach_commit_metadata: true,
            deploy_pr_from_fork: false,
            trim_commit_message: false,
            prebuilt: false,
            pr_labels: default_pr_labels(),
            alias_domains: Vec::new(),
            pr_preview_domain: None,
            vercel_scope: None,
            working_directory: None,
            build_env: Vec::new(),
        }
    }
}

impl Settings {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load the first config file found in `dir`, or defaults when there is none.
    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!("Loading settings from {}", path.display());
                return Self::load(path);
            }
        }

        Ok(Self::default())
    }

    /// Overlay values set through action inputs.
    pub fn apply_inputs<F>(&mut self, inputs: &Inputs<F>) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let flags: [(&str, &mut bool); 8] = [
            ("PRODUCTION", &mut self.production),
            ("GITHUB_DEPLOYMENT", &mut self.github_deployment),
            ("CREATE_COMMENT", &mut self.create_comment),
            ("DELETE_EXISTING_COMMENT", &mut self.delete_existing_comment),
            ("ATTACH_COMMIT_METADATA", &mut self.attach_commit_metadata),
            ("DEPLOY_PR_FROM_FORK", &mut self.deploy_pr_from_fork),
            ("TRIM_COMMIT_MESSAGE", &mut self.trim_commit_message),
            ("PREBUILT", &mut self.prebuilt),
        ];
        for (key, slot) in flags {
            if let Some(value) = inputs.boolean(key)? {
                *slot = value;
            }
        }

        if let Some(labels) = inputs.list("PR_LABELS") {
            self.pr_labels = labels;
        }
        if let Some(domains) = inputs.list("ALIAS_DOMAINS") {
            self.alias_domains = domains;
        }
        if let Some(build_env) = inputs.list("BUILD_ENV") {
            self.build_env = build_env;
        }

        if let Some(env) = inputs.get("GITHUB_DEPLOYMENT_ENV") {
            self.github_deployment_env = Some(env);
        }
        if let Some(domain) = inputs.get("PR_PREVIEW_DOMAIN") {
            self.pr_preview_domain = Some(domain);
        }
        if let Some(scope) = inputs.get("VERCEL_SCOPE") {
            self.vercel_scope = Some(scope);
        }
        if let Some(dir) = inputs.get("WORKING_DIRECTORY") {
            self.working_directory = Some(PathBuf::from(dir));
        }

        Ok(())
    }

    /// Environment label for the GitHub deployment record.
    pub fn environment(&self) -> String {
        match self.github_deployment_env {
            Some(ref env) => env.clone(),
            None if self.production => "Production".to_string(),
            None => "Preview".to_string(),
        }
    }
}

/// Everything the run needs that is not discovered from external systems.
#[derive(Debug, Clone)]
pub struct Config {
    pub repository: RepoSlug,
    pub credentials: Credentials,
    pub settings: Settings,
}

impl Config {
    /// Resolve credentials and repository from inputs and overlay them onto `settings`.
    pub fn from_inputs<F>(inputs: &Inputs<F>, mut settings: Settings) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let repository = inputs.required(&["GITHUB_REPOSITORY"])?;
        let repository = RepoSlug::parse(&repository)
            .map_err(|e| Error::InvalidConfig(format!("GITHUB_REPOSITORY: {e}")))?;

        let credentials = Credentials::from_inputs(inputs)?;
        settings.apply_inputs(inputs)?;

        Ok(Config {
            repository,
            credentials,
            settings,
        })
    }

    /// Load settings from `path` (or discover them in `dir`) and overlay environment inputs.
    pub fn load(path: Option<&Path>, dir: &Path) -> Result<Self> {
        let settings = match path {
            Some(path) => Settings::load(path)?,
            None => Settings::discover(dir)?,
        };
        Self::from_inputs(&Inputs::from_env(), settings)
    }
}
