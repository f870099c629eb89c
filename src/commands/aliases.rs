// ABOUTME: Aliases command implementation.
// ABOUTME: Resolves the alias domains for the current revision without deploying.

use std::env;
use std::path::Path;

use vercel_deploy::alias::with_scheme;
use vercel_deploy::config::{ActionEnv, Config, Inputs};
use vercel_deploy::context::RunContext;
use vercel_deploy::error::Result;
use vercel_deploy::github::{GitHubClient, SourceControl};
use vercel_deploy::orchestrator::planned_aliases;
use vercel_deploy::output::{Output, OutputMode};

/// Print the alias URLs a deploy of the current revision would assign.
pub async fn aliases(config_path: Option<&Path>, output: &mut Output) -> Result<()> {
    let cwd = env::current_dir()?;
    let config = Config::load(config_path, &cwd)?;
    output.mask(&config.credentials.github_token);

    let action_env = ActionEnv::from_inputs(&Inputs::from_env())?;
    let github = GitHubClient::new(
        action_env.api_url.as_str(),
        config.credentials.github_token.as_str(),
        config.repository.clone(),
    )?;

    let pulls = github.pull_requests_for_commit(&action_env.sha).await?;
    let context = RunContext::resolve(&action_env, &config.repository, pulls)?;
    let urls: Vec<String> = planned_aliases(&config.settings, &context)
        .iter()
        .map(|domain| with_scheme(domain))
        .collect();

    if output.mode() == OutputMode::Json {
        println!("{}", serde_json::to_string(&urls)?);
        return Ok(());
    }

    if urls.is_empty() {
        output.progress("No alias domains configured");
    }
    for url in &urls {
        println!("{url}");
    }
    Ok(())
}
