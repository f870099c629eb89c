// ABOUTME: Deploy command implementation.
// ABOUTME: Wires configuration, GitHub, and Vercel into the orchestrator and writes step outputs.

use std::env;
use std::path::{Path, PathBuf};

use vercel_deploy::config::{ActionEnv, Config, Inputs};
use vercel_deploy::diagnostics::Diagnostics;
use vercel_deploy::error::Result;
use vercel_deploy::github::GitHubClient;
use vercel_deploy::orchestrator::Orchestrator;
use vercel_deploy::output::{ActionOutputs, Output, OutputMode};
use vercel_deploy::vercel::{DEFAULT_API_URL, VercelCli, VercelCliConfig};

/// Run the pipeline once for the revision in the environment.
pub async fn deploy(config_path: Option<&Path>, output: &mut Output) -> Result<()> {
    output.start_timer();
    let cwd = env::current_dir()?;
    let config = Config::load(config_path, &cwd)?;
    for secret in config.credentials.secrets() {
        output.mask(secret);
    }

    let inputs = Inputs::from_env();
    let action_env = ActionEnv::from_inputs(&inputs)?;

    let github = GitHubClient::new(
        action_env.api_url.as_str(),
        config.credentials.github_token.as_str(),
        config.repository.clone(),
    )?;
    let vercel = VercelCli::new(vercel_config(&config, &inputs));

    output.progress(&format!(
        "Deploying {} at {} to Vercel",
        config.repository,
        action_env.sha.short()
    ));

    let mut orchestrator = Orchestrator::new(&config.settings, &github, &vercel);
    let result = orchestrator.run(&action_env, &config.repository).await;
    report_warnings(output, orchestrator.diagnostics());
    let result = result?;

    let outputs = ActionOutputs::new(action_env.output_file.clone());
    if outputs.path().is_some() || output.mode() != OutputMode::Json {
        outputs.write(&result.outputs())?;
    }
    output.result(&result);

    match result.preview_url {
        Some(ref url) => output.success(&format!("Deployed to {url}")),
        None => output.success("Deployment skipped"),
    }
    Ok(())
}

/// CLI settings; `VERCEL_CLI` and `VERCEL_API_URL` override the defaults.
fn vercel_config<F>(config: &Config, inputs: &Inputs<F>) -> VercelCliConfig
where
    F: Fn(&str) -> Option<String>,
{
    VercelCliConfig {
        binary: PathBuf::from(inputs.get("VERCEL_CLI").unwrap_or_else(|| "vercel".to_string())),
        token: config.credentials.vercel_token.clone(),
        org_id: config.credentials.vercel_org_id.clone(),
        project_id: config.credentials.vercel_project_id.clone(),
        scope: config.settings.vercel_scope.clone(),
        working_directory: config.settings.working_directory.clone(),
        api_url: inputs
            .get("VERCEL_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
    }
}

fn report_warnings(output: &Output, diag: &Diagnostics) {
    for warning in diag.warnings() {
        output.warning(&warning.message);
    }
}
