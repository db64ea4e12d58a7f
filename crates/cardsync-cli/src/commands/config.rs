use std::path::Path;

use cardsync_core::config::ClientConfig;
use cardsync_core::remote::{CredentialProvider, EnvCredential};

use crate::error::CliError;

pub fn run_config_show(db_path: &Path) -> Result<(), CliError> {
    let config = ClientConfig::load()?;
    let credential = EnvCredential::default();

    for line in format_config_lines(&config, db_path, &credential) {
        println!("{line}");
    }
    Ok(())
}

pub fn format_config_lines(
    config: &ClientConfig,
    db_path: &Path,
    credential: &impl CredentialProvider,
) -> Vec<String> {
    let config_file = ClientConfig::default_path()
        .map_or_else(|| "-".to_string(), |path| path.display().to_string());
    let token = if credential.bearer_token().is_ok() {
        "[REDACTED]"
    } else {
        "not set"
    };

    vec![
        format!("config file:    {config_file}"),
        format!("database:       {}", db_path.display()),
        format!("api base url:   {}", config.api_base_url),
        format!("timeout:        {}s", config.timeout_secs),
        format!("user agent:     {}", config.user_agent),
        format!("purge missing:  {}", config.purge_missing),
        format!("api token:      {token}"),
    ]
}
