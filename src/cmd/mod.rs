pub mod jobs;
pub mod output;
pub mod parse;

use anyhow::Result;

use lodestone_jobs::LookupConfig;

/// Load the config file and apply command-line overrides.
pub fn load_config(timeout: Option<u64>, url_template: Option<String>) -> Result<LookupConfig> {
    let mut config = LookupConfig::load()?;
    if let Some(secs) = timeout {
        config.timeout_secs = secs;
    }
    if let Some(template) = url_template {
        config.url_template = template;
    }
    config.validate()?;
    Ok(config)
}
