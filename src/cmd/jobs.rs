use anyhow::Result;

use lodestone_jobs::lookup::upstream_url;
use lodestone_jobs::{JobLookup, LookupConfig, UpstreamClient};

use super::output::print_json;

pub async fn cmd_jobs(id: &str, config: LookupConfig, compact: bool) -> Result<()> {
    let client = UpstreamClient::from_config(&config)?;
    let lookup = JobLookup::new(config, client);

    let response = lookup.respond(id).await;
    print_json(&response.body, compact)?;

    if !response.is_success() {
        anyhow::bail!("lookup failed with status {}", response.status);
    }
    Ok(())
}

pub fn cmd_url(id: &str, config: &LookupConfig) {
    println!("{}", upstream_url(&config.url_template, id));
}
