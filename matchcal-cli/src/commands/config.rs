use std::path::Path;

use anyhow::Result;
use matchcal_core::MatchCalConfig;
use matchcal_core::config::API_KEY_ENV;
use owo_colors::OwoColorize;

pub fn run(path: Option<&Path>) -> Result<()> {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => MatchCalConfig::config_path()?,
    };

    if !config_path.exists() {
        MatchCalConfig::create_default_config(&config_path)?;
        println!("{} {}", "Created".green(), config_path.display());
    }

    let config = MatchCalConfig::load_from(&config_path)?;

    println!("{}", "Paths".bold());
    println!("  Config:   {}", config_path.display());
    println!();

    let api_key = if config.source.resolve_api_key().is_ok() {
        "set".green().to_string()
    } else {
        format!("missing (set {} or source.api_key)", API_KEY_ENV)
            .red()
            .to_string()
    };
    println!("{}", "Source".bold());
    println!("  API:      {}", config.source.api_base_url);
    println!("  API key:  {}", api_key);
    println!();

    println!("{}", "Effective settings".bold());
    print!("{}", config.to_toml()?);

    Ok(())
}
