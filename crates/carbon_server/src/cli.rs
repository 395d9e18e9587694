use std::net::IpAddr;
use std::path::PathBuf;

use carbon_engine::CompletionSettings;
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "carbon-server",
    version,
    about = "Estimates the carbon footprint of loading a web page"
)]
pub struct Cli {
    #[arg(long, env = "PORT", default_value_t = 3000, help = "Port to listen on")]
    pub port: u16,
    #[arg(long, default_value = "0.0.0.0", help = "Address to bind")]
    pub host: IpAddr,
    #[arg(long, env = "CARBON_SETTINGS", help = "RON settings file with model and projection constants")]
    pub settings: Option<PathBuf>,
    #[arg(
        long,
        env = "OPENAI_API_KEY",
        hide_env_values = true,
        help = "API key for narrative recommendations"
    )]
    pub openai_api_key: Option<String>,
    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com")]
    pub openai_base_url: String,
    #[arg(long, default_value = "gpt-3.5-turbo-instruct")]
    pub openai_model: String,
    #[arg(long, help = "Path to the lighthouse CLI (overrides the settings file)")]
    pub lighthouse_bin: Option<PathBuf>,
    #[arg(long, env = "CARBON_LOG", default_value = "info")]
    pub log_level: String,
    #[arg(long, help = "Also write logs to this file")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Completion settings when an API key was supplied.
    pub fn completion_settings(&self) -> Option<CompletionSettings> {
        let api_key = self.openai_api_key.as_deref()?.trim();
        if api_key.is_empty() {
            return None;
        }
        Some(CompletionSettings {
            base_url: self.openai_base_url.clone(),
            model: self.openai_model.clone(),
            ..CompletionSettings::new(api_key)
        })
    }
}
