//! Configuration management commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::cli::output::{print_formatted, print_success, OutputFormat};
use crate::config::Config;
use crate::ui::theme::ThemePreset;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Get a specific config value
    Get {
        /// Config key (e.g., "api.base_url", "appearance.theme")
        key: String,
    },

    /// Set a config value in the config file
    Set {
        /// Config key (e.g., "api.base_url", "appearance.theme")
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}

#[derive(Serialize)]
struct ConfigPathResult {
    path: String,
    exists: bool,
}

#[derive(Serialize)]
struct ConfigValueResult<'a> {
    key: &'a str,
    value: String,
}

pub async fn run(command: ConfigCommands, format: OutputFormat, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => show(format),
        ConfigCommands::Get { key } => get(&key, format),
        ConfigCommands::Set { key, value } => set(&key, &value, quiet),
        ConfigCommands::Path => path(format),
    }
}

fn show(format: OutputFormat) -> Result<()> {
    let config = Config::load()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Text => println!("{}", toml::to_string_pretty(&config)?),
    }

    Ok(())
}

fn get(key: &str, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let result = ConfigValueResult {
        key,
        value: get_config_value(&config, key)?,
    };

    print_formatted(&result, format, |r| r.value.clone());
    Ok(())
}

fn get_config_value(config: &Config, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["api", "base_url"] => Ok(config.api.base_url.clone()),
        ["api", "timeout_secs"] => Ok(config.api.timeout_secs.to_string()),
        ["appearance", "theme"] => Ok(config.appearance.theme.name().to_lowercase()),
        _ => anyhow::bail!("Unknown config key: {}", key),
    }
}

fn set(key: &str, value: &str, quiet: bool) -> Result<()> {
    // Environment overrides must not leak into the file
    let path = Config::config_path()?;
    let mut config = Config::load_from(&path)?;

    set_config_value(&mut config, key, value)?;
    config.save_to(&path)?;

    print_success(&format!("Set {} = {}", key, value), quiet);
    Ok(())
}

fn set_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["api", "base_url"] => {
            let url = value.trim().trim_end_matches('/');
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                anyhow::bail!("Base URL must start with http:// or https://");
            }
            config.api.base_url = url.to_string();
        }
        ["api", "timeout_secs"] => {
            let secs: u64 = value.trim().parse()?;
            if secs == 0 {
                anyhow::bail!("Timeout must be at least one second");
            }
            config.api.timeout_secs = secs;
        }
        ["appearance", "theme"] => {
            config.appearance.theme = ThemePreset::from_name(value.trim())
                .ok_or_else(|| anyhow::anyhow!("Unknown theme: {}", value))?;
        }
        _ => anyhow::bail!("Unknown config key: {}", key),
    }

    Ok(())
}

fn path(format: OutputFormat) -> Result<()> {
    let path = Config::config_path()?;
    let exists = path.exists();

    let result = ConfigPathResult {
        path: path.to_string_lossy().to_string(),
        exists,
    };

    print_formatted(&result, format, |r| {
        format!("{}{}", r.path, if r.exists { "" } else { " (not found)" })
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_known_keys() {
        let config = Config::default();
        assert_eq!(
            get_config_value(&config, "api.base_url").unwrap(),
            "http://localhost:8080"
        );
        assert_eq!(get_config_value(&config, "api.timeout_secs").unwrap(), "20");
        assert_eq!(get_config_value(&config, "appearance.theme").unwrap(), "neon");
    }

    #[test]
    fn test_get_unknown_key() {
        assert!(get_config_value(&Config::default(), "api.nope").is_err());
    }

    #[test]
    fn test_set_base_url_trims_slash() {
        let mut config = Config::default();
        set_config_value(&mut config, "api.base_url", "https://hack.example/").unwrap();
        assert_eq!(config.api.base_url, "https://hack.example");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(set_config_value(&mut config, "api.base_url", "ftp://x").is_err());
        assert!(set_config_value(&mut config, "api.timeout_secs", "0").is_err());
        assert!(set_config_value(&mut config, "api.timeout_secs", "soon").is_err());
        assert!(set_config_value(&mut config, "appearance.theme", "sepia").is_err());
        assert_eq!(config.api.timeout_secs, 20);
    }

    #[test]
    fn test_set_theme() {
        let mut config = Config::default();
        set_config_value(&mut config, "appearance.theme", "midnight").unwrap();
        assert_eq!(config.appearance.theme, ThemePreset::Midnight);
    }
}
