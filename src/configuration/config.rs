#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::domain::models::ClientName;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

pub const DEFAULT_API_URL: &str = "https://oxhbyt3qak.execute-api.us-east-1.amazonaws.com/prod";

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ApiURL,
    Client,
    ConfigFile,
    HealthCheckTimeout,
    Username,
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn config_path() -> path::PathBuf {
        #[cfg(not(target_os = "macos"))]
        let config_dir = dirs::config_dir();
        #[cfg(target_os = "macos")]
        let config_dir = dirs::home_dir().map(|e| return e.join(".config"));

        return config_dir
            .unwrap_or_else(|| return path::PathBuf::from("."))
            .join("infinitiview/config.toml");
    }

    pub fn default(key: ConfigKey) -> String {
        if key == ConfigKey::Username {
            let mut user = env::var("USER").unwrap_or_else(|_| return "".to_string());
            if user.is_empty() {
                user = "User".to_string();
            }

            return user;
        }

        let default_client = ClientName::InfinitiView.to_string();
        let config_path = Config::config_path().to_string_lossy().to_string();

        let res = match key {
            ConfigKey::ApiURL => DEFAULT_API_URL,
            ConfigKey::Client => default_client.as_str(),
            ConfigKey::HealthCheckTimeout => "1000",

            // Special
            ConfigKey::ConfigFile => config_path.as_str(),
            ConfigKey::Username => "",
        };

        return res.to_string();
    }

    fn possible_values(cmd: &Command, key: ConfigKey) -> Vec<String> {
        let long = key.to_string();
        return cmd
            .get_arguments()
            .find(|e| return e.get_long() == Some(long.as_str()))
            .map(|arg| {
                return arg
                    .get_possible_values()
                    .iter()
                    .map(|e| return e.get_name().to_string())
                    .collect::<Vec<String>>();
            })
            .unwrap_or_default();
    }

    /// Applies values from a TOML config file. Empty strings leave the
    /// default in place, and keys with a fixed value set are validated
    /// against the matching CLI flag.
    async fn load_file(cmd: &Command, config_path: &path::Path) -> Result<()> {
        let doc = fs::read_to_string(config_path)
            .await?
            .parse::<toml_edit::Document>()?;

        for key in ConfigKey::iter() {
            let item = match doc.get(&key.to_string()) {
                Some(item) => item,
                None => continue,
            };

            let val = match (item.as_integer(), item.as_str()) {
                (Some(num), _) => num.to_string(),
                (_, Some(text)) if !text.is_empty() => text.to_string(),
                _ => continue,
            };

            let allowed = Config::possible_values(cmd, key);
            if !allowed.is_empty() && !allowed.contains(&val) {
                bail!(format!(
                    "{} has an invalid value for key '{key}': {val}\nPossible values are: {}",
                    config_path.to_string_lossy(),
                    allowed.join(", ")
                ));
            }

            Config::set(key, &val);
        }

        return Ok(());
    }

    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let config_file = clap_arg_matches
            .iter()
            .filter_map(|matches| {
                return matches
                    .try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
                    .ok()
                    .flatten()
                    .cloned();
            })
            .last()
            .unwrap_or_else(|| return Config::default(ConfigKey::ConfigFile));

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            Config::load_file(&cmd, &config_path).await?;
        }

        // Flags and environment variables win over the file.
        for matches in &clap_arg_matches {
            for key in ConfigKey::iter() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if !val.is_empty() {
                        Config::set(key, val);
                    }
                }
            }
        }

        if Config::get(ConfigKey::HealthCheckTimeout)
            .parse::<u64>()
            .is_err()
        {
            bail!(format!(
                "Invalid value for '{}': {}. Expected a number of milliseconds.",
                ConfigKey::HealthCheckTimeout,
                Config::get(ConfigKey::HealthCheckTimeout)
            ));
        }

        tracing::debug!(
            username = Config::get(ConfigKey::Username),
            client = Config::get(ConfigKey::Client),
            api_url = Config::get(ConfigKey::ApiURL),
            health_check_timeout = Config::get(ConfigKey::HealthCheckTimeout),
            "config"
        );

        return Ok(());
    }

    /// Default config file contents, one commented entry per key.
    pub fn serialize_default(cmd: Command) -> String {
        return ConfigKey::iter()
            .filter_map(|key| {
                let description = match key {
                    ConfigKey::ApiURL => "Base URL of the question answering service.",
                    ConfigKey::Client => "The question answering service to talk to.",
                    ConfigKey::HealthCheckTimeout => "Time to wait in milliseconds before timing out when doing a healthcheck for the service.",
                    ConfigKey::Username => "Your name as displayed next to your messages.",
                    ConfigKey::ConfigFile => return None,
                };

                let mut comment = format!("# {description}");
                let allowed = Config::possible_values(&cmd, key);
                if !allowed.is_empty() {
                    comment = format!("{comment} [possible values: {}]", allowed.join(", "));
                }

                let entry = match key {
                    ConfigKey::Username => format!("# {key} = \"\""),
                    ConfigKey::HealthCheckTimeout => format!("{key} = {}", Config::default(key)),
                    _ => format!("{key} = \"{}\"", Config::default(key)),
                };

                return Some(format!("{comment}\n{entry}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");
    }
}
