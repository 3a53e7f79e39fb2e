//! Runtime configuration.
//!
//! Precedence (lowest to highest):
//! 1. Programmatic defaults ([`CliConfig::default`])
//! 2. `collective-bot.toml` in the working directory, or the file passed with `--config`
//! 3. Environment variables (`COLLECTIVE_BOT_*`)
//! 4. Command-line flags ([`CliOverrides`])

use std::collections::BTreeMap;
use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use github::DEFAULT_API_BASE_URL;
use issues::LabelColor;
use serde::{Deserialize, Serialize};

/// Config file read when `--config` is not given. Missing is fine.
pub const DEFAULT_CONFIG_FILE: &str = "collective-bot.toml";

/// Prefix for environment overrides, e.g. `COLLECTIVE_BOT_LABEL_COLOR`.
pub const ENV_PREFIX: &str = "COLLECTIVE_BOT_";

/// Log line format on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable.
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// GitHub REST root.
    pub api_base_url: String,
    /// Token forwarded verbatim as a bearer token.
    pub token: Option<String>,
    /// `User-Agent` sent to GitHub.
    pub user_agent: String,
    /// Colour for labels the reconciler creates.
    pub label_color: LabelColor,
    /// Log format.
    pub log_format: LogFormat,
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    pub log_level: String,
    /// OTLP gRPC endpoint; spans are exported only when set.
    pub otlp_endpoint: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token: None,
            user_agent: concat!("collective-bot/", env!("CARGO_PKG_VERSION")).to_string(),
            label_color: LabelColor::default(),
            log_format: LogFormat::Pretty,
            log_level: "info".to_string(),
            otlp_endpoint: None,
        }
    }
}

/// Values supplied on the command line. Unset fields leave lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_format: Option<LogFormat>,
}

impl CliConfig {
    /// Loads configuration from `file` (or [`DEFAULT_CONFIG_FILE`]), the
    /// environment, and `overrides`.
    pub fn load(file: Option<&Path>, overrides: &CliOverrides) -> Result<Self, figment::Error> {
        let toml = match file {
            Some(path) if !path.is_file() => {
                return Err(format!("config file {} not found", path.display()).into());
            }
            Some(path) => Toml::file(path),
            None => Toml::file(DEFAULT_CONFIG_FILE),
        };

        Figment::new()
            .merge(Serialized::defaults(CliConfig::default()))
            .merge(toml)
            .merge(env_layer())
            .merge(Serialized::defaults(overrides))
            .extract()
    }

    /// Connection settings for the GitHub adapter.
    pub fn github(&self) -> github::GithubConfig {
        github::GithubConfig {
            api_base_url: self.api_base_url.clone(),
            token: self.token.clone(),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// `COLLECTIVE_BOT_*` variables with their values kept as strings.
///
/// `Env` on its own parses values, turning `COLLECTIVE_BOT_LABEL_COLOR=000000`
/// into the integer `0`. Every configuration field is textual.
fn env_layer() -> Serialized<BTreeMap<String, String>> {
    let vars = Env::prefixed(ENV_PREFIX)
        .iter()
        .map(|(key, value)| (key.into_string(), value))
        .collect();
    Serialized::defaults(vars)
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn defaults_apply_without_file_or_env() {
        Jail::expect_with(|_jail| {
            let config = CliConfig::load(None, &CliOverrides::default())?;
            assert_eq!(config, CliConfig::default());
            assert_eq!(config.label_color.as_str(), "fbca04");
            Ok(())
        });
    }

    #[test]
    fn file_then_env_then_flags() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"
                    api_base_url = "https://ghe.example.com/api/v3"
                    label_color = "0e8a16"
                    log_format = "json"
                "#,
            )?;
            jail.set_env("COLLECTIVE_BOT_LABEL_COLOR", "c5def5");
            jail.set_env("COLLECTIVE_BOT_OTLP_ENDPOINT", "http://localhost:4317");

            let config = CliConfig::load(
                None,
                &CliOverrides {
                    log_format: Some(LogFormat::Pretty),
                    ..CliOverrides::default()
                },
            )?;

            assert_eq!(config.api_base_url, "https://ghe.example.com/api/v3");
            assert_eq!(config.label_color.as_str(), "c5def5");
            assert_eq!(config.log_format, LogFormat::Pretty);
            assert_eq!(config.otlp_endpoint.as_deref(), Some("http://localhost:4317"));
            Ok(())
        });
    }

    #[test]
    fn all_digit_env_values_stay_strings() {
        Jail::expect_with(|jail| {
            jail.set_env("COLLECTIVE_BOT_LABEL_COLOR", "000000");
            jail.set_env("COLLECTIVE_BOT_TOKEN", "0042");

            let config = CliConfig::load(None, &CliOverrides::default())?;

            assert_eq!(config.label_color.as_str(), "000000");
            assert_eq!(config.token.as_deref(), Some("0042"));
            Ok(())
        });

        Jail::expect_with(|jail| {
            jail.set_env("COLLECTIVE_BOT_LABEL_COLOR", "123456");
            let config = CliConfig::load(None, &CliOverrides::default())?;
            assert_eq!(config.label_color.as_str(), "123456");
            Ok(())
        });
    }

    #[test]
    fn invalid_label_color_is_rejected() {
        Jail::expect_with(|_jail| {
            let overrides = CliOverrides {
                label_color: Some("#fbca04".to_string()),
                ..CliOverrides::default()
            };
            assert!(CliConfig::load(None, &overrides).is_err());
            Ok(())
        });
    }

    #[test]
    fn explicit_config_file_must_exist() {
        Jail::expect_with(|_jail| {
            let result = CliConfig::load(Some(Path::new("missing.toml")), &CliOverrides::default());
            assert!(result.is_err());
            Ok(())
        });
    }
}
