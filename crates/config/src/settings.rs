//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation, warnings only
    #[default]
    Development,
    Staging,
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Scoring thresholds and priority bands
    #[serde(default)]
    pub qualification: QualificationConfig,

    /// Score-independent escalation triggers
    #[serde(default)]
    pub triggers: TriggerConfig,

    /// In-band chat commands
    #[serde(default)]
    pub commands: CommandConfig,

    /// Notification delivery
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit JSON log lines instead of human-readable ones
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

/// Qualification thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualificationConfig {
    /// Score at or above which a lead escalates and is high priority
    #[serde(default = "default_escalation_threshold")]
    pub escalation_threshold: u8,
    /// Lowest score of the medium priority band
    #[serde(default = "default_medium_priority_min")]
    pub medium_priority_min: u8,
    /// Placeholder first name that earns no contact points
    #[serde(default = "default_anonymous_name")]
    pub anonymous_name: String,
}

fn default_escalation_threshold() -> u8 {
    70
}

fn default_medium_priority_min() -> u8 {
    40
}

fn default_anonymous_name() -> String {
    "Anonymous".to_string()
}

impl Default for QualificationConfig {
    fn default() -> Self {
        Self {
            escalation_threshold: default_escalation_threshold(),
            medium_priority_min: default_medium_priority_min(),
            anonymous_name: default_anonymous_name(),
        }
    }
}

/// Keyword triggers that escalate regardless of score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Substrings of the user's message that request a human
    #[serde(default = "default_user_keywords")]
    pub user_keywords: Vec<String>,
    /// Whole-message replies that accept a handoff offer
    #[serde(default = "default_user_exact_phrases")]
    pub user_exact_phrases: Vec<String>,
    /// Substrings of the generated reply that promise a handoff
    #[serde(default = "default_assistant_phrases")]
    pub assistant_phrases: Vec<String>,
    /// Keyword that forces an escalation for end-to-end testing
    #[serde(default = "default_force_keyword")]
    pub force_keyword: String,
}

fn default_user_keywords() -> Vec<String> {
    vec!["connect".into(), "agent".into(), "specialist".into()]
}

fn default_user_exact_phrases() -> Vec<String> {
    vec!["yes".into(), "yes please".into()]
}

fn default_assistant_phrases() -> Vec<String> {
    vec![
        "specialist will be in touch".into(),
        "connect you with a specialist".into(),
        "noted your request".into(),
    ]
}

fn default_force_keyword() -> String {
    "#testlead".to_string()
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            user_keywords: default_user_keywords(),
            user_exact_phrases: default_user_exact_phrases(),
            assistant_phrases: default_assistant_phrases(),
            force_keyword: default_force_keyword(),
        }
    }
}

/// Chat commands handled before normal processing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandConfig {
    #[serde(default = "default_reset_command")]
    pub reset: String,
    #[serde(default = "default_handoff_command")]
    pub handoff: String,
}

fn default_reset_command() -> String {
    "/reset".to_string()
}

fn default_handoff_command() -> String {
    "/agent".to_string()
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            reset: default_reset_command(),
            handoff: default_handoff_command(),
        }
    }
}

/// Notification delivery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Operator webhook; when unset notifications are only logged
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default = "default_dispatch_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_dispatch_timeout_ms() -> u64 {
    5000
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            timeout_ms: default_dispatch_timeout_ms(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_qualification()?;
        self.validate_commands()?;
        self.validate_dispatch()?;
        Ok(())
    }

    fn validate_qualification(&self) -> Result<(), ConfigError> {
        let q = &self.qualification;

        if !(1..=100).contains(&q.escalation_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "qualification.escalation_threshold".to_string(),
                message: format!("Must be between 1 and 100, got {}", q.escalation_threshold),
            });
        }

        if q.medium_priority_min >= q.escalation_threshold {
            return Err(ConfigError::InvalidValue {
                field: "qualification.medium_priority_min".to_string(),
                message: format!(
                    "Must be below escalation_threshold ({}), got {}",
                    q.escalation_threshold, q.medium_priority_min
                ),
            });
        }

        Ok(())
    }

    fn validate_commands(&self) -> Result<(), ConfigError> {
        if self.commands.reset.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "commands.reset".to_string(),
                message: "Command must not be empty".to_string(),
            });
        }
        if self.commands.handoff.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "commands.handoff".to_string(),
                message: "Command must not be empty".to_string(),
            });
        }
        Ok(())
    }

    fn validate_dispatch(&self) -> Result<(), ConfigError> {
        if self.dispatch.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "dispatch.timeout_ms".to_string(),
                message: "Timeout must be positive".to_string(),
            });
        }

        if let Some(url) = &self.dispatch.webhook_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    field: "dispatch.webhook_url".to_string(),
                    message: format!("Expected an http(s) URL, got {}", url),
                });
            }
        } else if self.environment.is_production() {
            tracing::warn!("No dispatch.webhook_url configured; escalations will only be logged");
        }

        Ok(())
    }
}

/// Load settings from `config/` relative to the working directory
///
/// Priority: env vars > config/{env}.* > config/default.* > defaults
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from(Path::new("config"), env)
}

/// Load settings from an explicit configuration directory
pub fn load_settings_from(dir: &Path, env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::from(dir.join("default")).required(false));

    if let Some(env_name) = env {
        builder = builder.add_source(File::from(dir.join(env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("LEAD_AGENT")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}
