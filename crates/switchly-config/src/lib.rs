//! Shared configuration for switchly frontends.
//!
//! TOML profiles, credential resolution (env + plaintext), and translation
//! to `switchly_core::MonitorConfig`. Consumers load a named device profile
//! and hand the resulting config straight to a coordinator.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use switchly_core::MonitorConfig;
use switchly_snmp::{AuthProtocol, PrivProtocol, SessionConfig, SnmpAuth, SnmpVersion};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named device profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Seconds between scheduled poll cycles.
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            poll_interval: default_poll_interval(),
        }
    }
}

fn default_timeout() -> u64 {
    8
}
fn default_poll_interval() -> u64 {
    30
}

/// A named device profile.
#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Device hostname or address.
    pub host: String,

    /// UDP port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Protocol version: "v1", "v2c", or "v3".
    #[serde(default = "default_version")]
    pub version: String,

    /// Read community (plaintext — prefer env).
    pub community: Option<String>,

    /// Environment variable name holding the read community.
    pub community_env: Option<String>,

    /// Separate write community for control operations.
    pub write_community: Option<String>,

    /// Environment variable name holding the write community.
    pub write_community_env: Option<String>,

    /// v3 security name.
    pub username: Option<String>,

    /// v3 auth protocol: "none", "md5", or "sha".
    pub auth_protocol: Option<String>,

    /// v3 auth password (plaintext — prefer env).
    pub auth_password: Option<String>,

    /// v3 privacy protocol: "none", "des", or "aes".
    pub priv_protocol: Option<String>,

    /// v3 privacy password (plaintext — prefer env).
    pub priv_password: Option<String>,

    /// Override timeout.
    pub timeout: Option<u64>,

    /// Override poll interval.
    pub poll_interval: Option<u64>,
}

fn default_port() -> u16 {
    161
}
fn default_version() -> String {
    "v2c".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "switchly", "switchly").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("switchly");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("SWITCHLY_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the read community from the credential chain.
pub fn resolve_community(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's community_env → env var lookup
    if let Some(ref env_name) = profile.community_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. Well-known env var
    if let Ok(val) = std::env::var("SWITCHLY_COMMUNITY") {
        return Ok(SecretString::from(val));
    }

    // 3. Plaintext in config
    if let Some(ref community) = profile.community {
        return Ok(SecretString::from(community.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Resolve the optional write community. Absence is not an error: devices
/// often accept writes on the read community.
pub fn resolve_write_community(profile: &Profile) -> Option<SecretString> {
    if let Some(ref env_name) = profile.write_community_env {
        if let Ok(val) = std::env::var(env_name) {
            return Some(SecretString::from(val));
        }
    }
    if let Ok(val) = std::env::var("SWITCHLY_WRITE_COMMUNITY") {
        return Some(SecretString::from(val));
    }
    profile
        .write_community
        .as_ref()
        .map(|c| SecretString::from(c.clone()))
}

fn parse_version(profile: &Profile) -> Result<SnmpVersion, ConfigError> {
    SnmpVersion::from_str(&profile.version).map_err(|_| ConfigError::Validation {
        field: "version".into(),
        reason: format!("expected 'v1', 'v2c', or 'v3', got '{}'", profile.version),
    })
}

/// Resolve `SnmpAuth` from a profile's version and credential fields.
pub fn resolve_auth(profile: &Profile, profile_name: &str) -> Result<SnmpAuth, ConfigError> {
    match parse_version(profile)? {
        SnmpVersion::V1 | SnmpVersion::V2c => Ok(SnmpAuth::Community {
            read: resolve_community(profile, profile_name)?,
            write: resolve_write_community(profile),
        }),
        SnmpVersion::V3 => {
            let username =
                profile
                    .username
                    .clone()
                    .ok_or_else(|| ConfigError::NoCredentials {
                        profile: profile_name.into(),
                    })?;
            let auth = match profile.auth_protocol {
                Some(ref p) => {
                    AuthProtocol::from_str(p).map_err(|_| ConfigError::Validation {
                        field: "auth_protocol".into(),
                        reason: format!("expected 'none', 'md5', or 'sha', got '{p}'"),
                    })?
                }
                None => AuthProtocol::None,
            };
            let privacy = match profile.priv_protocol {
                Some(ref p) => {
                    PrivProtocol::from_str(p).map_err(|_| ConfigError::Validation {
                        field: "priv_protocol".into(),
                        reason: format!("expected 'none', 'des', or 'aes', got '{p}'"),
                    })?
                }
                None => PrivProtocol::None,
            };
            Ok(SnmpAuth::Usm {
                username,
                auth,
                auth_password: profile
                    .auth_password
                    .as_ref()
                    .map(|p| SecretString::from(p.clone())),
                privacy,
                priv_password: profile
                    .priv_password
                    .as_ref()
                    .map(|p| SecretString::from(p.clone())),
            })
        }
    }
}

/// Build a `MonitorConfig` from a profile.
pub fn profile_to_monitor_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<MonitorConfig, ConfigError> {
    let version = parse_version(profile)?;
    let auth = resolve_auth(profile, profile_name)?;

    let mut session = SessionConfig::new(profile.host.clone(), version, auth);
    session.port = profile.port;
    session.timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));

    Ok(MonitorConfig::new(session)
        .with_poll_interval(profile.poll_interval.unwrap_or(defaults.poll_interval)))
}
