//! Configuration profiles for Fathom Analytics clients.
//!
//! TOML profiles, token resolution (env + plaintext + keyring), and
//! translation to `fathom_api::ClientOptions`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use fathom_api::{ApiVersion, ClientOptions, FathomApi, TransportConfig};

/// Environment variable consulted when a profile names no `token_env`.
pub const TOKEN_ENV: &str = "FATHOM_TOKEN";

const KEYRING_SERVICE: &str = "fathom";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no API token configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("client setup failed: {0}")]
    Client(#[from] fathom_api::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named API profiles.
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

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    /// Request timeout in seconds. Unset means no timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

/// A named API profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// API token (plaintext; prefer keyring or env var).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Environment variable holding the token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_env: Option<String>,

    /// Override the API base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// API version, e.g. "v1".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Override the default timeout, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "fathom", "fathom").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("fathom");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the platform config file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file. A missing file yields the defaults.
///
/// `FATHOM_`-prefixed variables override the file; `__` separates nested
/// keys, so `FATHOM_PROFILES__WORK__BASE_URL` sets `profiles.work.base_url`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("FATHOM_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(&config_path(), cfg)
}

pub fn save_config_to(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    debug!(path = %path.display(), "saved config");
    Ok(())
}

// ── Profile selection ───────────────────────────────────────────────

/// Pick `name`, or the config's default profile when `name` is `None`.
pub fn active_profile<'a>(
    cfg: &'a Config,
    name: Option<&'a str>,
) -> Result<(&'a str, &'a Profile), ConfigError> {
    let name = name
        .or(cfg.default_profile.as_deref())
        .unwrap_or("default");
    cfg.profiles
        .get(name)
        .map(|profile| (name, profile))
        .ok_or_else(|| ConfigError::Validation {
            field: "profile".into(),
            reason: format!("profile '{name}' not found"),
        })
}

// ── Token resolution ────────────────────────────────────────────────

/// Resolve the API token for a profile.
///
/// Order: the profile's `token_env` variable, then `FATHOM_TOKEN`, then the
/// plaintext `token`, then the system keyring entry `fathom/<profile>/token`.
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's token_env → env var lookup
    if let Some(val) = profile.token_env.as_deref().and_then(non_empty_env) {
        debug!(profile = profile_name, source = "token_env", "resolved API token");
        return Ok(SecretString::from(val));
    }

    // 2. Global env var
    if let Some(val) = non_empty_env(TOKEN_ENV) {
        debug!(profile = profile_name, source = TOKEN_ENV, "resolved API token");
        return Ok(SecretString::from(val));
    }

    // 3. Plaintext in config
    if let Some(token) = profile.token.as_deref().filter(|t| !t.is_empty()) {
        debug!(profile = profile_name, source = "config", "resolved API token");
        return Ok(SecretString::from(token.to_owned()));
    }

    // 4. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/token")) {
        if let Ok(secret) = entry.get_password() {
            debug!(profile = profile_name, source = "keyring", "resolved API token");
            return Ok(SecretString::from(secret));
        }
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

// ── Client construction ─────────────────────────────────────────────

/// Build `ClientOptions` from a profile, falling back to `defaults` for
/// anything the profile leaves unset.
pub fn profile_to_options(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<ClientOptions, ConfigError> {
    let version = profile
        .version
        .as_deref()
        .map(|v| {
            v.parse::<ApiVersion>().map_err(|_| ConfigError::Validation {
                field: "version".into(),
                reason: format!("unsupported API version '{v}'"),
            })
        })
        .transpose()?;

    if let Some(ref base_url) = profile.base_url {
        url::Url::parse(base_url).map_err(|_| ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("invalid URL: {base_url}"),
        })?;
    }

    let token = resolve_token(profile, profile_name)?;

    let mut transport = TransportConfig::default();
    if let Some(secs) = profile.timeout.or(defaults.timeout) {
        transport = transport.with_timeout(Duration::from_secs(secs));
    }

    Ok(ClientOptions {
        token,
        version,
        base_url: profile.base_url.clone(),
        transport,
    })
}

/// Resolve a profile and build a ready client from it.
pub fn build_client(cfg: &Config, profile_name: Option<&str>) -> Result<FathomApi, ConfigError> {
    let (name, profile) = active_profile(cfg, profile_name)?;
    let options = profile_to_options(profile, name, &cfg.defaults)?;
    debug!(profile = name, "building client from profile");
    Ok(FathomApi::new(options)?)
}
