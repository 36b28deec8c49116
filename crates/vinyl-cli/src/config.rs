//! Configuration for the `vinyl` binary.
//!
//! Values come from, lowest to highest precedence: built-in defaults, the
//! TOML config file, `VINYL_*` environment variables, and command-line flags.

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use vinyl_auth::{AuthConfig, StaticTokenValidator, UserEntry};
use vinyl_secrets::{SecretBackend, SecretRef, SecretStore};

use crate::error::{Error, Result};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "VINYL_CONFIG";
/// Listen host override.
pub const HOST_ENV: &str = "VINYL_HOST";
/// Listen port override.
pub const PORT_ENV: &str = "VINYL_PORT";
/// Web root override. An empty value disables static files and album art.
pub const WEB_ROOT_ENV: &str = "VINYL_WEB_ROOT";
/// Log level override.
pub const LOG_LEVEL_ENV: &str = "VINYL_LOG_LEVEL";
/// Auth toggle override.
pub const AUTH_ENABLED_ENV: &str = "VINYL_AUTH_ENABLED";
/// Startup reseed override.
pub const RECREATE_ENV: &str = "VINYL_RECREATE_ON_STARTUP";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VinylConfig {
    /// Listener settings.
    pub server: ServerConfig,
    /// Store lifecycle.
    pub store: StoreConfig,
    /// Static files.
    pub assets: AssetsConfig,
    /// Bearer-token users.
    pub auth: AuthSettings,
    /// Where `secret:<name>` references are looked up.
    pub secrets: SecretBackend,
    /// Log output.
    pub logging: LoggingConfig,
}

/// `[server]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host or address to bind.
    pub host: String,
    /// TCP port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// `[store]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Drop all data and reseed at startup.
    pub recreate_on_startup: bool,
}

/// `[assets]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory holding `Images/`. Album covers are generated under it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_root: Option<PathBuf>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            web_root: Some(PathBuf::from("wwwroot")),
        }
    }
}

/// `[auth]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// When false every request runs as the developer administrator.
    pub enabled: bool,
    /// Known users. Tokens may be `secret:<name>` references.
    pub users: Vec<UserEntry>,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            users: Vec::new(),
        }
    }
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl VinylConfig {
    /// Name used for the config directory and in hints.
    pub const PROJECT_NAME: &'static str = "vinyl";

    /// `<config dir>/vinyl/config.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::PROJECT_NAME).join("config.toml"))
    }

    /// The explicit path, else `$VINYL_CONFIG`, else the default path.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        explicit
            .map(PathBuf::from)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
            .or_else(Self::default_config_path)
    }

    /// Load the resolved config file and apply environment overrides.
    ///
    /// A missing file yields defaults unless the path was given explicitly.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        let mut config = Self::load_file(explicit)?;
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)));
        config.apply_env(vars)?;
        Ok(config)
    }

    /// Load the resolved config file without environment overrides.
    pub fn load_file(explicit: Option<&str>) -> Result<Self> {
        let Some(path) = Self::resolve_config_path(explicit) else {
            return Ok(Self::default());
        };
        if !path.exists() {
            if explicit.is_some() {
                return Err(Error::config(format!(
                    "Config file {} does not exist",
                    path.display()
                )));
            }
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Parse TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Render as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Apply `VINYL_*` overrides from `vars`. Unrelated variables are ignored.
    pub fn apply_env<I>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            match key.as_str() {
                HOST_ENV => self.server.host = value,
                PORT_ENV => {
                    self.server.port = value.trim().parse().map_err(|_| {
                        Error::config(format!("{PORT_ENV} must be a port number, got '{value}'"))
                    })?;
                }
                WEB_ROOT_ENV if value.trim().is_empty() => self.assets.web_root = None,
                WEB_ROOT_ENV => self.assets.web_root = Some(PathBuf::from(value)),
                LOG_LEVEL_ENV => self.logging.level = value,
                AUTH_ENABLED_ENV => self.auth.enabled = parse_flag(AUTH_ENABLED_ENV, &value)?,
                RECREATE_ENV => {
                    self.store.recreate_on_startup = parse_flag(RECREATE_ENV, &value)?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// The settings as `VINYL_*` variables. User tokens are never exported.
    pub fn to_env_vars(&self) -> Vec<(String, String)> {
        vec![
            (HOST_ENV.to_string(), self.server.host.clone()),
            (PORT_ENV.to_string(), self.server.port.to_string()),
            (
                WEB_ROOT_ENV.to_string(),
                self.assets
                    .web_root
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            (LOG_LEVEL_ENV.to_string(), self.logging.level.clone()),
            (AUTH_ENABLED_ENV.to_string(), self.auth.enabled.to_string()),
            (
                RECREATE_ENV.to_string(),
                self.store.recreate_on_startup.to_string(),
            ),
        ]
    }

    /// First socket address `server.host:server.port` resolves to.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let target = (self.server.host.as_str(), self.server.port);
        target
            .to_socket_addrs()
            .map_err(|e| {
                Error::config(format!(
                    "Cannot resolve {}:{}: {e}",
                    self.server.host, self.server.port
                ))
            })?
            .next()
            .ok_or_else(|| {
                Error::config(format!(
                    "{}:{} resolved to no addresses",
                    self.server.host, self.server.port
                ))
            })
    }

    /// Middleware settings for `[auth]`.
    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            enabled: self.auth.enabled,
            required_role: None,
        }
    }

    /// Build the token validator, resolving `secret:` tokens through `secrets`.
    pub async fn token_validator(&self, secrets: &dyn SecretStore) -> Result<StaticTokenValidator> {
        let mut entries = Vec::with_capacity(self.auth.users.len());
        for user in &self.auth.users {
            let token = SecretRef::parse(&user.token).resolve(secrets).await?;
            entries.push(UserEntry {
                token,
                ..user.clone()
            });
        }
        Ok(StaticTokenValidator::new(entries)?)
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::config(format!(
            "{name} must be true or false, got '{value}'"
        ))),
    }
}
