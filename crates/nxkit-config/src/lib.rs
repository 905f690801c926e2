//! Configuration for nxkit.
//!
//! TOML device inventory, credential resolution (env + keyring + plaintext),
//! and translation to `nxkit_core` transport and filter settings. The CLI
//! layers its global flags on top.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use nxkit_core::{DeviceCredential, InterfaceFilter, Scheme, TlsMode, TransportConfig};

/// Keyring service name; entries are keyed `"{device}/password"`.
pub const KEYRING_SERVICE: &str = "nxkit";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no password configured for device '{device}'")]
    NoCredentials { device: String },

    #[error("unknown device '{device}'")]
    UnknownDevice { device: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

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
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,

    /// Switches to query, in the order they are reported.
    #[serde(default)]
    pub devices: Vec<DeviceProfile>,
}

impl Config {
    pub fn device(&self, name: &str) -> Option<&DeviceProfile> {
        self.devices.iter().find(|d| d.name == name)
    }

    pub fn device_mut(&mut self, name: &str) -> Option<&mut DeviceProfile> {
        self.devices.iter_mut().find(|d| d.name == name)
    }

    /// Point a device at the keyring and drop its plaintext password.
    pub fn use_keyring(&mut self, name: &str) -> Result<(), ConfigError> {
        let profile = self
            .device_mut(name)
            .ok_or_else(|| ConfigError::UnknownDevice {
                device: name.to_owned(),
            })?;
        profile.keyring = true;
        profile.password = None;
        Ok(())
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    /// "http" or "https".
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Accept self-signed switch certificates over https.
    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate (PEM).
    pub ca_cert: Option<PathBuf>,

    /// Name prefix that marks a physical interface.
    #[serde(default = "default_interface_prefix")]
    pub interface_prefix: String,

    /// Directory saved reports are written to.
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            timeout: default_timeout(),
            insecure: false,
            ca_cert: None,
            interface_prefix: default_interface_prefix(),
            report_dir: default_report_dir(),
        }
    }
}

fn default_scheme() -> String {
    "http".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_interface_prefix() -> String {
    InterfaceFilter::DEFAULT_PREFIX.into()
}
fn default_report_dir() -> PathBuf {
    PathBuf::from(".")
}

/// One switch in the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeviceProfile {
    /// Label used in logs and for keyring lookup.
    pub name: String,

    /// Host, host:port, or full URL of the switch.
    pub address: String,

    pub username: String,

    /// Password (plaintext; prefer keyring or env var).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Environment variable name containing the password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_env: Option<String>,

    /// Look the password up in the system keyring.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub keyring: bool,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "nxkit", "nxkit").map_or_else(
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
    p.push("nxkit");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the Config from `path` + environment.
///
/// A missing file yields the defaults with no devices. Environment
/// overrides use `NXKIT_` and `__` as the nesting separator, e.g.
/// `NXKIT_DEFAULTS__TIMEOUT=60`.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("NXKIT_").split("__").ignore(&["config"]));

    let config: Config = figment.extract()?;
    debug!(path = %path.display(), devices = config.devices.len(), "config loaded");
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

fn keyring_entry(device: &str) -> Result<keyring::Entry, ConfigError> {
    Ok(keyring::Entry::new(
        KEYRING_SERVICE,
        &format!("{device}/password"),
    )?)
}

/// Resolve a device's password from the credential chain.
pub fn resolve_password(profile: &DeviceProfile) -> Result<SecretString, ConfigError> {
    // 1. Profile's password_env → env var lookup
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring, when enabled for this device
    if profile.keyring {
        let lookup =
            keyring_entry(&profile.name).and_then(|e| e.get_password().map_err(ConfigError::from));
        match lookup {
            Ok(secret) => return Ok(SecretString::from(secret)),
            Err(e) => debug!(device = %profile.name, error = %e, "keyring lookup failed"),
        }
    }

    // 3. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        device: profile.name.clone(),
    })
}

/// Store a device password in the system keyring.
pub fn store_password(device: &str, password: &SecretString) -> Result<(), ConfigError> {
    keyring_entry(device)?.set_password(password.expose_secret())?;
    Ok(())
}

/// Validate the inventory and resolve every device's credentials, in
/// file order.
pub fn device_credentials(cfg: &Config) -> Result<Vec<DeviceCredential>, ConfigError> {
    let mut seen = HashSet::new();
    cfg.devices
        .iter()
        .map(|profile| {
            if profile.name.trim().is_empty() {
                return Err(ConfigError::Validation {
                    field: "devices.name".into(),
                    reason: "device name must not be empty".into(),
                });
            }
            if !seen.insert(profile.name.as_str()) {
                return Err(ConfigError::Validation {
                    field: "devices.name".into(),
                    reason: format!("duplicate device '{}'", profile.name),
                });
            }
            if profile.address.trim().is_empty() {
                return Err(ConfigError::Validation {
                    field: format!("devices.{}.address", profile.name),
                    reason: "address must not be empty".into(),
                });
            }
            let password = resolve_password(profile)?;
            Ok(DeviceCredential::new(
                &profile.name,
                &profile.address,
                &profile.username,
                password,
            ))
        })
        .collect()
}

// ── Translation to core settings ────────────────────────────────────

pub fn parse_scheme(raw: &str) -> Result<Scheme, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "http" => Ok(Scheme::Http),
        "https" => Ok(Scheme::Https),
        other => Err(ConfigError::Validation {
            field: "scheme".into(),
            reason: format!("expected 'http' or 'https', got '{other}'"),
        }),
    }
}

/// Build the HTTP transport settings from `[defaults]`.
pub fn transport_config(defaults: &Defaults) -> Result<TransportConfig, ConfigError> {
    let scheme = parse_scheme(&defaults.scheme)?;

    let tls = if defaults.insecure {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = defaults.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };

    if defaults.timeout == 0 {
        return Err(ConfigError::Validation {
            field: "timeout".into(),
            reason: "must be at least 1 second".into(),
        });
    }

    Ok(TransportConfig {
        scheme,
        tls,
        timeout: Duration::from_secs(defaults.timeout),
    })
}

pub fn interface_filter(defaults: &Defaults) -> InterfaceFilter {
    InterfaceFilter::new(defaults.interface_prefix.clone())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    fn profile(name: &str) -> DeviceProfile {
        DeviceProfile {
            name: name.into(),
            address: "10.0.0.1".into(),
            username: "admin".into(),
            password: Some("plain".into()),
            password_env: None,
            keyring: false,
        }
    }

    #[test]
    fn use_keyring_drops_plaintext() {
        let mut cfg = Config {
            defaults: Defaults::default(),
            devices: vec![profile("leaf-01")],
        };
        cfg.use_keyring("leaf-01").unwrap();
        let device = cfg.device("leaf-01").unwrap();
        assert!(device.keyring);
        assert!(device.password.is_none());

        let err = cfg.use_keyring("nope").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownDevice { ref device } if device == "nope"));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("absent.toml")).unwrap();
        assert!(cfg.devices.is_empty());
        assert_eq!(cfg.defaults.scheme, "http");
        assert_eq!(cfg.defaults.timeout, 30);
        assert_eq!(cfg.defaults.interface_prefix, "Eth");
        assert_eq!(cfg.defaults.report_dir, PathBuf::from("."));
    }

    #[test]
    fn devices_keep_file_order() {
        let (_dir, path) = write_config(
            r#"
[defaults]
scheme = "https"
insecure = true

[[devices]]
name = "zeta"
address = "10.0.0.9"
username = "admin"
password = "one"

[[devices]]
name = "alpha"
address = "10.0.0.1"
username = "ops"
password_env = "NXKIT_TEST_ALPHA_PASSWORD_UNSET"
"#,
        );
        let cfg = load_config(&path).unwrap();
        let names: Vec<_> = cfg.devices.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha"]);
        assert_eq!(cfg.defaults.scheme, "https");
        assert!(cfg.defaults.insecure);
        assert_eq!(
            cfg.device("alpha").unwrap().password_env.as_deref(),
            Some("NXKIT_TEST_ALPHA_PASSWORD_UNSET")
        );
    }

    #[test]
    fn plaintext_password_is_last_resort() {
        let mut p = profile("sw1");
        p.password_env = Some("NXKIT_TEST_SW1_PASSWORD_UNSET".into());
        let secret = resolve_password(&p).unwrap();
        assert_eq!(secret.expose_secret(), "plain");
    }

    #[test]
    fn no_password_anywhere_is_an_error() {
        let mut p = profile("sw1");
        p.password = None;
        match resolve_password(&p) {
            Err(ConfigError::NoCredentials { device }) => assert_eq!(device, "sw1"),
            other => panic!("expected NoCredentials, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_device_names_rejected() {
        let cfg = Config {
            defaults: Defaults::default(),
            devices: vec![profile("sw1"), profile("sw1")],
        };
        let err = device_credentials(&cfg).unwrap_err();
        assert!(err.to_string().contains("duplicate device 'sw1'"), "got: {err}");
    }

    #[test]
    fn credentials_follow_inventory() {
        let cfg = Config {
            defaults: Defaults::default(),
            devices: vec![profile("b"), profile("a")],
        };
        let creds = device_credentials(&cfg).unwrap();
        let names: Vec<_> = creds.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(creds[0].username, "admin");
    }

    #[test]
    fn transport_settings_from_defaults() {
        let defaults = Defaults {
            scheme: "HTTPS".into(),
            timeout: 5,
            insecure: true,
            ..Defaults::default()
        };
        let transport = transport_config(&defaults).unwrap();
        assert_eq!(transport.scheme, Scheme::Https);
        assert!(matches!(transport.tls, TlsMode::DangerAcceptInvalid));
        assert_eq!(transport.timeout, Duration::from_secs(5));
    }

    #[test]
    fn unknown_scheme_rejected() {
        let defaults = Defaults {
            scheme: "ftp".into(),
            ..Defaults::default()
        };
        assert!(matches!(
            transport_config(&defaults),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn save_round_trips_inventory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut keyed = profile("core");
        keyed.password = None;
        keyed.keyring = true;
        let cfg = Config {
            defaults: Defaults::default(),
            devices: vec![keyed.clone()],
        };

        save_config(&cfg, &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("keyring = true"));
        assert!(!written.contains("password"));

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.devices, vec![keyed]);
    }
}
