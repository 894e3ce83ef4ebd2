use crate::net::TransportOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Transport settings (optional `[transport]` section in config.toml).
///
/// Every field is unset by default, which leaves libcurl's own behavior in
/// place: no timeouts, no redirects, no retries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Seconds allowed for the TCP/TLS connect phase.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Seconds allowed for the whole transfer.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Follow HTTP redirects.
    #[serde(default)]
    pub follow_redirects: bool,
    /// Override the User-Agent header.
    #[serde(default)]
    pub user_agent: Option<String>,
}

/// Global configuration loaded from `~/.config/oscap-acquire/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquireConfig {
    /// Directory under which `oscap.XXXXXX` directories are created. Unset means `$TMPDIR` or `/tmp`.
    #[serde(default)]
    pub temp_root: Option<PathBuf>,
    #[serde(default)]
    pub transport: TransportConfig,
}

impl AcquireConfig {
    pub fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            connect_timeout: self.transport.connect_timeout_secs.map(Duration::from_secs),
            timeout: self.transport.timeout_secs.map(Duration::from_secs),
            follow_redirects: self.transport.follow_redirects,
            user_agent: self.transport.user_agent.clone(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("oscap-acquire")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<AcquireConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = AcquireConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg: AcquireConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
