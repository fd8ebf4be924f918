use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const LOCAL_API_BASE_URL: &str = "http://localhost:8080";
pub const CLUSTERED_API_BASE_URL: &str = "http://steam-api:8080";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_ASSET_DIR: &str = "dist";

/// Where the comparison service lives, picked once at process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiTarget {
    /// Service on the loopback interface (development).
    Local,
    /// Service reachable through its service-discovery name (co-located deployment).
    Clustered,
}

impl ApiTarget {
    /// Loopback hosts select the local service; any other host selects the clustered one.
    pub fn for_host(host: &str) -> Self {
        match host {
            "localhost" | "127.0.0.1" => ApiTarget::Local,
            _ => ApiTarget::Clustered,
        }
    }

    pub fn base_url(self) -> &'static str {
        match self {
            ApiTarget::Local => LOCAL_API_BASE_URL,
            ApiTarget::Clustered => CLUSTERED_API_BASE_URL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub target: ApiTarget,
    pub base_url_override: Option<String>,
}

impl ClientSettings {
    /// Without a resolvable host there is nothing to compare against, so the
    /// clustered service is assumed.
    pub fn for_host(host: Option<&str>) -> Self {
        Self {
            target: host.map(ApiTarget::for_host).unwrap_or(ApiTarget::Clustered),
            base_url_override: None,
        }
    }

    /// Reads `STEAM_COMPARE_HOST` and `STEAM_COMPARE_API_BASE_URL`.
    pub fn from_env() -> Self {
        let host = env::var("STEAM_COMPARE_HOST").ok().filter(|v| !v.is_empty());
        let mut settings = Self::for_host(host.as_deref());
        settings.base_url_override = env::var("STEAM_COMPARE_API_BASE_URL")
            .ok()
            .filter(|v| !v.is_empty());
        settings
    }

    pub fn base_url(&self) -> &str {
        self.base_url_override
            .as_deref()
            .unwrap_or_else(|| self.target.base_url())
            .trim_end_matches('/')
    }

    pub fn compare_url(&self, user_id_1: &str, user_id_2: &str) -> String {
        format!(
            "{}/user?user_id_1={}&user_id_2={}",
            self.base_url(),
            urlencoding::encode(user_id_1),
            urlencoding::encode(user_id_2)
        )
    }

    pub fn health_url(&self) -> String {
        format!("{}/health", self.base_url())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub bind_addr: SocketAddr,
    pub asset_dir: PathBuf,
}

impl ServerSettings {
    /// Reads `STEAM_COMPARE_BIND` and `STEAM_COMPARE_ASSET_DIR`, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let bind = env::var("STEAM_COMPARE_BIND")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid bind address: {bind}"))?;

        let asset_dir = env::var("STEAM_COMPARE_ASSET_DIR")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSET_DIR));

        Ok(Self {
            bind_addr,
            asset_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{EnvGuard, ENV_LOCK};

    #[test]
    fn loopback_hosts_select_local_target() {
        assert_eq!(ApiTarget::for_host("localhost"), ApiTarget::Local);
        assert_eq!(ApiTarget::for_host("127.0.0.1"), ApiTarget::Local);
        assert_eq!(ApiTarget::for_host("games.example.com"), ApiTarget::Clustered);
    }

    #[test]
    fn missing_host_selects_clustered_target() {
        let settings = ClientSettings::for_host(None);
        assert_eq!(settings.base_url(), "http://steam-api:8080");
    }

    #[test]
    fn compare_url_carries_both_ids() {
        let settings = ClientSettings::for_host(Some("localhost"));
        let url = settings.compare_url("123456789", "987654321");
        assert_eq!(
            url,
            "http://localhost:8080/user?user_id_1=123456789&user_id_2=987654321"
        );
        assert_eq!(settings.health_url(), "http://localhost:8080/health");
    }

    #[test]
    fn override_wins_over_target() {
        let settings = ClientSettings {
            target: ApiTarget::Local,
            base_url_override: Some("http://10.0.0.5:9000/".to_string()),
        };
        assert_eq!(settings.base_url(), "http://10.0.0.5:9000");
    }

    #[test]
    fn client_settings_read_from_env() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
        let _host = EnvGuard::set("STEAM_COMPARE_HOST", "127.0.0.1");
        let _url = EnvGuard::unset("STEAM_COMPARE_API_BASE_URL");

        let settings = ClientSettings::from_env();
        assert_eq!(settings.target, ApiTarget::Local);
        assert!(settings.base_url_override.is_none());
    }

    #[test]
    fn server_settings_default_when_env_missing() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
        let _bind = EnvGuard::unset("STEAM_COMPARE_BIND");
        let _dir = EnvGuard::unset("STEAM_COMPARE_ASSET_DIR");

        let settings = ServerSettings::from_env().unwrap();
        assert_eq!(settings.bind_addr.port(), 3000);
        assert_eq!(settings.asset_dir, PathBuf::from("dist"));
    }

    #[test]
    fn server_settings_reject_bad_bind_address() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
        let _bind = EnvGuard::set("STEAM_COMPARE_BIND", "not-an-address");

        let err = ServerSettings::from_env().unwrap_err();
        assert!(err.to_string().contains("Invalid bind address"));
    }
}
