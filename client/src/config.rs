//! Client configuration loaded via OrthoConfig.
//!
//! Values come from CLI arguments, `ACCESS_MANAGER_*` environment variables,
//! or a configuration file, in OrthoConfig's usual precedence order.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("access-manager-client/", env!("CARGO_PKG_VERSION"));

/// Connection settings for one AccessManager instance.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ACCESS_MANAGER")]
pub struct AccessManagerClientSettings {
    /// Base URL of the service, e.g. `http://127.0.0.1:5000/`.
    ///
    /// Left optional so the remaining settings can load on their own; clients
    /// refuse to build without it.
    pub base_url: Option<String>,
    /// Whole-request timeout in seconds.
    #[ortho_config(default = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,
    /// HTTP user agent.
    #[ortho_config(default = DEFAULT_USER_AGENT.to_owned())]
    pub user_agent: String,
}

impl AccessManagerClientSettings {
    /// Settings pointing at `base_url` with default timeout and user agent.
    #[must_use]
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Return the configured base URL, if any.
    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Return the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Return the user agent.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[cfg(test)]
mod tests {
    //! Settings loading from the environment and CLI, and how clients react
    //! to incomplete settings.

    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;
    use crate::client::AccessManagerStringElementClient;
    use crate::domain::AccessManagerError;

    const BASE_URL_VAR: &str = "ACCESS_MANAGER_BASE_URL";
    const TIMEOUT_VAR: &str = "ACCESS_MANAGER_TIMEOUT_SECONDS";
    const USER_AGENT_VAR: &str = "ACCESS_MANAGER_USER_AGENT";

    fn load(args: &[&str]) -> Result<AccessManagerClientSettings, String> {
        let argv = std::iter::once("access-manager-client")
            .chain(args.iter().copied())
            .map(OsString::from);
        AccessManagerClientSettings::load_from_iter(argv).map_err(|error| error.to_string())
    }

    #[rstest]
    fn unset_environment_loads_defaults_without_a_base_url() {
        let _guard = lock_env([
            (BASE_URL_VAR, None::<String>),
            (TIMEOUT_VAR, None::<String>),
            (USER_AGENT_VAR, None::<String>),
        ]);

        let settings = load(&[]).expect("defaults alone should load");
        assert_eq!(settings.base_url(), None);
        assert_eq!(settings.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECONDS));
        assert_eq!(settings.user_agent(), DEFAULT_USER_AGENT);
    }

    #[rstest]
    fn clients_refuse_settings_without_a_base_url() {
        let _guard = lock_env([
            (BASE_URL_VAR, None::<String>),
            (TIMEOUT_VAR, None::<String>),
            (USER_AGENT_VAR, None::<String>),
        ]);

        let settings = load(&[]).expect("defaults alone should load");
        let error = AccessManagerStringElementClient::from_settings(&settings)
            .err()
            .expect("a base URL is required");
        assert!(
            matches!(error, AccessManagerError::MissingBaseUrl),
            "unexpected error: {error:?}",
        );
    }

    #[rstest]
    fn environment_configures_the_connection() {
        let _guard = lock_env([
            (BASE_URL_VAR, Some("http://127.0.0.1:5000/".to_owned())),
            (TIMEOUT_VAR, Some("5".to_owned())),
            (USER_AGENT_VAR, Some("permissions-sync/2.1".to_owned())),
        ]);

        let settings = load(&[]).expect("environment settings should load");
        assert_eq!(settings.base_url(), Some("http://127.0.0.1:5000/"));
        assert_eq!(settings.timeout(), Duration::from_secs(5));
        assert_eq!(settings.user_agent(), "permissions-sync/2.1");

        let client = AccessManagerStringElementClient::from_settings(&settings)
            .expect("client should build from the environment");
        assert_eq!(client.api_root().as_str(), "http://127.0.0.1:5000/api/v1/");
    }

    #[rstest]
    #[case::words("soon")]
    #[case::negative("-1")]
    fn non_numeric_timeouts_fail_to_load(#[case] timeout: &str) {
        let _guard = lock_env([
            (BASE_URL_VAR, Some("http://127.0.0.1:5000/".to_owned())),
            (TIMEOUT_VAR, Some(timeout.to_owned())),
            (USER_AGENT_VAR, None::<String>),
        ]);

        assert!(load(&[]).is_err(), "timeout '{timeout}' should be rejected");
    }

    #[rstest]
    fn command_line_overrides_the_environment() {
        let _guard = lock_env([
            (BASE_URL_VAR, Some("http://env.test/".to_owned())),
            (TIMEOUT_VAR, Some("5".to_owned())),
            (USER_AGENT_VAR, None::<String>),
        ]);

        let settings = load(&["--base-url", "http://cli.test/"]).expect("CLI settings should load");
        assert_eq!(settings.base_url(), Some("http://cli.test/"));
        assert_eq!(settings.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn base_url_constructor_keeps_defaults() {
        let settings = AccessManagerClientSettings::for_base_url("http://localhost:5000");
        assert_eq!(settings.base_url(), Some("http://localhost:5000"));
        assert_eq!(settings.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECONDS));
        assert!(settings.user_agent().starts_with("access-manager-client/"));
    }
}
