//! Environment configuration.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use session_store::resolve_session_path;
use shell_provider_gemini::DEFAULT_GEMINI_MODEL;

pub const SESSION_ENV_VAR: &str = "BASHSIM_SESSION";
pub const MODEL_ENV_VAR: &str = "BASHSIM_MODEL";
pub const PROVIDER_ENV_VAR: &str = "BASHSIM_PROVIDER";
pub const GEMINI_BASE_URL_ENV_VAR: &str = "BASHSIM_GEMINI_BASE_URL";
pub const TIMEOUT_ENV_VAR: &str = "BASHSIM_TIMEOUT_SEC";
pub const LOG_ENV_VAR: &str = "BASHSIM_LOG";
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOG_API_KEY"];

/// Process configuration. Blank environment values count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    pub session_path: Option<String>,
    pub model: Option<String>,
    pub provider: Option<String>,
    pub api_key: Option<String>,
    pub gemini_base_url: Option<String>,
    pub timeout_sec: Option<String>,
    pub log_filter: Option<String>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            session_path: env_string_opt(SESSION_ENV_VAR),
            model: env_string_opt(MODEL_ENV_VAR),
            provider: env_string_opt(PROVIDER_ENV_VAR),
            api_key: API_KEY_ENV_VARS.iter().find_map(|key| env_string_opt(key)),
            gemini_base_url: env_string_opt(GEMINI_BASE_URL_ENV_VAR),
            timeout_sec: env_string_opt(TIMEOUT_ENV_VAR),
            log_filter: env_string_opt(LOG_ENV_VAR),
        }
    }

    /// Backing file for the session history.
    pub fn session_path(&self) -> PathBuf {
        resolve_session_path(self.session_path.as_deref())
    }

    pub fn model_id(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_GEMINI_MODEL)
    }

    /// Parses the request timeout. `Err` carries the rejected raw value.
    pub fn timeout(&self) -> Result<Option<Duration>, String> {
        let Some(raw) = self.timeout_sec.as_deref() else {
            return Ok(None);
        };
        match raw.trim().parse::<u64>() {
            Ok(seconds) if seconds > 0 => Ok(Some(Duration::from_secs(seconds))),
            _ => Err(raw.to_string()),
        }
    }
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    use session_store::default_session_path;

    struct EnvGuard {
        key: &'static str,
        previous: Option<String>,
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                env::set_var(self.key, value);
            } else {
                env::remove_var(self.key);
            }
        }
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .expect("env lock poisoned")
    }

    fn set_env_guard(key: &'static str, value: Option<&str>) -> EnvGuard {
        let previous = env::var(key).ok();
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
        EnvGuard { key, previous }
    }

    fn clear_all() -> Vec<EnvGuard> {
        [
            SESSION_ENV_VAR,
            MODEL_ENV_VAR,
            PROVIDER_ENV_VAR,
            GEMINI_BASE_URL_ENV_VAR,
            TIMEOUT_ENV_VAR,
            LOG_ENV_VAR,
            API_KEY_ENV_VARS[0],
            API_KEY_ENV_VARS[1],
        ]
        .into_iter()
        .map(|key| set_env_guard(key, None))
        .collect()
    }

    #[test]
    fn env_defaults_are_unset() {
        let _lock = env_lock();
        let _guards = clear_all();

        let config = EnvConfig::from_env();
        assert_eq!(config, EnvConfig::default());
        assert_eq!(config.session_path(), default_session_path());
        assert_eq!(config.model_id(), DEFAULT_GEMINI_MODEL);
        assert_eq!(config.timeout(), Ok(None));
    }

    #[test]
    fn env_values_are_read() {
        let _lock = env_lock();
        let _guards = clear_all();
        let _g1 = set_env_guard(SESSION_ENV_VAR, Some("/tmp/sim/session.jsonl"));
        let _g2 = set_env_guard(MODEL_ENV_VAR, Some("gemini-2.5-flash"));
        let _g3 = set_env_guard(PROVIDER_ENV_VAR, Some("mock"));
        let _g4 = set_env_guard(TIMEOUT_ENV_VAR, Some("30"));
        let _g5 = set_env_guard(LOG_ENV_VAR, Some("debug"));

        let config = EnvConfig::from_env();
        assert_eq!(config.session_path(), PathBuf::from("/tmp/sim/session.jsonl"));
        assert_eq!(config.model_id(), "gemini-2.5-flash");
        assert_eq!(config.provider.as_deref(), Some("mock"));
        assert_eq!(config.timeout(), Ok(Some(Duration::from_secs(30))));
        assert_eq!(config.log_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn empty_values_are_ignored() {
        let _lock = env_lock();
        let _guards = clear_all();
        let _g1 = set_env_guard(SESSION_ENV_VAR, Some(""));
        let _g2 = set_env_guard(MODEL_ENV_VAR, Some("   "));

        let config = EnvConfig::from_env();
        assert!(config.session_path.is_none());
        assert!(config.model.is_none());
        assert_eq!(config.session_path(), default_session_path());
    }

    #[test]
    fn gemini_key_takes_precedence_over_goog_key() {
        let _lock = env_lock();
        let _guards = clear_all();
        let _g1 = set_env_guard("GOOG_API_KEY", Some("goog"));

        assert_eq!(EnvConfig::from_env().api_key.as_deref(), Some("goog"));

        let _g2 = set_env_guard("GEMINI_API_KEY", Some("gemini"));
        assert_eq!(EnvConfig::from_env().api_key.as_deref(), Some("gemini"));
    }

    #[test]
    fn invalid_timeout_is_reported() {
        let config = EnvConfig {
            timeout_sec: Some("soon".to_string()),
            ..EnvConfig::default()
        };
        assert_eq!(config.timeout(), Err("soon".to_string()));

        let config = EnvConfig {
            timeout_sec: Some("0".to_string()),
            ..EnvConfig::default()
        };
        assert_eq!(config.timeout(), Err("0".to_string()));
    }
}
