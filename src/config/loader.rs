//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the attendance
//! policy from YAML files.

use std::fs;
use std::path::Path;

use chrono::FixedOffset;

use crate::error::{EngineError, EngineResult};

use super::types::{EnginePolicy, LeavePolicy, PolicyMetadata, RatePolicy};

/// Loads and provides access to the attendance policy.
///
/// # Directory Structure
///
/// ```text
/// config/standard/
/// ├── policy.yaml   # Policy metadata and local UTC offset
/// ├── rates.yaml    # Tick length, night window and premium multipliers
/// └── leave.yaml    # Full-day minutes, annual cap and workflow switches
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/standard").unwrap();
/// println!("Annual cap: {} minutes", loader.policy().leave().annual_limit_minutes);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    policy: EnginePolicy,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or misses a field (`ConfigParseError`)
    /// - Any value fails validation (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<PolicyMetadata>(&path.join("policy.yaml"))?;
        let rates = Self::load_yaml::<RatePolicy>(&path.join("rates.yaml"))?;
        let leave = Self::load_yaml::<LeavePolicy>(&path.join("leave.yaml"))?;

        let policy = EnginePolicy::new(metadata, rates, leave)?;
        tracing::debug!(
            policy = %policy.metadata().code,
            version = %policy.metadata().version,
            "Loaded attendance policy"
        );

        Ok(Self { policy })
    }

    /// Wraps an already-built policy.
    pub fn from_policy(policy: EnginePolicy) -> Self {
        Self { policy }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded policy.
    pub fn policy(&self) -> &EnginePolicy {
        &self.policy
    }

    /// Returns the local offset used for clock stamps.
    pub fn utc_offset(&self) -> EngineResult<FixedOffset> {
        self.policy.utc_offset()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::from_policy(EnginePolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PendingScope;
    use rust_decimal::Decimal;
    use std::path::PathBuf;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/standard"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// Writes a policy directory under the system temp dir.
    fn write_policy_dir(name: &str, policy: &str, rates: &str, leave: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "attendance-engine-{}-{}",
            name,
            uuid::Uuid::new_v4()
        ));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("policy.yaml"), policy).unwrap();
        fs::write(dir.join("rates.yaml"), rates).unwrap();
        fs::write(dir.join("leave.yaml"), leave).unwrap();
        dir
    }

    const POLICY: &str = "code: test\nname: Test\nversion: \"1\"\nutc_offset_minutes: 0\n";
    const RATES: &str = "tick_minutes: 15\nnight_window:\n  start_hour: 22\n  end_hour: 5\nnight_rate: \"1.50\"\nweekend_rate: \"1.35\"\nweekday_overtime_rate: \"1.25\"\n";

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.policy().metadata().code, "standard");
        assert_eq!(loader.utc_offset().unwrap().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn test_shipped_rates_match_defaults() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let rates = loader.policy().rates();

        assert_eq!(rates.tick_minutes, 15);
        assert_eq!(rates.night_window.start_hour, 22);
        assert_eq!(rates.night_window.end_hour, 5);
        assert_eq!(rates.night_rate, dec("1.50"));
        assert_eq!(rates.weekend_rate, dec("1.35"));
        assert_eq!(rates.weekday_overtime_rate, dec("1.25"));
    }

    #[test]
    fn test_shipped_leave_settings() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let leave = loader.policy().leave();

        assert_eq!(leave.full_day_minutes, 465);
        assert_eq!(leave.annual_limit_minutes, 1860);
        assert_eq!(leave.pending_scope, PendingScope::All);
        assert!(leave.revalidate_cap_on_approval);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("policy.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_leave_defaults_apply_when_fields_omitted() {
        let dir = write_policy_dir(
            "defaults",
            POLICY,
            RATES,
            "full_day_minutes: 480\nannual_limit_minutes: 2400\n",
        );

        let loader = ConfigLoader::load(&dir).unwrap();
        let leave = loader.policy().leave();
        assert_eq!(leave.full_day_minutes, 480);
        assert_eq!(leave.half_day_minutes(), 240);
        assert_eq!(leave.pending_scope, PendingScope::All);
        assert!(leave.revalidate_cap_on_approval);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_malformed_yaml_returns_parse_error() {
        let dir = write_policy_dir("malformed", POLICY, "tick_minutes: [", "full_day_minutes: 465\n");

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("rates.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_invalid_offset_rejected() {
        let dir = write_policy_dir(
            "offset",
            "code: test\nname: Test\nversion: \"1\"\nutc_offset_minutes: 100000\n",
            RATES,
            "full_day_minutes: 465\nannual_limit_minutes: 1860\n",
        );

        match ConfigLoader::load(&dir) {
            Err(EngineError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "utc_offset_minutes");
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_default_loader_uses_builtin_policy() {
        let loader = ConfigLoader::default();
        assert_eq!(loader.policy().leave().annual_limit_minutes, 1860);
    }
}
