//! Configuration types for the attendance policy.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::FixedOffset;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::RateReason;

/// Metadata about the policy.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyMetadata {
    /// Short policy code (e.g. "standard").
    pub code: String,
    /// The human-readable name of the policy.
    pub name: String,
    /// The version or effective date of the policy.
    pub version: String,
    /// Local offset from UTC in minutes, used for clock stamps.
    pub utc_offset_minutes: i32,
}

/// The night-premium window as hours of the local day.
///
/// When `start_hour > end_hour` the window wraps midnight and covers
/// `[start_hour, 24) ∪ [0, end_hour)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct NightWindow {
    /// First hour inside the window.
    pub start_hour: u32,
    /// First hour after the window.
    pub end_hour: u32,
}

impl NightWindow {
    /// Returns true if `hour` falls inside the window.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::config::NightWindow;
    ///
    /// let window = NightWindow { start_hour: 22, end_hour: 5 };
    /// assert!(window.contains(23));
    /// assert!(window.contains(0));
    /// assert!(!window.contains(5));
    /// assert!(!window.contains(21));
    /// ```
    pub fn contains(&self, hour: u32) -> bool {
        if self.start_hour > self.end_hour {
            hour >= self.start_hour || hour < self.end_hour
        } else {
            hour >= self.start_hour && hour < self.end_hour
        }
    }
}

/// Rate segmentation configuration from rates.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct RatePolicy {
    /// Length of one classification tick in minutes.
    pub tick_minutes: i64,
    /// The night-premium window.
    pub night_window: NightWindow,
    /// Multiplier for night work.
    pub night_rate: Decimal,
    /// Multiplier for weekend work outside the night window.
    pub weekend_rate: Decimal,
    /// Multiplier for weekday work outside the night window.
    pub weekday_overtime_rate: Decimal,
}

impl RatePolicy {
    /// Returns the multiplier for a rate reason.
    pub fn rate_for(&self, reason: RateReason) -> Decimal {
        match reason {
            RateReason::Night => self.night_rate,
            RateReason::Weekend => self.weekend_rate,
            RateReason::WeekdayOvertime => self.weekday_overtime_rate,
        }
    }
}

impl Default for RatePolicy {
    fn default() -> Self {
        Self {
            tick_minutes: 15,
            night_window: NightWindow {
                start_hour: 22,
                end_hour: 5,
            },
            night_rate: Decimal::new(150, 2),
            weekend_rate: Decimal::new(135, 2),
            weekday_overtime_rate: Decimal::new(125, 2),
        }
    }
}

/// Which pending requests a manager sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingScope {
    /// Every pending request in the system.
    #[default]
    All,
    /// Only requests from the manager's direct reports.
    ReportingLine,
}

/// Leave configuration from leave.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct LeavePolicy {
    /// Minutes charged for a full day of leave.
    pub full_day_minutes: i64,
    /// Maximum approved leave minutes per user per calendar year.
    pub annual_limit_minutes: i64,
    /// Which pending requests a manager sees.
    #[serde(default)]
    pub pending_scope: PendingScope,
    /// Re-check the annual cap when a request is approved.
    #[serde(default = "default_revalidate")]
    pub revalidate_cap_on_approval: bool,
}

fn default_revalidate() -> bool {
    true
}

impl LeavePolicy {
    /// Minutes charged for a morning or afternoon half day.
    pub fn half_day_minutes(&self) -> i64 {
        self.full_day_minutes / 2
    }
}

impl Default for LeavePolicy {
    fn default() -> Self {
        Self {
            full_day_minutes: 465,
            annual_limit_minutes: 1860,
            pending_scope: PendingScope::All,
            revalidate_cap_on_approval: true,
        }
    }
}

/// The complete policy loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EnginePolicy {
    /// Policy metadata.
    metadata: PolicyMetadata,
    /// Rate segmentation settings.
    rates: RatePolicy,
    /// Leave settings.
    leave: LeavePolicy,
}

impl EnginePolicy {
    /// Creates a policy from its parts, validating every value.
    pub fn new(metadata: PolicyMetadata, rates: RatePolicy, leave: LeavePolicy) -> EngineResult<Self> {
        let policy = Self {
            metadata,
            rates,
            leave,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Returns the policy metadata.
    pub fn metadata(&self) -> &PolicyMetadata {
        &self.metadata
    }

    /// Returns the rate segmentation settings.
    pub fn rates(&self) -> &RatePolicy {
        &self.rates
    }

    /// Returns the leave settings.
    pub fn leave(&self) -> &LeavePolicy {
        &self.leave
    }

    /// Returns the local offset used for clock stamps.
    pub fn utc_offset(&self) -> EngineResult<FixedOffset> {
        FixedOffset::east_opt(self.metadata.utc_offset_minutes * 60).ok_or_else(|| {
            EngineError::InvalidConfig {
                field: "utc_offset_minutes".to_string(),
                message: format!("{} is not a valid offset", self.metadata.utc_offset_minutes),
            }
        })
    }

    /// Returns a copy of this policy with different leave settings.
    pub fn with_leave(mut self, leave: LeavePolicy) -> EngineResult<Self> {
        self.leave = leave;
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> EngineResult<()> {
        self.utc_offset()?;

        let rates = &self.rates;
        if rates.tick_minutes <= 0 {
            return Err(invalid("tick_minutes", "must be positive"));
        }
        let window = rates.night_window;
        if window.start_hour > 24 || window.end_hour > 24 {
            return Err(invalid("night_window", "hours must be within 0..=24"));
        }
        let multipliers = RateReason::ALL.map(|reason| rates.rate_for(reason));
        if multipliers.iter().any(|rate| *rate <= Decimal::ZERO) {
            return Err(invalid("rates", "multipliers must be positive"));
        }
        if multipliers[0] == multipliers[1]
            || multipliers[0] == multipliers[2]
            || multipliers[1] == multipliers[2]
        {
            return Err(invalid("rates", "each reason needs a distinct multiplier"));
        }

        let leave = &self.leave;
        if leave.full_day_minutes <= 0 {
            return Err(invalid("full_day_minutes", "must be positive"));
        }
        if leave.annual_limit_minutes < 0 {
            return Err(invalid("annual_limit_minutes", "must not be negative"));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message: message.to_string(),
    }
}

impl Default for EnginePolicy {
    /// The built-in policy: Asia/Tokyo offset, 15-minute ticks, 22:00-05:00
    /// nights, 1.50/1.35/1.25 premiums, 465-minute days, 1860-minute cap.
    fn default() -> Self {
        Self {
            metadata: PolicyMetadata {
                code: "standard".to_string(),
                name: "Standard attendance policy".to_string(),
                version: "2026-01-01".to_string(),
                utc_offset_minutes: 540,
            },
            rates: RatePolicy::default(),
            leave: LeavePolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_valid() {
        let policy = EnginePolicy::default();
        assert!(policy.validate().is_ok());
        assert_eq!(policy.utc_offset().unwrap().local_minus_utc(), 9 * 3600);
        assert_eq!(policy.leave().half_day_minutes(), 232);
    }

    #[test]
    fn test_non_wrapping_window() {
        let window = NightWindow {
            start_hour: 0,
            end_hour: 6,
        };
        assert!(window.contains(0));
        assert!(window.contains(5));
        assert!(!window.contains(6));
        assert!(!window.contains(23));
    }

    #[test]
    fn test_rate_for_each_reason() {
        let rates = RatePolicy::default();
        assert_eq!(rates.rate_for(RateReason::Night), Decimal::new(150, 2));
        assert_eq!(rates.rate_for(RateReason::Weekend), Decimal::new(135, 2));
        assert_eq!(
            rates.rate_for(RateReason::WeekdayOvertime),
            Decimal::new(125, 2)
        );
    }

    #[test]
    fn test_duplicate_rates_rejected() {
        let rates = RatePolicy {
            weekend_rate: Decimal::new(150, 2),
            ..RatePolicy::default()
        };
        let default = EnginePolicy::default();
        let result = EnginePolicy::new(default.metadata.clone(), rates, LeavePolicy::default());
        match result {
            Err(EngineError::InvalidConfig { field, .. }) => assert_eq!(field, "rates"),
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_tick_rejected() {
        let rates = RatePolicy {
            tick_minutes: 0,
            ..RatePolicy::default()
        };
        let default = EnginePolicy::default();
        let result = EnginePolicy::new(default.metadata.clone(), rates, LeavePolicy::default());
        assert!(matches!(
            result,
            Err(EngineError::InvalidConfig { field, .. }) if field == "tick_minutes"
        ));
    }

    #[test]
    fn test_with_leave_overrides_limit() {
        let policy = EnginePolicy::default()
            .with_leave(LeavePolicy {
                annual_limit_minutes: 930,
                ..LeavePolicy::default()
            })
            .unwrap();
        assert_eq!(policy.leave().annual_limit_minutes, 930);
    }

    #[test]
    fn test_with_leave_rejects_zero_day() {
        let result = EnginePolicy::default().with_leave(LeavePolicy {
            full_day_minutes: 0,
            ..LeavePolicy::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_pending_scope_deserialization() {
        let scope: PendingScope = serde_yaml::from_str("reporting_line").unwrap();
        assert_eq!(scope, PendingScope::ReportingLine);
    }
}
