//! Rate segment model.
//!
//! A [`RateSegment`] is a block of worked time that shares one pay-rate
//! multiplier. Segments are derived on every query and never stored.

use chrono::Duration;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Why a premium rate applies to a block of worked time.
///
/// The declaration order is the canonical output order of segmentation:
/// night, weekend, weekday overtime.
///
/// # Example
///
/// ```
/// use attendance_engine::models::RateReason;
///
/// assert_eq!(RateReason::WeekdayOvertime.label(), "weekday-overtime");
/// assert!(RateReason::Night < RateReason::Weekend);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RateReason {
    /// Worked between 22:00 and 05:00 local time.
    #[serde(rename = "night")]
    Night,
    /// Worked on a Saturday or Sunday outside the night window.
    #[serde(rename = "weekend")]
    Weekend,
    /// Worked on a weekday outside the night window.
    #[serde(rename = "weekday-overtime")]
    WeekdayOvertime,
}

impl RateReason {
    /// All reasons in canonical order.
    pub const ALL: [RateReason; 3] = [
        RateReason::Night,
        RateReason::Weekend,
        RateReason::WeekdayOvertime,
    ];

    /// Returns the wire label for this reason.
    pub fn label(&self) -> &'static str {
        match self {
            RateReason::Night => "night",
            RateReason::Weekend => "weekend",
            RateReason::WeekdayOvertime => "weekday-overtime",
        }
    }
}

impl std::fmt::Display for RateReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A contiguous share of worked time paid at one premium multiplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSegment {
    /// The pay-rate multiplier (e.g. 1.50).
    pub rate: Decimal,
    /// Total time worked at this rate.
    #[serde(with = "super::duration_seconds")]
    pub duration: Duration,
    /// Why this rate applies.
    pub reason: RateReason,
}

impl RateSegment {
    /// Returns the segment length in whole minutes.
    pub fn minutes(&self) -> i64 {
        self.duration.num_minutes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_canonical_order() {
        let mut reasons = vec![
            RateReason::WeekdayOvertime,
            RateReason::Night,
            RateReason::Weekend,
        ];
        reasons.sort();
        assert_eq!(reasons, RateReason::ALL.to_vec());
    }

    #[test]
    fn test_reason_serialization_uses_labels() {
        for reason in RateReason::ALL {
            let json = serde_json::to_string(&reason).unwrap();
            assert_eq!(json, format!("\"{}\"", reason.label()));
        }
    }

    #[test]
    fn test_segment_serializes_duration_as_seconds() {
        let segment = RateSegment {
            rate: Decimal::new(150, 2),
            duration: Duration::minutes(90),
            reason: RateReason::Night,
        };

        let json = serde_json::to_string(&segment).unwrap();
        assert!(json.contains("\"rate\":\"1.50\""));
        assert!(json.contains("\"duration\":5400"));
        assert!(json.contains("\"reason\":\"night\""));

        let deserialized: RateSegment = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, segment);
        assert_eq!(deserialized.minutes(), 90);
    }
}
