//! Annual leave cap check.

use crate::error::{EngineError, EngineResult};

/// Checks that `requested_minutes` fits in the annual cap.
///
/// `used_minutes` is the sum of the user's approved leave for the ledger
/// year. The check fails only when `used + requested` strictly exceeds the
/// limit, so a request that exactly fills the cap is accepted.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::check_annual_cap;
///
/// assert!(check_annual_cap(1395, 465, 1860).is_ok());
/// assert!(check_annual_cap(1800, 465, 1860).is_err());
/// ```
pub fn check_annual_cap(
    used_minutes: i64,
    requested_minutes: i64,
    limit_minutes: i64,
) -> EngineResult<()> {
    if used_minutes.saturating_add(requested_minutes) > limit_minutes {
        return Err(EngineError::AnnualLimitExceeded {
            used_minutes,
            requested_minutes,
            limit_minutes,
        });
    }
    Ok(())
}
