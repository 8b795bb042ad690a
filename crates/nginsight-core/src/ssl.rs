// ── SSL expiry classification ──

use chrono::{DateTime, Utc};
use strum::Display;

/// Certificates expiring within this many days are critical.
pub const CRITICAL_WITHIN_DAYS: i64 = 14;
/// Certificates expiring within this many days (but not critically) warn.
pub const WARNING_WITHIN_DAYS: i64 = 30;

/// Urgency bucket for a certificate's remaining lifetime. An already
/// expired certificate is `Critical` (days left go negative).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ExpiryClass {
    Ok,
    Warning,
    Critical,
}

/// Remaining lifetime of a certificate, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryStatus {
    pub days_left: i64,
    pub class: ExpiryClass,
}

/// Classify a certificate expiry date relative to `now`.
pub fn expiry_status(expiry: DateTime<Utc>, now: DateTime<Utc>) -> ExpiryStatus {
    let days_left = (expiry - now).num_days();
    let class = if days_left < CRITICAL_WITHIN_DAYS {
        ExpiryClass::Critical
    } else if days_left < WARNING_WITHIN_DAYS {
        ExpiryClass::Warning
    } else {
        ExpiryClass::Ok
    };
    ExpiryStatus { days_left, class }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::{ExpiryClass, expiry_status};

    #[test]
    fn ten_days_out_is_critical() {
        let now = Utc::now();
        let status = expiry_status(now + Duration::days(10), now);
        assert_eq!(status.class, ExpiryClass::Critical);
        assert_eq!(status.days_left, 10);
    }

    #[test]
    fn twenty_days_out_is_warning() {
        let now = Utc::now();
        assert_eq!(
            expiry_status(now + Duration::days(20), now).class,
            ExpiryClass::Warning
        );
    }

    #[test]
    fn forty_days_out_is_ok() {
        let now = Utc::now();
        assert_eq!(
            expiry_status(now + Duration::days(40), now).class,
            ExpiryClass::Ok
        );
    }

    #[test]
    fn already_expired_is_critical_with_negative_days() {
        let now = Utc::now();
        let status = expiry_status(now - Duration::days(90), now);
        assert_eq!(status.class, ExpiryClass::Critical);
        assert!(status.days_left < 0);
    }
}
