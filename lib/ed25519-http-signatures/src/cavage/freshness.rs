//!
//! Signature age policies
//!

use std::time::{Duration, SystemTime};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::debug;

/// 15 minutes
pub const MAX_ACCEPTED_CLOCK_SKEW: Duration = Duration::from_secs(15 * 60);

/// Policy deciding whether a signed `date` value is recent enough
///
/// The verifier consults it exactly once per verification. Closures taking `Option<&str>` implement it, which makes stubbing trivial
pub trait Freshness {
    /// Check the value of the signed `date` header, `None` if it wasn't signed
    fn is_fresh(&self, date: Option<&str>) -> bool;
}

impl<F> Freshness for F
where
    F: Fn(Option<&str>) -> bool,
{
    #[inline]
    fn is_fresh(&self, date: Option<&str>) -> bool {
        self(date)
    }
}

/// Accept dates within a symmetric window around the current time
///
/// Understands both RFC 7231 HTTP-dates and RFC 3339 timestamps. Missing or unparseable dates are stale
#[derive(Clone, Copy, Debug)]
pub struct MaxAge {
    skew: Duration,
    now: Option<SystemTime>,
}

impl MaxAge {
    /// Construct a policy with the given allowed skew
    #[must_use]
    pub fn new(skew: Duration) -> Self {
        Self { skew, now: None }
    }

    /// Pin the reference time instead of reading the system clock
    #[must_use]
    pub fn at(self, now: SystemTime) -> Self {
        Self {
            now: Some(now),
            ..self
        }
    }
}

impl Default for MaxAge {
    fn default() -> Self {
        Self::new(MAX_ACCEPTED_CLOCK_SKEW)
    }
}

impl Freshness for MaxAge {
    fn is_fresh(&self, date: Option<&str>) -> bool {
        let Some(date) = date else {
            debug!("signature doesn't cover a date");
            return false;
        };

        let Some(signed_at) = parse_date(date) else {
            debug!(date, "unparseable date header");
            return false;
        };

        let now = self.now.unwrap_or_else(SystemTime::now);
        let skew = match now.duration_since(signed_at) {
            Ok(age) => age,
            Err(err) => err.duration(),
        };

        skew <= self.skew
    }
}

fn parse_date(value: &str) -> Option<SystemTime> {
    httpdate::parse_http_date(value).ok().or_else(|| {
        OffsetDateTime::parse(value, &Rfc3339)
            .ok()
            .map(SystemTime::from)
    })
}

#[cfg(test)]
mod test {
    use super::{Freshness, MaxAge};
    use std::time::{Duration, SystemTime};

    /// 2018-04-01T12:00:00Z
    const SIGNED_AT: Duration = Duration::from_secs(1_522_584_000);

    fn policy(offset_secs: i64) -> MaxAge {
        let signed_at = SystemTime::UNIX_EPOCH + SIGNED_AT;
        let now = if offset_secs.is_negative() {
            signed_at - Duration::from_secs(offset_secs.unsigned_abs())
        } else {
            signed_at + Duration::from_secs(offset_secs.unsigned_abs())
        };

        MaxAge::default().at(now)
    }

    #[test]
    fn accepts_both_date_formats() {
        let policy = policy(60);

        assert!(policy.is_fresh(Some("2018-04-01T12:00:00.000Z")));
        assert!(policy.is_fresh(Some("Sun, 01 Apr 2018 12:00:00 GMT")));
    }

    #[test]
    fn window_is_symmetric() {
        let date = Some("2018-04-01T12:00:00.000Z");

        assert!(policy(15 * 60).is_fresh(date));
        assert!(policy(-15 * 60).is_fresh(date));
        assert!(!policy(15 * 60 + 1).is_fresh(date));
        assert!(!policy(-15 * 60 - 1).is_fresh(date));
    }

    #[test]
    fn missing_or_garbage_is_stale() {
        let policy = policy(0);

        assert!(!policy.is_fresh(None));
        assert!(!policy.is_fresh(Some("yesterday-ish")));
    }

    #[test]
    fn custom_skew() {
        let policy = MaxAge::new(Duration::from_secs(5))
            .at(SystemTime::UNIX_EPOCH + SIGNED_AT + Duration::from_secs(6));

        assert!(!policy.is_fresh(Some("2018-04-01T12:00:00Z")));
    }

    #[test]
    fn closures_are_policies() {
        let always = |_: Option<&str>| true;
        assert!(always.is_fresh(None));
    }
}
