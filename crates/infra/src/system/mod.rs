use chrono::{DateTime, TimeZone, Utc};

// Mocking out time so that it is possible to run tests that depend on time.
pub trait ISys: Send + Sync {
    /// The current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;

    /// Timestamps outside of what `DateTime` can represent are clamped to its bounds
    fn get_datetime(&self) -> DateTime<Utc> {
        let millis = self.get_timestamp_millis();
        match Utc.timestamp_millis_opt(millis).single() {
            Some(dt) => dt,
            None if millis < 0 => DateTime::<Utc>::MIN_UTC,
            None => DateTime::<Utc>::MAX_UTC,
        }
    }
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// System that is stuck at a given point in time
pub struct StaticTimeSys(pub i64);
impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_time_sys_reports_its_time() {
        let dt = Utc.with_ymd_and_hms(2020, 2, 1, 0, 0, 0).unwrap();
        let sys = StaticTimeSys(dt.timestamp_millis());
        assert_eq!(sys.get_datetime(), dt);
    }

    #[test]
    fn static_time_sys_out_of_range_is_clamped() {
        assert_eq!(StaticTimeSys(i64::MAX).get_datetime(), DateTime::<Utc>::MAX_UTC);
        assert_eq!(StaticTimeSys(i64::MIN).get_datetime(), DateTime::<Utc>::MIN_UTC);
    }
}
