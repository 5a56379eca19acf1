use chrono::Duration;
use remindly_utils::create_random_secret;
use std::str::FromStr;
use tracing::{info, warn};

/// Decides which of the reminders found by the upcoming reminders query
/// are advanced to their next occurrence as part of the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpcomingAdvancePolicy {
    /// Every reminder returned by the query is consumed and moved
    /// to its next occurrence
    AdvanceAll,
    /// Only reminders that are already due at query time are advanced
    OverdueOnly,
}

impl Default for UpcomingAdvancePolicy {
    fn default() -> Self {
        Self::AdvanceAll
    }
}

impl FromStr for UpcomingAdvancePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::AdvanceAll),
            "overdue_only" => Ok(Self::OverdueOnly),
            _ => Err(s.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Secret used to verify the json web tokens identifying the owner
    /// of a request
    pub jwt_secret: String,
    /// Port for the application to run on
    pub port: usize,
    /// Hour of the day (UTC) at which the overdue reminders sweep runs
    pub sweep_hour_utc: u32,
    /// Length of the window used by the upcoming reminders query
    pub upcoming_window: Duration,
    pub upcoming_advance_policy: UpcomingAdvancePolicy,
}

fn parse_env_or_default<T: FromStr + Clone + std::fmt::Debug>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {:?}.",
                    name, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn new() -> Self {
        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                info!("Did not find JWT_SECRET environment variable. Going to create one.");
                let secret = create_random_secret(32);
                info!("Secret for verifying json web tokens was generated and set to: {}", secret);
                secret
            }
        };

        let port = parse_env_or_default("PORT", 5000);

        let mut sweep_hour_utc = parse_env_or_default("SWEEP_HOUR_UTC", 3);
        if sweep_hour_utc > 23 {
            warn!(
                "The given SWEEP_HOUR_UTC: {} is not an hour of the day, falling back to 3.",
                sweep_hour_utc
            );
            sweep_hour_utc = 3;
        }

        let mut upcoming_window_minutes: i64 = parse_env_or_default("UPCOMING_WINDOW_MINUTES", 60);
        if upcoming_window_minutes <= 0 {
            warn!(
                "The given UPCOMING_WINDOW_MINUTES: {} must be positive, falling back to 60.",
                upcoming_window_minutes
            );
            upcoming_window_minutes = 60;
        }

        let upcoming_advance_policy =
            parse_env_or_default("UPCOMING_ADVANCE_POLICY", UpcomingAdvancePolicy::default());

        Self {
            jwt_secret,
            port,
            sweep_hour_utc,
            upcoming_window: Duration::minutes(upcoming_window_minutes),
            upcoming_advance_policy,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
