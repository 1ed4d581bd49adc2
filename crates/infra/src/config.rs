use std::str::FromStr;
use steward_domain::RolePolicies;
use steward_utils::create_random_secret;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Secret code used to register members and issue their session tokens
    pub admin_secret_code: String,
    /// Secret the session tokens are signed with
    pub jwt_secret: String,
    /// Port for the application to run on
    pub port: usize,
    /// How often the overdue sweep runs
    pub overdue_sweep_interval_secs: u64,
    /// Maximum number of `Notification`s in the alert feed
    pub feed_notifications_limit: usize,
    /// Maximum number of `DashboardAlert`s in the alert feed
    pub feed_alerts_limit: usize,
    /// How often clients are told to poll the alert feed
    pub client_poll_interval_secs: u64,
    /// Default reminder behaviour per role, churches can override it
    pub role_policies: RolePolicies,
}

/// Reads the secret in `var`, or generates one. A generated secret is only
/// logged when `log_generated` is set, so signing secrets never end up in logs.
fn secret_from_env(var: &str, description: &str, log_generated: bool) -> String {
    match std::env::var(var) {
        Ok(secret) => secret,
        Err(_) => {
            info!("Did not find {} environment variable. Going to create one.", var);
            let secret = create_random_secret(32);
            if log_generated {
                info!("{} was generated and set to: {}", description, secret);
            } else {
                info!("{} was generated", description);
            }
            secret
        }
    }
}

fn parse_env_value<T, F>(var: &str, value: Option<String>, default: T, is_valid: F) -> T
where
    T: FromStr + Copy + std::fmt::Display,
    F: Fn(&T) -> bool,
{
    let value = match value {
        Some(value) => value,
        None => return default,
    };
    match value.parse::<T>() {
        Ok(parsed) if is_valid(&parsed) => parsed,
        _ => {
            warn!(
                "The given {}: {} is not valid, falling back to the default: {}.",
                var, value, default
            );
            default
        }
    }
}

fn parse_from_env<T: FromStr + Copy + std::fmt::Display>(var: &str, default: T) -> T {
    parse_env_value(var, std::env::var(var).ok(), default, |_| true)
}

fn parse_nonzero_from_env(var: &str, default: u64) -> u64 {
    parse_env_value(var, std::env::var(var).ok(), default, |value| *value > 0)
}

impl Config {
    pub fn new() -> Self {
        let admin_secret_code =
            secret_from_env("ADMIN_SECRET_CODE", "Secret code for admin endpoints", true);
        let jwt_secret = secret_from_env("JWT_SECRET", "Secret for signing session tokens", false);

        Self {
            admin_secret_code,
            jwt_secret,
            port: parse_from_env("PORT", 5000),
            overdue_sweep_interval_secs: parse_nonzero_from_env("OVERDUE_SWEEP_INTERVAL_SECS", 60),
            feed_notifications_limit: parse_from_env("FEED_NOTIFICATIONS_LIMIT", 20),
            feed_alerts_limit: parse_from_env("FEED_ALERTS_LIMIT", 10),
            client_poll_interval_secs: parse_nonzero_from_env("CLIENT_POLL_INTERVAL_SECS", 30),
            role_policies: RolePolicies::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn falls_back_to_default_for_invalid_values() {
        let nonzero = |value: &u64| *value > 0;
        assert_eq!(parse_env_value("INTERVAL", None, 60, nonzero), 60);
        assert_eq!(parse_env_value("INTERVAL", Some("15".into()), 60, nonzero), 15);
        assert_eq!(parse_env_value("INTERVAL", Some("0".into()), 60, nonzero), 60);
        assert_eq!(parse_env_value("INTERVAL", Some("-1".into()), 60, nonzero), 60);
        assert_eq!(parse_env_value("INTERVAL", Some("abc".into()), 60, nonzero), 60);
        assert_eq!(parse_env_value("PORT", Some("0".into()), 5000, |_| true), 0);
    }
}
