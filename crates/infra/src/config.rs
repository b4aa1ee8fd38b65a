use chrono_tz::Tz;
use seminars_domain::ReminderSettings;
use std::collections::HashMap;
use tracing::{info, warn};

const ENV_PREFIX: &str = "SEMINARS_";

/// Flat key-value settings with typed accessors.
///
/// Values that cannot be parsed are reported and treated as absent, so a
/// broken setting disables the feature depending on it instead of failing.
#[derive(Debug, Clone, Default)]
pub struct ConfigSource {
    values: HashMap<String, String>,
}

impl ConfigSource {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        )
    }

    /// Collects every environment variable starting with `SEMINARS_`.
    /// `SEMINARS_SMTP_HOST` becomes the key `smtp_host`.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    fn from_vars(vars: impl Iterator<Item = (String, String)>) -> Self {
        Self::new(
            vars.filter_map(|(name, value)| {
                name.strip_prefix(ENV_PREFIX)
                    .map(|key| (key.to_lowercase(), value))
            })
            .collect(),
        )
    }

    /// Trimmed value, `None` if absent or blank
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(String::from)
    }

    pub fn get_bool(&self, key: &str) -> bool {
        match self.get_string(key) {
            None => false,
            Some(value) => match value.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    warn!(
                        "The setting {}: {} is not a valid boolean, treating it as false.",
                        key, value
                    );
                    false
                }
            },
        }
    }

    pub fn get_integer(&self, key: &str) -> Option<i64> {
        let value = self.get_string(key)?;
        match value.parse::<i64>() {
            Ok(number) => Some(number),
            Err(_) => {
                warn!("The setting {}: {} is not a valid integer, ignoring it.", key, value);
                None
            }
        }
    }

    /// Like `get_integer` but only accepts values in `0..=u32::MAX`
    pub fn get_unsigned(&self, key: &str) -> Option<u32> {
        let number = self.get_integer(key)?;
        if number < 0 || number > i64::from(u32::MAX) {
            warn!("The setting {}: {} is out of range, ignoring it.", key, number);
            return None;
        }
        Some(number as u32)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationDigestConfig {
    pub enabled: bool,
    pub from_email: String,
    pub from_name: String,
    pub to_email: String,
    pub to_name: String,
    pub subject: String,
    /// Body template, see `DEFAULT_DIGEST_TEMPLATE` for the placeholders
    pub template: String,
    pub interval_secs: u64,
}

pub const DEFAULT_DIGEST_SUBJECT: &str = "New registrations";

pub const DEFAULT_DIGEST_TEMPLATE: &str = "Hello,

there are new registrations for {{event_count}} event(s) as of {{date}}:

{{events}}
";

#[derive(Debug, Clone, PartialEq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the status endpoint
    pub port: usize,
    /// Timezone dates are rendered in when composing mails
    pub timezone: Tz,
    pub reminders: ReminderSettings,
    /// How often the mail notifier checks for due reminders
    pub mail_notifier_interval_secs: u64,
    pub registration_digest: RegistrationDigestConfig,
    /// `None` keeps all mails in memory, which is only useful for development
    pub smtp: Option<SmtpConfig>,
}

impl Config {
    /// Reads the `SEMINARS_` environment variables
    pub fn from_env() -> Self {
        Self::from_source(&ConfigSource::from_env())
    }

    pub fn from_source(source: &ConfigSource) -> Self {
        Self {
            port: parse_port(source),
            timezone: parse_timezone(source),
            reminders: ReminderSettings {
                event_takes_place_days_before_begin_date: source
                    .get_unsigned("send_event_takes_place_reminder_days_before_begin_date")
                    .unwrap_or(0),
                send_cancelation_deadline_reminder: source
                    .get_bool("send_cancelation_deadline_reminder"),
                cancelation_deadline_days_before_deadline: source
                    .get_unsigned("send_cancelation_deadline_reminder_days_before_deadline")
                    .unwrap_or(1),
            },
            mail_notifier_interval_secs: parse_interval(source, "mail_notifier_interval_secs", 60 * 60),
            registration_digest: parse_registration_digest(source),
            smtp: parse_smtp(source),
        }
    }
}

fn parse_port(source: &ConfigSource) -> usize {
    let default_port = 5000;
    match source.get_string("port") {
        None => default_port,
        Some(port) => match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port
            }
        },
    }
}

fn parse_timezone(source: &ConfigSource) -> Tz {
    match source.get_string("timezone") {
        None => Tz::UTC,
        Some(tz) => match tz.parse::<Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                warn!("The given timezone: {} is not valid, falling back to UTC.", tz);
                Tz::UTC
            }
        },
    }
}

fn parse_interval(source: &ConfigSource, key: &str, default_secs: u64) -> u64 {
    match source.get_unsigned(key) {
        Some(0) | None => default_secs,
        Some(secs) => u64::from(secs),
    }
}

fn parse_registration_digest(source: &ConfigSource) -> RegistrationDigestConfig {
    let mut config = RegistrationDigestConfig {
        enabled: source.get_bool("registration_digest_enable"),
        from_email: source
            .get_string("registration_digest_from_email")
            .unwrap_or_default(),
        from_name: source
            .get_string("registration_digest_from_name")
            .unwrap_or_default(),
        to_email: source
            .get_string("registration_digest_to_email")
            .unwrap_or_default(),
        to_name: source
            .get_string("registration_digest_to_name")
            .unwrap_or_default(),
        subject: source
            .get_string("registration_digest_subject")
            .unwrap_or_else(|| DEFAULT_DIGEST_SUBJECT.into()),
        template: source
            .get_string("registration_digest_template")
            .unwrap_or_else(|| DEFAULT_DIGEST_TEMPLATE.into()),
        interval_secs: parse_interval(source, "registration_digest_interval_secs", 60 * 60 * 24),
    };

    if config.enabled && (config.from_email.is_empty() || config.to_email.is_empty()) {
        warn!("The registration digest is enabled but the sender or recipient address is missing. Disabling it.");
        config.enabled = false;
    }

    config
}

fn parse_smtp(source: &ConfigSource) -> Option<SmtpConfig> {
    let host = match source.get_string("smtp_host") {
        Some(host) => host,
        None => {
            info!("Did not find the SMTP_HOST setting. Mails will only be logged.");
            return None;
        }
    };
    let port = match source.get_integer("smtp_port") {
        Some(port) if port > 0 && port <= i64::from(u16::MAX) => port as u16,
        Some(port) => {
            warn!("The given SMTP port: {} is not valid, falling back to 587.", port);
            587
        }
        None => 587,
    };
    Some(SmtpConfig {
        host,
        port,
        username: source.get_string("smtp_username").unwrap_or_default(),
        password: source.get_string("smtp_password").unwrap_or_default(),
    })
}
