//! Run settings, read from the environment.
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `SOLIDGATE_PUBLIC_KEY` | channel public key | required |
//! | `SOLIDGATE_PRIVATE_KEY` | channel private key | required |
//! | `SOLIDGATE_CHANNEL` | channel display name | `default` |
//! | `SOLIDGATE_APM` | `true` for an APM channel | `false` |
//! | `SOLIDGATE_CONFIG` | path to a TOML [`ClientConfig`] | built-in defaults |
//! | `REPORT` | report kind, e.g. `card_orders` | `subscriptions` |
//! | `DATE_FROM` / `DATE_TO` | `YYYY-MM-DD[ HH:MM:SS]` | April 2022 |

use std::{fs, io};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use solidgate_reporting::{Channel, ClientConfig, DateRange, ReportError, ReportKind};
use thiserror::Error;

const DEFAULT_CHANNEL: &str = "default";
const DEFAULT_DATE_FROM: &str = "2022-04-01 00:00:00";
const DEFAULT_DATE_TO: &str = "2022-05-01 00:00:00";

/// Errors that stop a run.
#[derive(Debug, Error)]
pub enum RunError {
    /// A required variable is not set.
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    /// A variable is set to something unusable.
    #[error("invalid {name}: {reason}")]
    InvalidVar {
        /// Variable name.
        name: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// The configuration file could not be read.
    #[error("cannot read {path}: {source}")]
    ConfigFile {
        /// Path from `SOLIDGATE_CONFIG`.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The report query failed.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// Records could not be written to stdout.
    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}

/// Everything one run needs.
#[derive(Debug)]
pub struct RunSettings {
    pub channel: Channel,
    pub kind: ReportKind,
    pub range: DateRange,
    pub config: ClientConfig,
}

impl RunSettings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, RunError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`, which returns a variable's value if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RunError> {
        let require = |name: &'static str| {
            lookup(name).filter(|v| !v.is_empty()).ok_or(RunError::MissingVar(name))
        };

        let public_key = require("SOLIDGATE_PUBLIC_KEY")?;
        let private_key = require("SOLIDGATE_PRIVATE_KEY")?;
        let name = lookup("SOLIDGATE_CHANNEL").unwrap_or_else(|| DEFAULT_CHANNEL.to_owned());
        let channel = if parse_flag(lookup("SOLIDGATE_APM").as_deref()) {
            Channel::apm(name, public_key, private_key)
        } else {
            Channel::new(name, public_key, private_key)
        };

        let kind = match lookup("REPORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e: solidgate_reporting::records::UnknownReportKind| RunError::InvalidVar {
                    name: "REPORT",
                    reason: e.to_string(),
                })?,
            None => ReportKind::Subscriptions,
        };

        let date_from = parse_date("DATE_FROM", lookup("DATE_FROM").as_deref().unwrap_or(DEFAULT_DATE_FROM))?;
        let date_to = parse_date("DATE_TO", lookup("DATE_TO").as_deref().unwrap_or(DEFAULT_DATE_TO))?;
        let range = DateRange::new(date_from, date_to)?;

        let config = match lookup("SOLIDGATE_CONFIG") {
            Some(path) => {
                let toml = fs::read_to_string(&path)
                    .map_err(|source| RunError::ConfigFile { path: path.clone(), source })?;
                ClientConfig::from_toml(&toml)?
            }
            None => ClientConfig::default(),
        };

        Ok(Self { channel, kind, range, config })
    }
}

fn parse_flag(value: Option<&str>) -> bool {
    matches!(value.map(str::to_ascii_lowercase).as_deref(), Some("1" | "true" | "yes"))
}

fn parse_date(name: &'static str, value: &str) -> Result<NaiveDateTime, RunError> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN)))
        .map_err(|e| RunError::InvalidVar { name, reason: format!("'{value}': {e}") })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings(vars: &[(&str, &str)]) -> Result<RunSettings, RunError> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        RunSettings::from_lookup(|name| vars.get(name).cloned())
    }

    const KEYS: [(&str, &str); 2] =
        [("SOLIDGATE_PUBLIC_KEY", "api_pk_1"), ("SOLIDGATE_PRIVATE_KEY", "api_sk_1")];

    #[test]
    fn test_defaults() {
        let settings = settings(&KEYS).expect("keys are enough");

        assert_eq!(settings.kind, ReportKind::Subscriptions);
        assert_eq!(settings.channel.name(), "default");
        assert!(!settings.channel.is_apm());
        assert_eq!(settings.range.date_from().to_string(), "2022-04-01 00:00:00");
        assert_eq!(settings.range.date_to().to_string(), "2022-05-01 00:00:00");
        assert_eq!(settings.config.base_url, solidgate_reporting::config::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_missing_private_key() {
        let err = settings(&KEYS[..1]).unwrap_err();
        assert!(matches!(err, RunError::MissingVar("SOLIDGATE_PRIVATE_KEY")));
    }

    #[test]
    fn test_empty_key_counts_as_missing() {
        let err = settings(&[("SOLIDGATE_PUBLIC_KEY", ""), KEYS[1]]).unwrap_err();
        assert!(matches!(err, RunError::MissingVar("SOLIDGATE_PUBLIC_KEY")));
    }

    #[test]
    fn test_report_and_dates() {
        let settings = settings(&[
            KEYS[0],
            KEYS[1],
            ("REPORT", "paypal-disputes"),
            ("SOLIDGATE_APM", "true"),
            ("DATE_FROM", "2023-01-01"),
            ("DATE_TO", "2023-01-31 23:59:59"),
        ])
        .expect("valid settings");

        assert_eq!(settings.kind, ReportKind::PaypalDisputes);
        assert!(settings.channel.is_apm());
        assert_eq!(settings.range.date_from().to_string(), "2023-01-01 00:00:00");
        assert_eq!(settings.range.date_to().to_string(), "2023-01-31 23:59:59");
    }

    #[test]
    fn test_unknown_report() {
        let err = settings(&[KEYS[0], KEYS[1], ("REPORT", "refunds")]).unwrap_err();
        assert_eq!(err.to_string(), "invalid REPORT: unknown report kind `refunds`");
    }

    #[test]
    fn test_inverted_range() {
        let err = settings(&[KEYS[0], KEYS[1], ("DATE_FROM", "2022-06-01")]).unwrap_err();
        assert!(matches!(err, RunError::Report(ReportError::InvalidDateRange(_))));
    }

    #[test]
    fn test_bad_date() {
        let err = settings(&[KEYS[0], KEYS[1], ("DATE_TO", "tomorrow")]).unwrap_err();
        assert!(matches!(err, RunError::InvalidVar { name: "DATE_TO", .. }));
    }

    #[test]
    fn test_missing_config_file() {
        let err = settings(&[KEYS[0], KEYS[1], ("SOLIDGATE_CONFIG", "/nonexistent/solidgate.toml")])
            .unwrap_err();
        assert!(matches!(err, RunError::ConfigFile { .. }));
    }
}
