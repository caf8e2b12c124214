//! Runtime configuration with sane defaults, plus the CLI/env front end.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::ConfigError;

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = "incident_map_app";
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Settings for one interactive session.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
  /// Base URL of the Nominatim instance (no trailing `/search`).
  pub nominatim_url: String,
  /// User-Agent sent with every geocoding request. Nominatim rejects empty ones.
  pub user_agent: String,
  /// Per-request timeout for geocoding calls.
  pub request_timeout_secs: u64,
  /// Offline address table; when set, Nominatim is never contacted.
  pub gazetteer: Option<PathBuf>,
  pub log_level: String,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      nominatim_url: DEFAULT_NOMINATIM_URL.to_string(),
      user_agent: DEFAULT_USER_AGENT.to_string(),
      request_timeout_secs: 10,
      gazetteer: None,
      log_level: "info".to_string(),
    }
  }
}

impl Config {
  pub fn request_timeout(&self) -> Duration {
    Duration::from_secs(self.request_timeout_secs)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.user_agent.trim().is_empty() {
      return Err(ConfigError::invalid("user_agent", "must not be empty"));
    }
    if self.request_timeout_secs == 0 {
      return Err(ConfigError::invalid("request_timeout_secs", "must be at least 1"));
    }
    if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
      return Err(ConfigError::invalid(
        "log_level",
        "must be one of trace, debug, info, warn, error",
      ));
    }
    if self.gazetteer.is_none()
      && !(self.nominatim_url.starts_with("http://") || self.nominatim_url.starts_with("https://"))
    {
      return Err(ConfigError::invalid("nominatim_url", "must be an http(s) URL"));
    }
    Ok(())
  }
}

/// Command-line arguments. Every flag falls back to an `INCIDENT_MAP_*` env var.
#[derive(Parser, Debug, Clone)]
#[command(name = "incident-map", version, about = "Track incident locations and category patterns")]
pub struct Args {
  /// Nominatim base URL
  #[arg(long, env = "INCIDENT_MAP_NOMINATIM_URL", default_value = DEFAULT_NOMINATIM_URL)]
  pub nominatim_url: String,

  /// User-Agent for geocoding requests
  #[arg(long, env = "INCIDENT_MAP_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
  pub user_agent: String,

  /// Geocoding request timeout in seconds
  #[arg(long, env = "INCIDENT_MAP_TIMEOUT_SECS", default_value = "10")]
  pub timeout_secs: u64,

  /// JSON address table to resolve against instead of Nominatim
  #[arg(long, env = "INCIDENT_MAP_GAZETTEER")]
  pub gazetteer: Option<PathBuf>,

  /// Log level (trace, debug, info, warn, error)
  #[arg(long, env = "INCIDENT_MAP_LOG_LEVEL", default_value = "info")]
  pub log_level: String,
}

impl From<Args> for Config {
  fn from(args: Args) -> Self {
    Self {
      nominatim_url: args.nominatim_url,
      user_agent: args.user_agent,
      request_timeout_secs: args.timeout_secs,
      gazetteer: args.gazetteer,
      log_level: args.log_level,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_are_valid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.request_timeout(), Duration::from_secs(10));
  }

  #[test]
  fn empty_user_agent_rejected() {
    let config = Config {
      user_agent: "  ".into(),
      ..Config::default()
    };
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("user_agent"));
  }

  #[test]
  fn zero_timeout_rejected() {
    let config = Config {
      request_timeout_secs: 0,
      ..Config::default()
    };
    assert!(config.validate().is_err());
  }

  #[test]
  fn misspelled_log_level_rejected() {
    let config = Config {
      log_level: "verbos".into(),
      ..Config::default()
    };
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("log_level"));
  }

  #[test]
  fn log_level_accepts_any_case() {
    for level in ["trace", "DEBUG", "Info", "warn", "error"] {
      let config = Config {
        log_level: level.into(),
        ..Config::default()
      };
      assert!(config.validate().is_ok(), "{} should be accepted", level);
    }
  }

  #[test]
  fn url_scheme_ignored_with_gazetteer() {
    let config = Config {
      nominatim_url: "not a url".into(),
      gazetteer: Some(PathBuf::from("places.json")),
      ..Config::default()
    };
    assert!(config.validate().is_ok());
  }

  #[test]
  fn args_parse_into_config() {
    let args = Args::parse_from([
      "incident-map",
      "--user-agent",
      "test_agent",
      "--timeout-secs",
      "3",
      "--gazetteer",
      "places.json",
    ]);
    let config = Config::from(args);
    assert_eq!(config.user_agent, "test_agent");
    assert_eq!(config.request_timeout_secs, 3);
    assert_eq!(config.gazetteer, Some(PathBuf::from("places.json")));
  }
}
