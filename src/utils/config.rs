use clap::ValueEnum;
use std::env;

use crate::cli::{Args, MalformedPolicy, SessionOptions, SummaryFormat};

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub on_malformed: MalformedPolicy,
    pub summary_format: SummaryFormat,
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            on_malformed: MalformedPolicy::default(),
            summary_format: SummaryFormat::default(),
            strict: false,
        }
    }
}

impl Config {
    /// Load `.env` if present, then read `CART_*` variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let config = Config {
            log_level: lookup("CART_LOG_LEVEL")
                .map(|level| level.trim().to_lowercase())
                .unwrap_or(defaults.log_level),
            on_malformed: match lookup("CART_ON_MALFORMED") {
                Some(value) => MalformedPolicy::from_str(value.trim(), true)
                    .map_err(|_| anyhow::anyhow!("CART_ON_MALFORMED must be 'abort' or 'skip', got '{}'", value))?,
                None => defaults.on_malformed,
            },
            summary_format: match lookup("CART_SUMMARY_FORMAT") {
                Some(value) => SummaryFormat::from_str(value.trim(), true)
                    .map_err(|_| anyhow::anyhow!("CART_SUMMARY_FORMAT must be 'text' or 'json', got '{}'", value))?,
                None => defaults.summary_format,
            },
            strict: match lookup("CART_STRICT") {
                Some(value) => parse_flag(&value)
                    .ok_or_else(|| anyhow::anyhow!("CART_STRICT must be a boolean, got '{}'", value))?,
                None => defaults.strict,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Command line flags win over the environment.
    pub fn with_args(mut self, args: &Args) -> Self {
        if args.verbose {
            self.log_level = "debug".to_string();
        }
        if let Some(policy) = args.on_malformed {
            self.on_malformed = policy;
        }
        if let Some(format) = args.format {
            self.summary_format = format;
        }
        if args.strict {
            self.strict = true;
        }
        self
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            on_malformed: self.on_malformed,
            summary_format: self.summary_format,
            strict: self.strict,
        }
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(anyhow::anyhow!(
                "CART_LOG_LEVEL must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.log_level
            ));
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
