//! Configuration loading from environment.

use std::env;
use std::str::FromStr;

use invoice_types::Currency;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("Unknown log format: {other}. Supported: pretty, json"),
        }
    }
}

/// Application configuration.
pub struct Config {
    pub log_format: LogFormat,
    /// Used when a command does not pass `--output-currency`
    pub output_currency: Currency,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let log_format = match env::var("INVOICE_LOG_FORMAT") {
            Ok(value) => value.parse()?,
            Err(_) => LogFormat::default(),
        };

        let output_currency = env::var("INVOICE_OUTPUT_CURRENCY")
            .unwrap_or_else(|_| "EUR".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("INVOICE_OUTPUT_CURRENCY: {e}"))?;

        Ok(Self {
            log_format,
            output_currency,
        })
    }
}
