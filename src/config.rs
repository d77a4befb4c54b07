use std::path::PathBuf;

use crate::domain::{Amount, Error};

pub const HISTORY_PAGE_SIZE: usize = 50;
pub const HISTORY_LIMIT_ENV: &str = "LEDGER_HISTORY_LIMIT";

/// Read-only settings handed to the ledger at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerConfig {
    pub history_limit: usize,
    pub scale: u32, // decimal places kept on amounts
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            history_limit: HISTORY_PAGE_SIZE,
            scale: Amount::DEFAULT_SCALE,
        }
    }
}

/// Process configuration for the batch binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    pub ledger: LedgerConfig,
}

impl Config {
    /// `<input.csv> [--history-limit N]`; the flag wins over the environment.
    pub fn from_args<I>(args: I, env_limit: Option<String>) -> Result<Self, Error>
    where
        I: IntoIterator<Item = String>,
    {
        let mut ledger = LedgerConfig::default();
        if let Some(raw) = env_limit {
            ledger.history_limit = parse_limit(&raw)?;
        }

        let mut input = None;
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--history-limit" => {
                    let raw = args
                        .next()
                        .ok_or_else(|| Error::Config("--history-limit needs a value".to_string()))?;
                    ledger.history_limit = parse_limit(&raw)?;
                }
                _ if input.is_none() => input = Some(PathBuf::from(&arg)),
                other => {
                    return Err(Error::Config(format!("unexpected argument: {}", other)));
                }
            }
        }

        let input = input.ok_or_else(|| Error::Config("no input file was provided".to_string()))?;

        Ok(Self { input, ledger })
    }

    pub fn from_env() -> Result<Self, Error> {
        Self::from_args(std::env::args().skip(1), std::env::var(HISTORY_LIMIT_ENV).ok())
    }
}

fn parse_limit(raw: &str) -> Result<usize, Error> {
    match raw.trim().parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(Error::Config(format!("invalid history limit: {}", raw))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_to_page_size() {
        let config = Config::from_args(args(&["in.csv"]), None).unwrap();
        assert_eq!(config.input, PathBuf::from("in.csv"));
        assert_eq!(config.ledger.history_limit, HISTORY_PAGE_SIZE);
    }

    #[test]
    fn flag_overrides_environment() {
        let config =
            Config::from_args(args(&["--history-limit", "5", "in.csv"]), Some("7".into())).unwrap();
        assert_eq!(config.ledger.history_limit, 5);

        let config = Config::from_args(args(&["in.csv"]), Some("7".into())).unwrap();
        assert_eq!(config.ledger.history_limit, 7);
    }

    #[test]
    fn missing_input_or_bad_limit_is_an_error() {
        assert!(matches!(Config::from_args(args(&[]), None), Err(Error::Config(_))));
        assert!(matches!(
            Config::from_args(args(&["in.csv", "--history-limit", "0"]), None),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_args(args(&["a.csv", "b.csv"]), None),
            Err(Error::Config(_))
        ));
    }
}
