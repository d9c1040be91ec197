//! Defines data structures of command line arguments.

use clap;

use crate::error::DriverError;
use crate::store::DEFAULT_WINDOW;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input_path: Option<String>,
    pub window: usize,
    pub strict: bool,
    pub dump: bool,
    pub verbosity: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input_path: None,
            window: DEFAULT_WINDOW,
            strict: false,
            dump: false,
            verbosity: 0,
        }
    }
}

impl Config {
    pub fn from_matches(gm: &clap::ArgMatches) -> Result<Self, DriverError> {
        let input_path = gm.value_of("input").map(|s| s.to_owned());

        let window = match gm.value_of("window") {
            None => DEFAULT_WINDOW,
            Some(s) => match s.parse::<usize>() {
                Ok(window) if window > 0 => window,
                _ => {
                    return Err(DriverError::Config(format!(
                        "--window expects a positive integer, got {:?}",
                        s
                    )))
                }
            },
        };
        trace!("window {}", window);

        Ok(Config {
            input_path,
            window,
            strict: gm.is_present("strict"),
            dump: gm.is_present("dump"),
            verbosity: gm.occurrences_of("verbose"),
        })
    }

    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app;

    fn config(args: &[&str]) -> Result<Config, DriverError> {
        let matches = app().get_matches_from_safe(args).unwrap();
        Config::from_matches(&matches)
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config(&["capstore"]).unwrap(), Config::default());
    }

    #[test]
    fn test_flags() {
        let config = config(&[
            "capstore", "-i", "in.txt", "-w", "3", "--strict", "--dump", "-vv",
        ])
        .unwrap();
        assert_eq!(config.input_path, Some("in.txt".to_owned()));
        assert_eq!(config.window, 3);
        assert!(config.strict);
        assert!(config.dump);
        assert_eq!(config.default_log_filter(), "debug");
    }

    #[test]
    fn test_invalid_window() {
        assert!(config(&["capstore", "--window", "0"]).is_err());
        assert!(config(&["capstore", "--window", "five"]).is_err());
    }
}
