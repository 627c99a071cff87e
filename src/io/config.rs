//! Runtime configuration from `.env` and process environment.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::Error;
use crate::search::Termination;

/// Which improver drives the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimiserKind {
    /// Round-robin best-improvement local search.
    LocalSearch,
    /// Simulated annealing.
    SimulatedAnnealing,
    /// Adaptive large neighborhood search.
    Alns,
}

impl FromStr for OptimiserKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local-search" => Ok(Self::LocalSearch),
            "simulated-annealing" => Ok(Self::SimulatedAnnealing),
            "alns" => Ok(Self::Alns),
            other => Err(Error::Config(format!("unknown OPTIMISER '{other}'"))),
        }
    }
}

/// Recognized environment options.
///
/// | Variable | Meaning | Default |
/// |---|---|---|
/// | `LOG_LEVEL` | DEBUG, INFO, WARNING, ERROR, CRITICAL | `INFO` |
/// | `DATA_NODES_FILEPATH` | input node CSV | required |
/// | `OUTPUT_DIR` | destination for reports | `output` |
/// | `TERMINATION_MAX_ITERATIONS` | iteration budget, `< 0` disables | `-1` |
/// | `TERMINATION_MAX_SECONDS` | wall budget, `< 0` disables | `-1` |
/// | `RANDOM_SEED` | central PRNG seed | `42` |
/// | `OPTIMISER` | `local-search`, `simulated-annealing`, `alns` | `alns` |
#[derive(Debug, Clone)]
pub struct Config {
    /// Log verbosity name, as configured.
    pub log_level: String,
    /// Input CSV path.
    pub data_nodes_filepath: PathBuf,
    /// Report destination directory.
    pub output_dir: PathBuf,
    /// Iteration budget; negative disables.
    pub max_iterations: i64,
    /// Wall-clock budget in seconds; negative disables.
    pub max_seconds: f64,
    /// Central seed for every PRNG in the search path.
    pub seed: u64,
    /// Selected improver.
    pub optimiser: OptimiserKind,
}

impl Config {
    /// Loads `.env` (if present) and reads the environment.
    pub fn from_env() -> Result<Self, Error> {
        dotenvy::dotenv().ok();

        let data_nodes_filepath = env::var("DATA_NODES_FILEPATH")
            .map_err(|_| Error::Config("DATA_NODES_FILEPATH is required".into()))?;

        Ok(Self {
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "INFO".into()),
            data_nodes_filepath: PathBuf::from(data_nodes_filepath),
            output_dir: PathBuf::from(env::var("OUTPUT_DIR").unwrap_or_else(|_| "output".into())),
            max_iterations: parse_var("TERMINATION_MAX_ITERATIONS", -1)?,
            max_seconds: parse_var("TERMINATION_MAX_SECONDS", -1.0)?,
            seed: parse_var("RANDOM_SEED", 42)?,
            optimiser: match env::var("OPTIMISER") {
                Ok(raw) => raw.parse()?,
                Err(_) => OptimiserKind::Alns,
            },
        })
    }

    /// Termination gates from the configured budgets.
    pub fn termination(&self) -> Termination {
        Termination::new(self.max_iterations, self.max_seconds)
    }

    /// Maps the configured log level onto a `tracing` filter directive.
    pub fn log_directive(&self) -> &'static str {
        match self.log_level.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => "debug",
            "WARNING" => "warn",
            "ERROR" => "error",
            "CRITICAL" => "error",
            _ => "info",
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, Error> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("invalid {name} '{raw}'"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimiser_kind_parsing() {
        assert_eq!(
            "local-search".parse::<OptimiserKind>().expect("parses"),
            OptimiserKind::LocalSearch
        );
        assert_eq!(
            "Simulated-Annealing".parse::<OptimiserKind>().expect("parses"),
            OptimiserKind::SimulatedAnnealing
        );
        assert_eq!(
            " alns ".parse::<OptimiserKind>().expect("parses"),
            OptimiserKind::Alns
        );
        assert!("tabu".parse::<OptimiserKind>().is_err());
    }

    #[test]
    fn test_log_directive_mapping() {
        let mut config = Config {
            log_level: "DEBUG".into(),
            data_nodes_filepath: PathBuf::from("nodes.csv"),
            output_dir: PathBuf::from("output"),
            max_iterations: -1,
            max_seconds: -1.0,
            seed: 42,
            optimiser: OptimiserKind::Alns,
        };
        assert_eq!(config.log_directive(), "debug");
        config.log_level = "warning".into();
        assert_eq!(config.log_directive(), "warn");
        config.log_level = "CRITICAL".into();
        assert_eq!(config.log_directive(), "error");
        config.log_level = "anything-else".into();
        assert_eq!(config.log_directive(), "info");
    }

    #[test]
    fn test_termination_uses_budgets() {
        let config = Config {
            log_level: "INFO".into(),
            data_nodes_filepath: PathBuf::from("nodes.csv"),
            output_dir: PathBuf::from("output"),
            max_iterations: 5,
            max_seconds: -1.0,
            seed: 42,
            optimiser: OptimiserKind::LocalSearch,
        };
        let termination = config.termination();
        assert!(!termination.should_terminate(4, None));
        assert!(termination.should_terminate(5, None));
    }
}
