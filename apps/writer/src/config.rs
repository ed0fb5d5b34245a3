use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::AppError;
use crate::models::persona::PersonaProfile;

const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Few-shot search settings handed to the optimization driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizerConfig {
    pub max_demos: usize,
    pub num_candidates: usize,
    pub seed: u64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_demos: 2,
            num_candidates: 6,
            seed: 0,
        }
    }
}

/// Application configuration loaded from environment variables.
/// Built once at startup and passed by reference into every component.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub model_name: String,
    pub persona: PersonaProfile,
    pub optimizer: OptimizerConfig,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub llm_max_retries: u32,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = OptimizerConfig::default();

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            model_name: env_or("MODEL_NAME", DEFAULT_MODEL),
            persona: PersonaProfile::default(),
            optimizer: OptimizerConfig {
                max_demos: parse_env("MAX_BOOTSTRAPPED_DEMOS", defaults.max_demos)?,
                num_candidates: parse_env("NUM_CANDIDATE_PROGRAMS", defaults.num_candidates)?,
                seed: parse_env("OPTIMIZER_SEED", defaults.seed)?,
            },
            data_dir: PathBuf::from(env_or("DATA_DIR", "data")),
            output_dir: PathBuf::from(env_or("OUTPUT_DIR", "outputs")),
            llm_max_retries: parse_env("LLM_MAX_RETRIES", 0)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    pub fn training_path(&self) -> PathBuf {
        self.data_dir.join("training.json")
    }

    pub fn memory_path(&self) -> PathBuf {
        self.data_dir.join("memory.json")
    }

    pub fn compiled_path(&self) -> PathBuf {
        self.output_dir.join("compiled_writer.json")
    }
}

fn require_env(key: &str) -> Result<String, AppError> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::Configuration(format!(
            "{key} not found in environment or .env file"
        ))),
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: FromStr>(key: &str, default: T) -> Result<T, AppError> {
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, AppError> {
    raw.trim().parse::<T>().map_err(|_| {
        AppError::Configuration(format!("{key} must be a non-negative integer, got '{raw}'"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_accepts_integers() {
        let n: usize = parse_value("MAX_BOOTSTRAPPED_DEMOS", " 4 ").unwrap();
        assert_eq!(n, 4);
    }

    #[test]
    fn test_parse_value_rejects_garbage() {
        let err = parse_value::<usize>("NUM_CANDIDATE_PROGRAMS", "six").unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert!(err.to_string().contains("NUM_CANDIDATE_PROGRAMS"));
    }

    #[test]
    fn test_optimizer_defaults() {
        let cfg = OptimizerConfig::default();
        assert_eq!(cfg.max_demos, 2);
        assert_eq!(cfg.num_candidates, 6);
    }

    #[test]
    fn test_missing_required_env_is_configuration_error() {
        let err = require_env("WRITER_TEST_SURELY_UNSET_KEY").unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert!(err.to_string().contains("WRITER_TEST_SURELY_UNSET_KEY"));
    }
}
