use std::env;
use std::str::FromStr;

use civic_common::error::{CivicError, CivicResult};
use civic_dedupe::ScoringConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    /// Absent when the host supplies its own repository.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub log_level: String,
    /// Upper bound on issues fetched per duplicate check.
    pub candidate_limit: Option<i64>,
    pub scoring: ScoringConfig,
}

impl EngineSettings {
    /// Load settings from environment variables.
    /// Loads `.env` file if present; scoring values not set in the
    /// environment keep their defaults.
    pub fn from_env() -> CivicResult<Self> {
        // Best-effort .env load; ignore if missing
        let _ = dotenvy::dotenv();

        let mut scoring = ScoringConfig::default();
        if let Some(v) = parse_var("DUPLICATE_THRESHOLD")? {
            scoring.thresholds.duplicate = v;
        }
        if let Some(v) = parse_var("INCLUSION_FLOOR")? {
            scoring.thresholds.inclusion_floor = v;
        }
        if let Some(v) = parse_var("VOTING_SIMILARITY_THRESHOLD")? {
            scoring.thresholds.voting_similarity = v;
        }
        if let Some(v) = parse_var("DEDUPE_RADIUS_KM")? {
            scoring.dedupe_radius_km = v;
        }
        if let Some(v) = parse_var("VOTING_RADIUS_KM")? {
            scoring.voting_radius_km = v;
        }
        scoring
            .validate()
            .map_err(|e| CivicError::Config(format!("invalid scoring settings: {e}")))?;

        Ok(Self {
            database_url: env::var("DATABASE_URL").ok(),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS")?.unwrap_or(5),
            log_level: get_var_or("LOG_LEVEL", "info"),
            candidate_limit: parse_var("CANDIDATE_LIMIT")?,
            scoring,
        })
    }
}

fn parse_var<T>(key: &str) -> CivicResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| CivicError::Config(format!("invalid {key}: {e}"))),
        Err(_) => Ok(None),
    }
}

fn get_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
