use super::errors::{DomainError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

// ── SearchQuery ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn new(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(DomainError::InvalidInput("Provide a search query".into()));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── ResourceId ────────────────────────────────────────────────────────────────

/// Positive TVMaze identifier of a show or a season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(u64);

impl ResourceId {
    pub fn new(field: &str, raw: i64) -> Result<Self> {
        if raw <= 0 {
            return Err(DomainError::InvalidInput(format!(
                "'{}' must be a positive integer (got {})",
                field, raw
            )));
        }
        Ok(Self(raw as u64))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── PreviewLimit ──────────────────────────────────────────────────────────────

/// Bound on how many entries a tool returns or previews, always in `1..=20`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreviewLimit(usize);

impl PreviewLimit {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 20;
    pub const DEFAULT: usize = 5;

    pub fn new(field: &str, raw: i64) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&raw) {
            return Err(DomainError::InvalidInput(format!(
                "'{}' must be between {} and {} (got {})",
                field,
                Self::MIN,
                Self::MAX,
                raw
            )));
        }
        Ok(Self(raw as usize))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for PreviewLimit {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for PreviewLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
