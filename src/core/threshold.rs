//! Threshold configuration and the loggable-level set derived from it

use super::error::{LoggerError, Result};
use super::log_level::{LevelSpec, LogLevel};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which severities reach the handlers.
///
/// A single number `N` means "rank N and everything more severe"; a list names
/// the loggable levels explicitly, by rank or by name. Any integer is accepted
/// as a maximum: zero or below admits nothing, above 8 admits everything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Threshold {
    Max(i64),
    Levels(Vec<LevelSpec>),
}

impl Threshold {
    /// Expand into the immutable set of loggable levels.
    ///
    /// `Max(n)` with `n <= 0` yields the empty set and any rank above 8 yields
    /// every level.
    /// Unknown entries in an explicit list are a configuration error.
    pub fn loggable_levels(&self) -> Result<LoggableLevels> {
        match self {
            Threshold::Max(max) => Ok(LogLevel::ALL
                .iter()
                .filter(|level| i64::from(level.rank()) <= *max)
                .copied()
                .collect()),
            Threshold::Levels(specs) => specs
                .iter()
                .map(|spec| {
                    spec.resolve()
                        .map_err(|_| LoggerError::config("threshold", format!("unknown level '{}'", spec)))
                })
                .collect(),
        }
    }
}

impl Default for Threshold {
    /// Everything up to and including `debug`
    fn default() -> Self {
        Threshold::Max(i64::from(LogLevel::Debug.rank()))
    }
}

impl From<LogLevel> for Threshold {
    fn from(level: LogLevel) -> Self {
        Threshold::Max(i64::from(level.rank()))
    }
}

impl From<u8> for Threshold {
    fn from(max: u8) -> Self {
        Threshold::Max(i64::from(max))
    }
}

impl From<i64> for Threshold {
    fn from(max: i64) -> Self {
        Threshold::Max(max)
    }
}

impl From<Vec<LogLevel>> for Threshold {
    fn from(levels: Vec<LogLevel>) -> Self {
        Threshold::Levels(levels.into_iter().map(LevelSpec::Level).collect())
    }
}

/// Fixed set of levels the dispatcher forwards; one bit per rank
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LoggableLevels(u8);

impl LoggableLevels {
    #[must_use]
    pub const fn none() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn all() -> Self {
        Self(u8::MAX)
    }

    #[inline]
    const fn bit(level: LogLevel) -> u8 {
        1 << (level.rank() - 1)
    }

    #[must_use]
    pub fn with(mut self, level: LogLevel) -> Self {
        self.0 |= Self::bit(level);
        self
    }

    #[inline]
    pub fn contains(&self, level: LogLevel) -> bool {
        self.0 & Self::bit(level) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Loggable levels, most severe first
    pub fn iter(&self) -> impl Iterator<Item = LogLevel> + '_ {
        LogLevel::ALL.into_iter().filter(move |level| self.contains(*level))
    }
}

impl FromIterator<LogLevel> for LoggableLevels {
    fn from_iter<I: IntoIterator<Item = LogLevel>>(iter: I) -> Self {
        iter.into_iter().fold(Self::none(), Self::with)
    }
}

impl fmt::Debug for LoggableLevels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
