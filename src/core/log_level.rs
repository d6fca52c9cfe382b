//! Log level definitions
//!
//! The level table is fixed: eight severities ranked 1 (most severe) to 8.

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum LogLevel {
    Emergency = 1,
    Alert = 2,
    Critical = 3,
    Error = 4,
    Warning = 5,
    Notice = 6,
    Info = 7,
    Debug = 8,
}

impl LogLevel {
    /// Every level, most severe first
    pub const ALL: [LogLevel; 8] = [
        LogLevel::Emergency,
        LogLevel::Alert,
        LogLevel::Critical,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Notice,
        LogLevel::Info,
        LogLevel::Debug,
    ];

    /// Numeric rank, 1 = most severe
    #[inline]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    pub fn from_rank(rank: i64) -> Option<Self> {
        match rank {
            1 => Some(LogLevel::Emergency),
            2 => Some(LogLevel::Alert),
            3 => Some(LogLevel::Critical),
            4 => Some(LogLevel::Error),
            5 => Some(LogLevel::Warning),
            6 => Some(LogLevel::Notice),
            7 => Some(LogLevel::Info),
            8 => Some(LogLevel::Debug),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            LogLevel::Emergency => "emergency",
            LogLevel::Alert => "alert",
            LogLevel::Critical => "critical",
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Notice => "notice",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    /// Upper-case label used by the built-in handlers
    pub const fn label(self) -> &'static str {
        match self {
            LogLevel::Emergency => "EMERGENCY",
            LogLevel::Alert => "ALERT",
            LogLevel::Critical => "CRITICAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Notice => "NOTICE",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Emergency | LogLevel::Alert => BrightRed,
            LogLevel::Critical | LogLevel::Error => Red,
            LogLevel::Warning => Yellow,
            LogLevel::Notice => Cyan,
            LogLevel::Info => Green,
            LogLevel::Debug => Blue,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "emergency" => Ok(LogLevel::Emergency),
            "alert" => Ok(LogLevel::Alert),
            "critical" => Ok(LogLevel::Critical),
            "error" => Ok(LogLevel::Error),
            "warning" => Ok(LogLevel::Warning),
            "notice" => Ok(LogLevel::Notice),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, String> {
        value.parse()
    }
}

/// A level as supplied by a caller or a threshold list: a level, a name, or a rank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelSpec {
    Level(LogLevel),
    Rank(i64),
    Name(String),
}

impl LevelSpec {
    /// Map the input onto the level table.
    ///
    /// Numeric strings are treated as ranks.
    pub fn resolve(&self) -> Result<LogLevel> {
        match self {
            LevelSpec::Level(level) => Ok(*level),
            LevelSpec::Rank(rank) => {
                LogLevel::from_rank(*rank).ok_or_else(|| LoggerError::invalid_level(rank.to_string()))
            }
            LevelSpec::Name(name) => match name.trim().parse::<i64>() {
                Ok(rank) => LevelSpec::Rank(rank).resolve(),
                Err(_) => name
                    .parse::<LogLevel>()
                    .map_err(|_| LoggerError::invalid_level(name.as_str())),
            },
        }
    }
}

impl fmt::Display for LevelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelSpec::Level(level) => write!(f, "{}", level),
            LevelSpec::Rank(rank) => write!(f, "{}", rank),
            LevelSpec::Name(name) => f.write_str(name),
        }
    }
}

impl From<LogLevel> for LevelSpec {
    fn from(level: LogLevel) -> Self {
        LevelSpec::Level(level)
    }
}

impl From<&str> for LevelSpec {
    fn from(name: &str) -> Self {
        LevelSpec::Name(name.to_string())
    }
}

impl From<String> for LevelSpec {
    fn from(name: String) -> Self {
        LevelSpec::Name(name)
    }
}

impl From<i64> for LevelSpec {
    fn from(rank: i64) -> Self {
        LevelSpec::Rank(rank)
    }
}

impl From<i32> for LevelSpec {
    fn from(rank: i32) -> Self {
        LevelSpec::Rank(rank as i64)
    }
}

impl From<u8> for LevelSpec {
    fn from(rank: u8) -> Self {
        LevelSpec::Rank(rank as i64)
    }
}
