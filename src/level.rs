use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::normalize::ValidationError;

/// Severity of a log record.
///
/// The set is closed and linearly ordered: `Error` is the most severe,
/// `Silly` the least. The derived `Ord` follows declaration order, so a
/// numerically smaller level is more severe — the same convention the
/// `log` crate uses for its filter comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
    Verbose,
    Silly,
}

impl Level {
    /// All levels, most severe first.
    pub const ALL: [Level; 6] = [
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Debug,
        Level::Verbose,
        Level::Silly,
    ];

    /// Lowercase name used in serialized records.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Verbose => "verbose",
            Level::Silly => "silly",
        }
    }

    /// Look up a level by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Level> {
        Level::ALL
            .iter()
            .copied()
            .find(|level| level.as_str().eq_ignore_ascii_case(name))
    }

    /// Whether a record at `candidate` severity passes a threshold of
    /// `self`: anything less severe than the threshold is rejected.
    pub fn permits(self, candidate: Level) -> bool {
        candidate <= self
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::from_name(s).ok_or_else(|| ValidationError::UnknownLevel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_order() {
        assert!(Level::Error < Level::Warn);
        assert!(Level::Info < Level::Silly);
        assert!(Level::Debug < Level::Verbose);
    }

    #[test]
    fn threshold_permits_equal_or_more_severe() {
        assert!(Level::Info.permits(Level::Error));
        assert!(Level::Info.permits(Level::Info));
        assert!(!Level::Info.permits(Level::Debug));
        assert!(Level::Silly.permits(Level::Verbose));
    }

    #[test]
    fn names_round_trip() {
        for level in Level::ALL {
            assert_eq!(Level::from_name(level.as_str()), Some(level));
        }
        assert_eq!(Level::from_name("WARN"), Some(Level::Warn));
        assert_eq!(Level::from_name("loud"), None);
    }

    #[test]
    fn parse_failure_names_the_level() {
        let err = "loud".parse::<Level>().unwrap_err();
        assert_eq!(err, ValidationError::UnknownLevel("loud".to_string()));
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Level::Error).unwrap(), "\"error\"");
        assert_eq!(serde_json::to_string(&Level::Verbose).unwrap(), "\"verbose\"");
    }
}
