// ── Auto-refresh interval ──

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// How often a binding re-reads its topology source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RefreshInterval {
    #[default]
    Off,
    FiveSeconds,
    TenSeconds,
    ThirtySeconds,
    SixtySeconds,
}

impl RefreshInterval {
    pub const ALL: [Self; 5] = [
        Self::Off,
        Self::FiveSeconds,
        Self::TenSeconds,
        Self::ThirtySeconds,
        Self::SixtySeconds,
    ];

    pub fn duration(self) -> Option<Duration> {
        let secs = match self {
            Self::Off => return None,
            Self::FiveSeconds => 5,
            Self::TenSeconds => 10,
            Self::ThirtySeconds => 30,
            Self::SixtySeconds => 60,
        };
        Some(Duration::from_secs(secs))
    }

    /// Next interval in the off → 5s → 10s → 30s → 60s → off cycle.
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            Self::Off => Self::FiveSeconds,
            Self::FiveSeconds => Self::TenSeconds,
            Self::TenSeconds => Self::ThirtySeconds,
            Self::ThirtySeconds => Self::SixtySeconds,
            Self::SixtySeconds => Self::Off,
        }
    }

    pub fn is_enabled(self) -> bool {
        self != Self::Off
    }
}

impl fmt::Display for RefreshInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.duration() {
            None => f.write_str("off"),
            Some(d) => write!(f, "{}", humantime::format_duration(d)),
        }
    }
}

impl FromStr for RefreshInterval {
    type Err = CoreError;

    /// Accepts `off` or any humantime duration equal to a supported step
    /// (`30s`, `1m`, `60s`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("off") || trimmed == "0" {
            return Ok(Self::Off);
        }
        let duration =
            humantime::parse_duration(trimmed).map_err(|e| CoreError::InvalidRefresh {
                value: s.to_owned(),
                reason: e.to_string(),
            })?;
        Self::ALL
            .into_iter()
            .find(|i| i.duration() == Some(duration))
            .ok_or_else(|| CoreError::InvalidRefresh {
                value: s.to_owned(),
                reason: "supported intervals are off, 5s, 10s, 30s, 60s".into(),
            })
    }
}

impl Serialize for RefreshInterval {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RefreshInterval {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
