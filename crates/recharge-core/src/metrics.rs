//! Dashboard read model.
//!
//! Everything here is derived and recomputable; the upstream UI reads
//! these values for display and never writes them back.

use serde::{Deserialize, Serialize};

use crate::battery::LevelReading;

/// Discrete classification of the current battery level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskTier {
    /// Tier bands: < 30 critical, < 50 high, < 70 medium, else low.
    pub fn from_level(level: f64) -> Self {
        if level < 30.0 {
            RiskTier::Critical
        } else if level < 50.0 {
            RiskTier::High
        } else if level < 70.0 {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }
}

/// Direction the battery has been moving recently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Stable,
    Falling,
}

impl Trend {
    /// Compare the mean of the three most recent readings against the
    /// mean of the three before them; a gap beyond ±5 points tips the
    /// classification. Fewer than two readings is always `Stable`.
    pub fn classify(readings: &[LevelReading]) -> Self {
        if readings.len() < 2 {
            return Trend::Stable;
        }
        let recent_start = readings.len().saturating_sub(3);
        let prior_start = recent_start.saturating_sub(3);
        let recent = &readings[recent_start..];
        let prior = &readings[prior_start..recent_start];
        if prior.is_empty() {
            return Trend::Stable;
        }

        let mean = |rs: &[LevelReading]| {
            rs.iter().map(|r| r.level).sum::<f64>() / rs.len() as f64
        };
        let diff = mean(recent) - mean(prior);
        if diff > 5.0 {
            Trend::Rising
        } else if diff < -5.0 {
            Trend::Falling
        } else {
            Trend::Stable
        }
    }
}

/// Snapshot of everything the dashboard displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    /// Current battery level, 0-100
    pub current_level: f64,
    /// Interaction minutes logged today
    pub today_minutes: u32,
    /// Interaction minutes logged this calendar week
    pub week_minutes: u32,
    /// Minutes until passive recovery resumes; 0 when already recovering
    pub next_recovery_eta_min: i64,
    /// Recent level direction
    pub trend: Trend,
    /// Risk classification of the current level
    pub risk: RiskTier,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn readings(levels: &[f64]) -> Vec<LevelReading> {
        let base = Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap();
        levels
            .iter()
            .enumerate()
            .map(|(i, level)| LevelReading {
                at: base + Duration::hours(i as i64),
                level: *level,
            })
            .collect()
    }

    #[test]
    fn risk_tier_bands() {
        assert_eq!(RiskTier::from_level(20.0), RiskTier::Critical);
        assert_eq!(RiskTier::from_level(29.9), RiskTier::Critical);
        assert_eq!(RiskTier::from_level(30.0), RiskTier::High);
        assert_eq!(RiskTier::from_level(49.9), RiskTier::High);
        assert_eq!(RiskTier::from_level(50.0), RiskTier::Medium);
        assert_eq!(RiskTier::from_level(69.9), RiskTier::Medium);
        assert_eq!(RiskTier::from_level(70.0), RiskTier::Low);
        assert_eq!(RiskTier::from_level(100.0), RiskTier::Low);
    }

    #[test]
    fn trend_needs_history() {
        assert_eq!(Trend::classify(&[]), Trend::Stable);
        assert_eq!(Trend::classify(&readings(&[50.0])), Trend::Stable);
    }

    #[test]
    fn trend_rises_and_falls() {
        assert_eq!(
            Trend::classify(&readings(&[40.0, 42.0, 41.0, 60.0, 62.0, 65.0])),
            Trend::Rising
        );
        assert_eq!(
            Trend::classify(&readings(&[80.0, 78.0, 82.0, 60.0, 58.0, 55.0])),
            Trend::Falling
        );
        assert_eq!(
            Trend::classify(&readings(&[60.0, 62.0, 58.0, 61.0, 59.0, 60.0])),
            Trend::Stable
        );
    }

    #[test]
    fn trend_with_short_history_compares_what_exists() {
        // Two readings: recent window is both, prior is empty -> stable.
        assert_eq!(Trend::classify(&readings(&[40.0, 90.0])), Trend::Stable);
        // Four readings: recent three vs the single prior one.
        assert_eq!(
            Trend::classify(&readings(&[40.0, 60.0, 62.0, 64.0])),
            Trend::Rising
        );
    }
}
