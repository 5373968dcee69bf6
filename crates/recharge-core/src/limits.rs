//! Adaptive personal limits derived from interaction history.
//!
//! Limits are a pure function of the trailing 30-day window of the
//! interaction log and are recomputed on every log mutation. They are
//! adaptive thresholds, distinct from any fixed configuration.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::interaction::SocialInteraction;

/// Fallback daily interaction budget in minutes.
pub const DEFAULT_DAILY_LIMIT_MIN: u32 = 240;
/// Fallback weekly interaction budget in minutes.
pub const DEFAULT_WEEKLY_LIMIT_MIN: u32 = 1200;
/// Fallback recovery time in hours.
pub const DEFAULT_RECOVERY_HOURS: u32 = 8;
/// Fallback optimal social level.
pub const DEFAULT_OPTIMAL_LEVEL: u8 = 70;

/// History-derived caps and targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalLimits {
    /// Suggested cap on interaction minutes per day
    pub daily_interaction_limit_min: u32,
    /// Suggested cap on interaction minutes per week
    pub weekly_interaction_limit_min: u32,
    /// Hours of recovery the user typically needs
    pub recovery_time_needed_hours: u32,
    /// Battery level at which interactions are most enjoyed, 0-100
    pub optimal_social_level: u8,
}

impl Default for PersonalLimits {
    fn default() -> Self {
        Self {
            daily_interaction_limit_min: DEFAULT_DAILY_LIMIT_MIN,
            weekly_interaction_limit_min: DEFAULT_WEEKLY_LIMIT_MIN,
            recovery_time_needed_hours: DEFAULT_RECOVERY_HOURS,
            optimal_social_level: DEFAULT_OPTIMAL_LEVEL,
        }
    }
}

/// Estimator for [`PersonalLimits`].
#[derive(Debug, Clone)]
pub struct LimitsEstimator {
    /// Trailing window in days for calculations
    pub window_days: i64,
}

impl Default for LimitsEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl LimitsEstimator {
    /// Estimator over the default 30-day window.
    pub fn new() -> Self {
        Self { window_days: 30 }
    }

    /// Estimator over a custom window.
    pub fn with_window(window_days: i64) -> Self {
        Self { window_days }
    }

    /// Derive limits from the trailing window of the log.
    ///
    /// Pure and idempotent; an empty window yields the fixed defaults and
    /// never an error.
    pub fn estimate(
        &self,
        interactions: &[SocialInteraction],
        now: DateTime<Utc>,
    ) -> PersonalLimits {
        let cutoff = now - Duration::days(self.window_days);
        let recent: Vec<&SocialInteraction> = interactions
            .iter()
            .filter(|i| i.timestamp >= cutoff)
            .collect();

        if recent.is_empty() {
            return PersonalLimits::default();
        }

        // Minutes per calendar day, averaged over days that saw activity.
        let mut by_day: BTreeMap<NaiveDate, u32> = BTreeMap::new();
        for i in &recent {
            *by_day.entry(i.timestamp.date_naive()).or_insert(0) += i.duration_min;
        }
        let avg_daily_min =
            f64::from(by_day.values().sum::<u32>()) / by_day.len() as f64;

        let daily = (avg_daily_min * 1.2).ceil() as u32;
        let weekly = (avg_daily_min * 7.0 * 1.1).ceil() as u32;

        let avg_intensity = recent
            .iter()
            .map(|i| f64::from(i.intensity))
            .sum::<f64>()
            / recent.len() as f64;
        let recovery_hours = (6.0 + (avg_intensity / 10.0) * 6.0).ceil() as u32;

        PersonalLimits {
            daily_interaction_limit_min: daily,
            weekly_interaction_limit_min: weekly,
            recovery_time_needed_hours: recovery_hours.clamp(6, 12),
            optimal_social_level: optimal_level(&recent),
        }
    }
}

/// Battery level at which interactions are most enjoyed.
///
/// Buckets `energy_before` into width-10 bins, takes mean enjoyment per
/// bin, and returns the midpoint of the best bin.
fn optimal_level(interactions: &[&SocialInteraction]) -> u8 {
    let mut sums = [0u32; 10];
    let mut counts = [0u32; 10];
    for i in interactions {
        let bin = (usize::from(i.energy_before) / 10).min(9);
        sums[bin] += u32::from(i.enjoyment);
        counts[bin] += 1;
    }

    let mut best: Option<(usize, f64)> = None;
    for bin in 0..10 {
        if counts[bin] == 0 {
            continue;
        }
        let mean = f64::from(sums[bin]) / f64::from(counts[bin]);
        match best {
            Some((_, best_mean)) if mean <= best_mean => {}
            _ => best = Some((bin, mean)),
        }
    }

    match best {
        Some((bin, _)) => (bin * 10 + 5) as u8,
        None => DEFAULT_OPTIMAL_LEVEL,
    }
}
