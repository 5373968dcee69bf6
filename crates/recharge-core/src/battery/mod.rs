//! Battery state model.
//!
//! The battery is a bounded [0, 100] resource. Exactly two pathways
//! mutate it: an interaction commit (level becomes the user-reported
//! `energy_after`) and an applied recovery tick (additive, capped at 100).

pub mod drain;
pub mod recovery;

pub use drain::{compute_drain, MAX_DRAIN, MIN_DRAIN};
pub use recovery::{recover, RecoveryPhase, RecoveryScheduler, SkipReason, TickOutcome};

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::interaction::SocialInteraction;
use crate::limits::PersonalLimits;

/// Default level for a fresh battery with no history.
pub const DEFAULT_LEVEL: f64 = 75.0;
/// Default passive recovery rate in battery points per hour.
pub const DEFAULT_RECOVERY_RATE: f64 = 8.0;
/// Readings older than this are pruned from the in-state history.
const READING_HORIZON_DAYS: i64 = 90;

/// A single observation of the battery level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelReading {
    /// When the level was observed
    pub at: DateTime<Utc>,
    /// Battery level at that moment, 0-100
    pub level: f64,
}

/// Derived per-week usage statistics. Recomputable from the log at any
/// time; never authoritative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStats {
    /// Interaction minutes logged today
    pub today_minutes: u32,
    /// Interaction minutes logged this calendar week
    pub week_minutes: u32,
    /// Interactions logged this calendar week
    pub week_count: u32,
    /// Mean enjoyment across this week's interactions
    pub avg_enjoyment: f64,
}

impl WeeklyStats {
    /// Recompute from the interaction log.
    pub fn compute(interactions: &[SocialInteraction], now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let week = now.iso_week();

        let mut stats = WeeklyStats::default();
        let mut enjoyment_sum = 0u32;
        for i in interactions {
            let date = i.timestamp.date_naive();
            if date == today {
                stats.today_minutes += i.duration_min;
            }
            let iw = i.timestamp.iso_week();
            if iw.year() == week.year() && iw.week() == week.week() {
                stats.week_minutes += i.duration_min;
                stats.week_count += 1;
                enjoyment_sum += u32::from(i.enjoyment);
            }
        }
        if stats.week_count > 0 {
            stats.avg_enjoyment = f64::from(enjoyment_sum) / f64::from(stats.week_count);
        }
        stats
    }
}

/// The social battery.
///
/// Invariant: `0 <= current_level <= 100` at every observation point;
/// all writes go through [`BatteryState::set_level`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatteryState {
    /// Current battery level, 0-100
    current_level: f64,
    /// Passive recovery rate in points per hour
    pub recovery_rate: f64,
    /// Most recent interaction, by id (lookup only, not ownership)
    pub last_interaction_id: Option<Uuid>,
    /// When the most recent interaction happened
    pub last_interaction_at: Option<DateTime<Utc>>,
    /// Adaptive limits derived from the trailing interaction history
    pub personal_limits: PersonalLimits,
    /// Derived weekly usage statistics
    pub weekly_stats: WeeklyStats,
    /// Recent level observations, appended on every committed mutation
    #[serde(default)]
    pub readings: Vec<LevelReading>,
}

impl Default for BatteryState {
    fn default() -> Self {
        Self::new()
    }
}

impl BatteryState {
    /// Fresh battery at the default level.
    pub fn new() -> Self {
        Self {
            current_level: DEFAULT_LEVEL,
            recovery_rate: DEFAULT_RECOVERY_RATE,
            last_interaction_id: None,
            last_interaction_at: None,
            personal_limits: PersonalLimits::default(),
            weekly_stats: WeeklyStats::default(),
            readings: Vec::new(),
        }
    }

    /// Current battery level, 0-100.
    pub fn current_level(&self) -> f64 {
        self.current_level
    }

    /// Set the level, clamping into [0, 100].
    pub fn set_level(&mut self, level: f64) {
        self.current_level = level.clamp(0.0, 100.0);
    }

    /// Record a level observation and prune history past the horizon.
    pub fn push_reading(&mut self, at: DateTime<Utc>) {
        let level = self.current_level;
        self.readings.push(LevelReading { at, level });
        let horizon = at - Duration::days(READING_HORIZON_DAYS);
        self.readings.retain(|r| r.at >= horizon);
    }
}
