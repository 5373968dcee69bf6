//! Passive recovery scheduling.
//!
//! The scheduler is a wall-clock-based state machine. It does not use
//! internal threads or timers -- the host owns the periodic timer
//! (recommended cadence: 15 minutes) and calls `tick()` with the current
//! time; tearing down the host timer is all the cancellation there is.
//!
//! ## State Transitions
//!
//! ```text
//! Idle (within interaction cooldown) -> Recovering (ticks apply) -> Idle on next interaction
//! ```
//!
//! A tick applies recovery only when both gates pass: enough time since
//! the last applied tick, and enough time since the last interaction.
//! You don't recover while still actively drained.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Pure recovery law: `min(level + rate * hours, 100)`.
///
/// Monotonic non-decreasing in `hours_elapsed` for non-negative rates.
pub fn recover(level: f64, hours_elapsed: f64, rate_per_hour: f64) -> f64 {
    (level + rate_per_hour * hours_elapsed).min(100.0)
}

/// Whether the battery is currently allowed to recover passively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryPhase {
    /// Within the post-interaction cooldown; ticks are no-ops.
    Idle,
    /// Cooldown cleared; ticks apply recovery.
    Recovering,
}

/// Outcome of a single recovery tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Recovery was applied.
    Applied {
        new_level: f64,
        recovered: f64,
        hours: f64,
    },
    /// Both gates did not pass; nothing changed.
    Skipped(SkipReason),
}

/// Why a tick was a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Less than the tick interval since the last applied tick.
    TickTooSoon,
    /// Less than the cooldown since the last interaction.
    CoolingDown,
    /// No reference point yet; this tick only armed the clock.
    NoReference,
}

/// Gated wall-clock recovery scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryScheduler {
    /// Minimum minutes between applied ticks.
    pub tick_interval_min: i64,
    /// Minutes after an interaction during which recovery is suppressed.
    pub cooldown_min: i64,
    /// When the last tick was applied, if any.
    #[serde(default)]
    last_tick_at: Option<DateTime<Utc>>,
}

impl Default for RecoveryScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl RecoveryScheduler {
    /// Scheduler with the default 15-minute tick spacing and 30-minute
    /// interaction cooldown.
    pub fn new() -> Self {
        Self {
            tick_interval_min: 15,
            cooldown_min: 30,
            last_tick_at: None,
        }
    }

    /// Scheduler with custom gate settings.
    pub fn with_settings(tick_interval_min: i64, cooldown_min: i64) -> Self {
        Self {
            tick_interval_min,
            cooldown_min,
            last_tick_at: None,
        }
    }

    /// Current phase, given the time of the most recent interaction.
    pub fn phase(
        &self,
        now: DateTime<Utc>,
        last_interaction_at: Option<DateTime<Utc>>,
    ) -> RecoveryPhase {
        match last_interaction_at {
            Some(at) if now - at < Duration::minutes(self.cooldown_min) => RecoveryPhase::Idle,
            _ => RecoveryPhase::Recovering,
        }
    }

    /// Minutes until the cooldown clears; 0 when already recovering.
    pub fn minutes_until_recovery(
        &self,
        now: DateTime<Utc>,
        last_interaction_at: Option<DateTime<Utc>>,
    ) -> i64 {
        match last_interaction_at {
            Some(at) => {
                let clears_at = at + Duration::minutes(self.cooldown_min);
                (clears_at - now).num_minutes().max(0)
            }
            None => 0,
        }
    }

    /// An interaction was committed: the next applied tick starts its
    /// elapsed clock from the cooldown expiry, not from before the drain.
    pub fn on_interaction(&mut self) {
        self.last_tick_at = None;
    }

    /// Run one tick of the scheduler.
    ///
    /// Elapsed hours are measured from the last applied tick; the first
    /// tick after an interaction measures from cooldown expiry, so no
    /// recovery is credited for time spent inside the cooldown.
    pub fn tick(
        &mut self,
        now: DateTime<Utc>,
        last_interaction_at: Option<DateTime<Utc>>,
        level: f64,
        rate_per_hour: f64,
    ) -> TickOutcome {
        if let Some(last) = self.last_tick_at {
            if now - last < Duration::minutes(self.tick_interval_min) {
                return TickOutcome::Skipped(SkipReason::TickTooSoon);
            }
        }
        if let Some(at) = last_interaction_at {
            if now - at < Duration::minutes(self.cooldown_min) {
                return TickOutcome::Skipped(SkipReason::CoolingDown);
            }
        }

        let basis = match self.last_tick_at {
            Some(last) => last,
            None => match last_interaction_at {
                Some(at) => at + Duration::minutes(self.cooldown_min),
                None => {
                    // Fresh state with no history: arm the clock only.
                    self.last_tick_at = Some(now);
                    return TickOutcome::Skipped(SkipReason::NoReference);
                }
            },
        };

        let hours = ((now - basis).num_seconds().max(0) as f64) / 3600.0;
        let new_level = recover(level, hours, rate_per_hour);
        self.last_tick_at = Some(now);
        TickOutcome::Applied {
            new_level,
            recovered: new_level - level,
            hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap() + Duration::minutes(minute)
    }

    #[test]
    fn recover_law() {
        assert_eq!(recover(50.0, 2.0, 8.0), 66.0);
        assert_eq!(recover(50.0, 0.0, 8.0), 50.0);
        assert_eq!(recover(99.0, 10.0, 8.0), 100.0);
        assert_eq!(recover(100.0, 5.0, 8.0), 100.0);
    }

    #[test]
    fn tick_skipped_inside_cooldown() {
        let mut sched = RecoveryScheduler::new();
        let outcome = sched.tick(at(20), Some(at(0)), 50.0, 8.0);
        assert_eq!(outcome, TickOutcome::Skipped(SkipReason::CoolingDown));
        assert_eq!(sched.phase(at(20), Some(at(0))), RecoveryPhase::Idle);
    }

    #[test]
    fn first_tick_after_cooldown_measures_from_expiry() {
        let mut sched = RecoveryScheduler::new();
        // Interaction at t=0, cooldown clears at t=30, tick at t=90.
        match sched.tick(at(90), Some(at(0)), 50.0, 8.0) {
            TickOutcome::Applied {
                new_level, hours, ..
            } => {
                assert!((hours - 1.0).abs() < 1e-9);
                assert!((new_level - 58.0).abs() < 1e-9);
            }
            other => panic!("expected applied tick, got {other:?}"),
        }
    }

    #[test]
    fn second_tick_measures_from_previous_tick() {
        let mut sched = RecoveryScheduler::new();
        sched.tick(at(90), Some(at(0)), 50.0, 8.0);
        match sched.tick(at(120), Some(at(0)), 58.0, 8.0) {
            TickOutcome::Applied {
                new_level, hours, ..
            } => {
                assert!((hours - 0.5).abs() < 1e-9);
                assert!((new_level - 62.0).abs() < 1e-9);
            }
            other => panic!("expected applied tick, got {other:?}"),
        }
    }

    #[test]
    fn rapid_ticks_are_gated() {
        let mut sched = RecoveryScheduler::new();
        sched.tick(at(90), Some(at(0)), 50.0, 8.0);
        let outcome = sched.tick(at(95), Some(at(0)), 58.0, 8.0);
        assert_eq!(outcome, TickOutcome::Skipped(SkipReason::TickTooSoon));
    }

    #[test]
    fn interaction_resets_the_clock() {
        let mut sched = RecoveryScheduler::new();
        sched.tick(at(90), Some(at(0)), 50.0, 8.0);
        sched.on_interaction();
        // New interaction at t=100; tick at t=110 is inside the new cooldown.
        let outcome = sched.tick(at(110), Some(at(100)), 40.0, 8.0);
        assert_eq!(outcome, TickOutcome::Skipped(SkipReason::CoolingDown));
    }

    #[test]
    fn fresh_state_arms_the_clock() {
        let mut sched = RecoveryScheduler::new();
        let outcome = sched.tick(at(0), None, 75.0, 8.0);
        assert_eq!(outcome, TickOutcome::Skipped(SkipReason::NoReference));
        // Next tick applies from the armed reference.
        match sched.tick(at(60), None, 75.0, 8.0) {
            TickOutcome::Applied { hours, .. } => assert!((hours - 1.0).abs() < 1e-9),
            other => panic!("expected applied tick, got {other:?}"),
        }
    }

    #[test]
    fn level_never_exceeds_hundred() {
        let mut sched = RecoveryScheduler::new();
        sched.tick(at(0), None, 98.0, 8.0);
        match sched.tick(at(600), None, 98.0, 8.0) {
            TickOutcome::Applied { new_level, .. } => assert_eq!(new_level, 100.0),
            other => panic!("expected applied tick, got {other:?}"),
        }
    }
}
