//! Behavioral pattern detection over battery history.
//!
//! Five independent detectors run over the level-reading history and the
//! interaction log. Each detector has a minimum sample size; below it,
//! the detector simply contributes no pattern. Analysis is a pure batch
//! computation -- patterns are regenerated on every call and are never
//! the system of record.

pub mod correlation;

pub use correlation::pearson;

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::battery::LevelReading;
use crate::interaction::SocialInteraction;

/// Category of a detected pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternKind {
    RecoveryNeeded,
    OptimalTiming,
    InteractionOverload,
    SocialDeficit,
    EnergyCorrelation,
}

/// Cadence a pattern describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternFrequency {
    Daily,
    Weekly,
}

/// A detected behavioral pattern. Ephemeral: regenerated per analysis
/// call, never persisted as authoritative state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pattern {
    pub id: Uuid,
    pub kind: PatternKind,
    /// Heuristic reliability score in [0, 1]; not a p-value.
    pub confidence: f64,
    pub frequency: PatternFrequency,
    /// Hours of day the pattern peaks at, when applicable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak_hours: Option<Vec<u8>>,
    /// Hours of day to avoid, when applicable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_hours: Option<Vec<u8>>,
    /// Best weekday (0 = Sunday), when applicable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak_weekday: Option<u8>,
    /// Numeric payload: recovery hours, correlation coefficient, day count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Human-readable description
    pub summary: String,
}

/// One day of an externally tracked overall-energy series, used by the
/// energy-correlation detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyEnergySample {
    pub date: NaiveDate,
    /// Overall (non-social) energy for the day, 0-100
    pub energy: f64,
}

const MAX_CONFIDENCE: f64 = 0.9;

const MIN_RECOVERY_PAIRS: usize = 3;
const MIN_RECHARGE_EVENTS: usize = 5;
const MIN_BEST_HOUR_HITS: usize = 3;

const MIN_SAMPLES_PER_HOUR: usize = 3;
const MIN_QUALIFYING_HOURS: usize = 3;
const MIN_SAMPLES_PER_WEEKDAY: usize = 2;
const MIN_QUALIFYING_WEEKDAYS: usize = 2;

const OVERLOAD_INTERACTIONS_PER_DAY: usize = 6;
const OVERLOAD_LEVEL: f64 = 40.0;
const MIN_OVERLOAD_DAYS: usize = 3;
const STREAK_LEVEL: f64 = 50.0;
const MIN_STREAK_RUN: usize = 3;

const DEFICIT_LEVEL: f64 = 80.0;
const MIN_DEFICIT_DAYS: usize = 3;
const MIN_ISOLATION_DAYS: usize = 2;
const ISOLATION_AVG_INTERACTIONS: f64 = 3.0;
const ISOLATION_CONFIDENCE: f64 = 0.7;

const MIN_CORRELATION_DAYS: usize = 7;

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Analyzer running all detectors over battery history.
#[derive(Debug, Clone)]
pub struct PatternAnalyzer {
    /// Level rise that counts as a recharge event
    pub recovery_rise_threshold: f64,
    /// Minimum |r| for the energy-correlation detector to report
    pub correlation_threshold: f64,
}

impl Default for PatternAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-day aggregation of readings and interactions.
#[derive(Debug, Default, Clone)]
struct DayBucket {
    interaction_count: usize,
    drains: usize,
    recharges: usize,
    /// Last observed battery level of the day
    last_level: Option<f64>,
}

impl PatternAnalyzer {
    /// Analyzer with default thresholds.
    pub fn new() -> Self {
        Self {
            recovery_rise_threshold: 10.0,
            correlation_threshold: 0.4,
        }
    }

    /// Run detectors 1-4 over the full history.
    pub fn analyze(
        &self,
        readings: &[LevelReading],
        interactions: &[SocialInteraction],
    ) -> Vec<Pattern> {
        let mut readings: Vec<LevelReading> = readings.to_vec();
        readings.sort_by_key(|r| r.at);
        let buckets = day_buckets(&readings, interactions);

        let mut patterns = Vec::new();
        self.detect_recovery_needed(&readings, &mut patterns);
        self.detect_optimal_timing(&readings, &mut patterns);
        self.detect_interaction_overload(&buckets, &mut patterns);
        self.detect_social_deficit(&buckets, &mut patterns);
        patterns
    }

    /// Run all five detectors; the correlation detector additionally
    /// needs an externally tracked overall-energy series.
    pub fn analyze_with_energy(
        &self,
        readings: &[LevelReading],
        interactions: &[SocialInteraction],
        overall_energy: &[DailyEnergySample],
    ) -> Vec<Pattern> {
        let mut patterns = self.analyze(readings, interactions);
        let mut sorted: Vec<LevelReading> = readings.to_vec();
        sorted.sort_by_key(|r| r.at);
        let buckets = day_buckets(&sorted, interactions);
        self.detect_energy_correlation(&buckets, overall_energy, &mut patterns);
        patterns
    }

    /// Detector 1: how long recovery takes, and when recharges happen.
    fn detect_recovery_needed(&self, readings: &[LevelReading], out: &mut Vec<Pattern>) {
        // A recharge event is a consecutive pair of readings where the
        // level rose by more than the threshold.
        let mut event_hours: Vec<f64> = Vec::new();
        let mut event_hour_of_day: Vec<u8> = Vec::new();
        for pair in readings.windows(2) {
            if pair[1].level - pair[0].level > self.recovery_rise_threshold {
                let hours = (pair[1].at - pair[0].at).num_seconds().max(0) as f64 / 3600.0;
                event_hours.push(hours);
                event_hour_of_day.push(pair[1].at.hour() as u8);
            }
        }

        if event_hours.len() >= MIN_RECOVERY_PAIRS {
            let avg_hours = event_hours.iter().sum::<f64>() / event_hours.len() as f64;
            out.push(Pattern {
                id: Uuid::new_v4(),
                kind: PatternKind::RecoveryNeeded,
                confidence: sample_confidence(event_hours.len()),
                frequency: PatternFrequency::Daily,
                peak_hours: None,
                low_hours: None,
                peak_weekday: None,
                value: Some(avg_hours),
                summary: format!(
                    "Your battery typically climbs back within about {avg_hours:.1} hours after a dip"
                ),
            });
        }

        // Sub-detector: most frequent hour-of-day among recharge events.
        if event_hour_of_day.len() >= MIN_RECHARGE_EVENTS {
            let mut counts = [0usize; 24];
            for h in &event_hour_of_day {
                counts[usize::from(*h)] += 1;
            }
            let (best_hour, best_count) = counts
                .iter()
                .enumerate()
                .max_by_key(|(_, c)| **c)
                .map(|(h, c)| (h as u8, *c))
                .unwrap_or((0, 0));
            if best_count >= MIN_BEST_HOUR_HITS {
                let share = best_count as f64 / event_hour_of_day.len() as f64;
                out.push(Pattern {
                    id: Uuid::new_v4(),
                    kind: PatternKind::RecoveryNeeded,
                    confidence: share.min(MAX_CONFIDENCE),
                    frequency: PatternFrequency::Daily,
                    peak_hours: Some(vec![best_hour]),
                    low_hours: None,
                    peak_weekday: None,
                    value: None,
                    summary: format!("Recharge events cluster around {best_hour:02}:00"),
                });
            }
        }
    }

    /// Detector 2: hours and weekdays where the battery runs highest.
    fn detect_optimal_timing(&self, readings: &[LevelReading], out: &mut Vec<Pattern>) {
        let mut by_hour: Vec<Vec<f64>> = vec![Vec::new(); 24];
        let mut by_weekday: Vec<Vec<f64>> = vec![Vec::new(); 7];
        for r in readings {
            by_hour[r.at.hour() as usize].push(r.level);
            by_weekday[r.at.weekday().num_days_from_sunday() as usize].push(r.level);
        }

        let mut hour_means: Vec<(u8, f64)> = by_hour
            .iter()
            .enumerate()
            .filter(|(_, samples)| samples.len() >= MIN_SAMPLES_PER_HOUR)
            .map(|(h, samples)| {
                (h as u8, samples.iter().sum::<f64>() / samples.len() as f64)
            })
            .collect();
        if hour_means.len() >= MIN_QUALIFYING_HOURS {
            hour_means
                .sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
            let peak: Vec<u8> = hour_means.iter().take(3).map(|(h, _)| *h).collect();
            let low = hour_means.last().map(|(h, _)| vec![*h]);
            out.push(Pattern {
                id: Uuid::new_v4(),
                kind: PatternKind::OptimalTiming,
                confidence: sample_confidence(hour_means.len()),
                frequency: PatternFrequency::Daily,
                peak_hours: Some(peak.clone()),
                low_hours: low,
                peak_weekday: None,
                value: None,
                summary: format!(
                    "Your battery runs highest around {:02}:00, {:02}:00 and {:02}:00",
                    peak[0],
                    peak.get(1).copied().unwrap_or(peak[0]),
                    peak.get(2).copied().unwrap_or(peak[0]),
                ),
            });
        }

        let weekday_means: Vec<(u8, f64)> = by_weekday
            .iter()
            .enumerate()
            .filter(|(_, samples)| samples.len() >= MIN_SAMPLES_PER_WEEKDAY)
            .map(|(d, samples)| {
                (d as u8, samples.iter().sum::<f64>() / samples.len() as f64)
            })
            .collect();
        if weekday_means.len() >= MIN_QUALIFYING_WEEKDAYS {
            let best = weekday_means
                .iter()
                .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
                .map(|(d, _)| *d)
                .unwrap_or(0);
            out.push(Pattern {
                id: Uuid::new_v4(),
                kind: PatternKind::OptimalTiming,
                confidence: (weekday_means.len() as f64 / 7.0).min(MAX_CONFIDENCE),
                frequency: PatternFrequency::Weekly,
                peak_hours: None,
                low_hours: None,
                peak_weekday: Some(best),
                value: None,
                summary: format!(
                    "{} is your best day for social plans",
                    DAY_NAMES[usize::from(best)]
                ),
            });
        }
    }

    /// Detector 3: overloaded days and net-draining streaks.
    fn detect_interaction_overload(
        &self,
        buckets: &BTreeMap<NaiveDate, DayBucket>,
        out: &mut Vec<Pattern>,
    ) {
        let overloaded = buckets
            .values()
            .filter(|b| {
                b.interaction_count > OVERLOAD_INTERACTIONS_PER_DAY
                    && b.last_level.is_some_and(|l| l < OVERLOAD_LEVEL)
            })
            .count();
        if overloaded >= MIN_OVERLOAD_DAYS {
            out.push(Pattern {
                id: Uuid::new_v4(),
                kind: PatternKind::InteractionOverload,
                confidence: sample_confidence(overloaded),
                frequency: PatternFrequency::Daily,
                peak_hours: None,
                low_hours: None,
                peak_weekday: None,
                value: Some(overloaded as f64),
                summary: format!(
                    "{overloaded} days ended drained after more than {OVERLOAD_INTERACTIONS_PER_DAY} interactions"
                ),
            });
        }

        // Longest run of consecutive calendar days where drains outnumber
        // recharges and the day ended below the streak level.
        let mut longest: usize = 0;
        let mut current: usize = 0;
        let mut prev_date: Option<NaiveDate> = None;
        for (date, bucket) in buckets {
            let qualifies = bucket.drains > bucket.recharges
                && bucket.last_level.is_some_and(|l| l < STREAK_LEVEL);
            let consecutive =
                prev_date.and_then(|p| p.checked_add_days(Days::new(1))) == Some(*date);
            if qualifies {
                current = if consecutive { current + 1 } else { 1 };
                longest = longest.max(current);
            } else {
                current = 0;
            }
            prev_date = Some(*date);
        }
        if longest >= MIN_STREAK_RUN {
            out.push(Pattern {
                id: Uuid::new_v4(),
                kind: PatternKind::InteractionOverload,
                confidence: sample_confidence(longest),
                frequency: PatternFrequency::Daily,
                peak_hours: None,
                low_hours: None,
                peak_weekday: None,
                value: Some(longest as f64),
                summary: format!("{longest} consecutive net-draining days"),
            });
        }
    }

    /// Detector 4: quiet days with a full battery, and stretches of
    /// isolation.
    fn detect_social_deficit(
        &self,
        buckets: &BTreeMap<NaiveDate, DayBucket>,
        out: &mut Vec<Pattern>,
    ) {
        if buckets.is_empty() {
            return;
        }

        let quiet = buckets
            .values()
            .filter(|b| {
                b.interaction_count < 2 && b.last_level.is_some_and(|l| l > DEFICIT_LEVEL)
            })
            .count();
        if quiet >= MIN_DEFICIT_DAYS {
            out.push(Pattern {
                id: Uuid::new_v4(),
                kind: PatternKind::SocialDeficit,
                confidence: sample_confidence(quiet),
                frequency: PatternFrequency::Daily,
                peak_hours: None,
                low_hours: None,
                peak_weekday: None,
                value: Some(quiet as f64),
                summary: format!(
                    "{quiet} quiet days with a full battery; there may be room for more connection"
                ),
            });
        }

        let isolation_days = buckets
            .values()
            .filter(|b| b.interaction_count == 0)
            .count();
        let total_interactions: usize =
            buckets.values().map(|b| b.interaction_count).sum();
        let avg_per_day = total_interactions as f64 / buckets.len() as f64;
        if isolation_days >= MIN_ISOLATION_DAYS && avg_per_day < ISOLATION_AVG_INTERACTIONS {
            out.push(Pattern {
                id: Uuid::new_v4(),
                kind: PatternKind::SocialDeficit,
                confidence: ISOLATION_CONFIDENCE,
                frequency: PatternFrequency::Weekly,
                peak_hours: None,
                low_hours: None,
                peak_weekday: None,
                value: Some(isolation_days as f64),
                summary: format!("{isolation_days} days without any logged interaction"),
            });
        }
    }

    /// Detector 5: correlation between same-day social level and an
    /// external overall-energy series.
    fn detect_energy_correlation(
        &self,
        buckets: &BTreeMap<NaiveDate, DayBucket>,
        overall_energy: &[DailyEnergySample],
        out: &mut Vec<Pattern>,
    ) {
        let mut social: Vec<f64> = Vec::new();
        let mut overall: Vec<f64> = Vec::new();
        for sample in overall_energy {
            if let Some(level) = buckets.get(&sample.date).and_then(|b| b.last_level) {
                social.push(level);
                overall.push(sample.energy);
            }
        }
        if social.len() < MIN_CORRELATION_DAYS {
            return;
        }
        let Some(r) = pearson(&social, &overall) else {
            return;
        };
        if r.abs() <= self.correlation_threshold {
            return;
        }
        let direction = if r > 0.0 { "rises" } else { "falls" };
        out.push(Pattern {
            id: Uuid::new_v4(),
            kind: PatternKind::EnergyCorrelation,
            confidence: r.abs().min(MAX_CONFIDENCE),
            frequency: PatternFrequency::Daily,
            peak_hours: None,
            low_hours: None,
            peak_weekday: None,
            value: Some(r),
            summary: format!(
                "Your overall energy {direction} with your social battery (r = {r:.2})"
            ),
        });
    }
}

/// Confidence ladder shared by the count-based detectors.
fn sample_confidence(samples: usize) -> f64 {
    (samples as f64 / 10.0).min(MAX_CONFIDENCE)
}

fn day_buckets(
    readings: &[LevelReading],
    interactions: &[SocialInteraction],
) -> BTreeMap<NaiveDate, DayBucket> {
    let mut buckets: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();
    // Readings are sorted, so the last write per day wins.
    for r in readings {
        let bucket = buckets.entry(r.at.date_naive()).or_default();
        bucket.last_level = Some(r.level);
    }
    for i in interactions {
        let bucket = buckets.entry(i.timestamp.date_naive()).or_default();
        bucket.interaction_count += 1;
        if i.is_draining() {
            bucket.drains += 1;
        } else if i.is_recharging() {
            bucket.recharges += 1;
        }
    }
    buckets
}
