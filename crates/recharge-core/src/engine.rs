//! Battery engine: the single mutation funnel.
//!
//! All state mutation passes through [`BatteryEngine::dispatch`]; one
//! command is applied fully before the next, so no locking is needed.
//! Persistence is fire-and-forget after each committed mutation: a write
//! failure is logged and the engine keeps serving from memory. On
//! construction the engine loads the last written snapshot, discarding
//! anything malformed in favor of defaults.

use chrono::{DateTime, Timelike, Utc};

use crate::battery::{compute_drain, BatteryState, RecoveryScheduler, TickOutcome};
use crate::config::RechargeConfig;
use crate::error::{CoreError, Result, ValidationError};
use crate::events::Event;
use crate::interaction::{InteractionDraft, SocialInteraction};
use crate::limits::LimitsEstimator;
use crate::metrics::{DashboardMetrics, RiskTier, Trend};
use crate::patterns::{DailyEnergySample, Pattern, PatternAnalyzer};
use crate::recommend::{Recommendation, RecommendationEngine};
use crate::store::{StateStore, BATTERY_STATE_KEY, INTERACTIONS_KEY};

/// A mutation request. Commands are processed one at a time.
#[derive(Debug, Clone)]
pub enum Command {
    /// Validate and commit a new interaction.
    LogInteraction(InteractionDraft),
    /// Run one gated recovery tick.
    RecoveryTick { now: DateTime<Utc> },
    /// Change the passive recovery rate (clamped into [0, 100]).
    SetRecoveryRate(f64),
}

/// Owner of the battery state and interaction log.
pub struct BatteryEngine {
    state: BatteryState,
    interactions: Vec<SocialInteraction>,
    scheduler: RecoveryScheduler,
    estimator: LimitsEstimator,
    analyzer: PatternAnalyzer,
    recommender: RecommendationEngine,
    store: Box<dyn StateStore>,
}

impl BatteryEngine {
    /// Engine with default settings, loading prior state from `store`.
    pub fn new(store: Box<dyn StateStore>) -> Self {
        Self::with_config(store, &RechargeConfig::default())
    }

    /// Engine tuned by host configuration, loading prior state from
    /// `store`. A persisted recovery rate wins over the configured one.
    pub fn with_config(store: Box<dyn StateStore>, config: &RechargeConfig) -> Self {
        let interactions = load_interactions(store.as_ref());
        let state = match load_state(store.as_ref()) {
            Some(mut state) => {
                // Re-clamp in case the blob was edited out-of-band.
                state.set_level(state.current_level());
                state
            }
            None => {
                // Fresh state: the configured rate applies.
                let mut state = BatteryState::new();
                state.recovery_rate = config.recovery.rate_per_hour;
                state
            }
        };
        Self {
            state,
            interactions,
            scheduler: RecoveryScheduler::with_settings(
                i64::from(config.recovery.tick_interval_min),
                i64::from(config.recovery.cooldown_min),
            ),
            estimator: LimitsEstimator::with_window(i64::from(config.analysis.window_days)),
            analyzer: PatternAnalyzer::new(),
            recommender: RecommendationEngine::new(),
            store,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Apply one command fully, returning the events it produced.
    pub fn dispatch(&mut self, command: Command) -> Result<Vec<Event>> {
        match command {
            Command::LogInteraction(draft) => self.log_interaction(draft),
            Command::RecoveryTick { now } => Ok(self.recovery_tick(now)),
            Command::SetRecoveryRate(rate) => self.set_recovery_rate(rate),
        }
    }

    fn log_interaction(&mut self, draft: InteractionDraft) -> Result<Vec<Event>> {
        let interaction = draft.validate().map_err(CoreError::Validation)?;
        let at = interaction.timestamp;
        let drain = compute_drain(&interaction);

        // The committed level is the user-reported energy_after; the
        // computed drain is informational only.
        self.state.set_level(f64::from(interaction.energy_after));
        self.state.last_interaction_id = Some(interaction.id);
        self.state.last_interaction_at = Some(at);
        self.state.push_reading(at);
        self.scheduler.on_interaction();

        let id = interaction.id;
        let kind = interaction.kind;
        self.interactions.push(interaction);

        let limits = self.estimator.estimate(&self.interactions, at);
        let limits_changed = limits != self.state.personal_limits;
        self.state.personal_limits = limits;
        self.state.weekly_stats =
            crate::battery::WeeklyStats::compute(&self.interactions, at);

        self.persist();

        let mut events = vec![Event::InteractionLogged {
            id,
            kind,
            drain,
            level: self.state.current_level(),
            at,
        }];
        if limits_changed {
            events.push(Event::LimitsUpdated { limits, at });
        }
        Ok(events)
    }

    fn recovery_tick(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        let outcome = self.scheduler.tick(
            now,
            self.state.last_interaction_at,
            self.state.current_level(),
            self.state.recovery_rate,
        );
        match outcome {
            TickOutcome::Applied {
                new_level,
                recovered,
                ..
            } => {
                self.state.set_level(new_level);
                self.state.push_reading(now);
                self.persist();
                vec![Event::RecoveryApplied {
                    recovered,
                    level: self.state.current_level(),
                    at: now,
                }]
            }
            TickOutcome::Skipped(reason) => {
                vec![Event::RecoverySkipped { reason, at: now }]
            }
        }
    }

    fn set_recovery_rate(&mut self, rate: f64) -> Result<Vec<Event>> {
        if !rate.is_finite() {
            return Err(ValidationError::NotFinite {
                field: "recovery_rate",
            }
            .into());
        }
        self.state.recovery_rate = rate.clamp(0.0, 100.0);
        self.persist();
        Ok(vec![Event::RecoveryRateChanged {
            rate_per_hour: self.state.recovery_rate,
            at: Utc::now(),
        }])
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &BatteryState {
        &self.state
    }

    pub fn interactions(&self) -> &[SocialInteraction] {
        &self.interactions
    }

    /// Everything the dashboard displays, recomputed fresh.
    pub fn dashboard_metrics(&self, now: DateTime<Utc>) -> DashboardMetrics {
        let stats = crate::battery::WeeklyStats::compute(&self.interactions, now);
        DashboardMetrics {
            current_level: self.state.current_level(),
            today_minutes: stats.today_minutes,
            week_minutes: stats.week_minutes,
            next_recovery_eta_min: self
                .scheduler
                .minutes_until_recovery(now, self.state.last_interaction_at),
            trend: Trend::classify(&self.state.readings),
            risk: RiskTier::from_level(self.state.current_level()),
        }
    }

    /// Full state snapshot event for host display.
    pub fn snapshot(&self, now: DateTime<Utc>) -> Event {
        Event::StateSnapshot {
            level: self.state.current_level(),
            phase: self.scheduler.phase(now, self.state.last_interaction_at),
            risk: RiskTier::from_level(self.state.current_level()),
            trend: Trend::classify(&self.state.readings),
            interaction_count: self.interactions.len(),
            at: now,
        }
    }

    /// Run the pattern detectors over the full history.
    pub fn analyze_patterns(&self) -> Vec<Pattern> {
        self.analyzer.analyze(&self.state.readings, &self.interactions)
    }

    /// Run all detectors, including energy correlation against an
    /// externally tracked series.
    pub fn analyze_patterns_with_energy(
        &self,
        overall_energy: &[DailyEnergySample],
    ) -> Vec<Pattern> {
        self.analyzer
            .analyze_with_energy(&self.state.readings, &self.interactions, overall_energy)
    }

    /// Ranked suggestions for the current level and hour.
    pub fn recommendations(&self, now: DateTime<Utc>) -> Vec<Recommendation> {
        self.recommender.recommend(
            self.state.current_level(),
            &self.interactions,
            now.hour() as u8,
        )
    }

    /// Plain-text context block for the assistant boundary.
    pub fn assistant_context(&self, now: DateTime<Utc>) -> String {
        let metrics = self.dashboard_metrics(now);
        format!(
            "battery level: {:.0}%\nrisk: {:?}\ntrend: {:?}\ntoday: {} social minutes\nthis week: {} social minutes",
            metrics.current_level,
            metrics.risk,
            metrics.trend,
            metrics.today_minutes,
            metrics.week_minutes,
        )
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Fire-and-forget persistence of both blobs. Failures are logged;
    /// the in-memory state stays authoritative either way.
    fn persist(&self) {
        persist_blob(self.store.as_ref(), INTERACTIONS_KEY, &self.interactions);
        persist_blob(self.store.as_ref(), BATTERY_STATE_KEY, &self.state);
    }
}

fn persist_blob<T: serde::Serialize>(store: &dyn StateStore, key: &str, value: &T) {
    match serde_json::to_vec(value) {
        Ok(bytes) => {
            if let Err(e) = store.save(key, &bytes) {
                tracing::warn!(key, error = %e, "failed to persist; continuing in memory");
            }
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to serialize; continuing in memory");
        }
    }
}

fn load_interactions(store: &dyn StateStore) -> Vec<SocialInteraction> {
    let Some(bytes) = store.load(INTERACTIONS_KEY) else {
        return Vec::new();
    };
    match serde_json::from_slice(&bytes) {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!(error = %e, "discarding malformed interaction log");
            Vec::new()
        }
    }
}

fn load_state(store: &dyn StateStore) -> Option<BatteryState> {
    let bytes = store.load(BATTERY_STATE_KEY)?;
    match serde_json::from_slice(&bytes) {
        Ok(state) => Some(state),
        Err(e) => {
            tracing::warn!(error = %e, "discarding malformed battery snapshot");
            None
        }
    }
}
