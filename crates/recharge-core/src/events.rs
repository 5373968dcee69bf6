use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::battery::{RecoveryPhase, SkipReason};
use crate::interaction::InteractionKind;
use crate::limits::PersonalLimits;
use crate::metrics::{RiskTier, Trend};

/// Every state change in the system produces an Event.
/// The host UI observes events; nothing in the core replays them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// An interaction was validated and committed to the log.
    InteractionLogged {
        id: Uuid,
        kind: InteractionKind,
        /// Informational drain computed for the interaction
        drain: f64,
        /// New battery level (the user-reported energy_after)
        level: f64,
        at: DateTime<Utc>,
    },
    /// A recovery tick passed both gates and was applied.
    RecoveryApplied {
        recovered: f64,
        level: f64,
        at: DateTime<Utc>,
    },
    /// A recovery tick was a no-op.
    RecoverySkipped {
        reason: SkipReason,
        at: DateTime<Utc>,
    },
    /// The passive recovery rate was changed.
    RecoveryRateChanged {
        rate_per_hour: f64,
        at: DateTime<Utc>,
    },
    /// Personal limits were re-estimated after a log mutation.
    LimitsUpdated {
        limits: PersonalLimits,
        at: DateTime<Utc>,
    },
    /// Full state snapshot for host display.
    StateSnapshot {
        level: f64,
        phase: RecoveryPhase,
        risk: RiskTier,
        trend: Trend,
        interaction_count: usize,
        at: DateTime<Utc>,
    },
}
