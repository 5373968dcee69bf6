//! # Recharge Core Library
//!
//! This library provides the core business logic for Recharge, a social
//! battery tracker. It implements a CLI-first philosophy where all
//! operations are available via a standalone CLI binary, with any GUI
//! being a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Battery Engine**: a single-funnel command dispatcher owning the
//!   battery state and the append-only interaction log
//! - **Recovery Scheduler**: a wall-clock-based state machine that
//!   requires the host to periodically invoke `tick()`
//! - **Pattern Analyzer**: five independent detectors over battery
//!   history, run on demand as a batch
//! - **Storage**: JSON blobs behind a pluggable key-value trait, plus
//!   TOML-based configuration
//!
//! ## Key Components
//!
//! - [`BatteryEngine`]: command funnel and state owner
//! - [`RecoveryScheduler`]: gated passive recovery
//! - [`PatternAnalyzer`]: behavioral pattern detection
//! - [`RecommendationEngine`]: ranked recovery suggestions
//! - [`StateStore`]: persistence seam

pub mod assistant;
pub mod battery;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod interaction;
pub mod limits;
pub mod metrics;
pub mod patterns;
pub mod recommend;
pub mod store;

pub use assistant::{reply_or_fallback, ResponseGenerator, TemplateResponder};
pub use battery::{
    compute_drain, recover, BatteryState, LevelReading, RecoveryPhase, RecoveryScheduler,
    SkipReason, TickOutcome, WeeklyStats,
};
pub use config::RechargeConfig;
pub use engine::{BatteryEngine, Command};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use interaction::{InteractionContext, InteractionDraft, InteractionKind, SocialInteraction};
pub use limits::{LimitsEstimator, PersonalLimits};
pub use metrics::{DashboardMetrics, RiskTier, Trend};
pub use patterns::{DailyEnergySample, Pattern, PatternAnalyzer, PatternFrequency, PatternKind};
pub use recommend::{
    Recommendation, RecommendationEngine, RecommendationKind, RecommendationPriority,
};
pub use store::{FileStore, MemoryStore, StateStore};
