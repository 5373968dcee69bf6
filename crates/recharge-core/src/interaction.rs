//! Social interaction records.
//!
//! Interactions are the only input the battery model reacts to. They enter
//! the system as an [`InteractionDraft`] supplied by the host UI, are
//! validated, and become immutable [`SocialInteraction`] log entries.
//! The log is append-only; entries are never mutated or deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Category of a logged social interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    WorkMeeting,
    SocialGathering,
    CloseFriends,
    FamilyTime,
    SoloTime,
    PublicEvent,
    OnlineMeeting,
    PhoneCall,
}

impl InteractionKind {
    /// Base drain rate for this kind of interaction, in battery points.
    ///
    /// `SoloTime` carries a negative base rate (it restores rather than
    /// drains), but the final drain clamp floors it to +1 -- see
    /// [`crate::battery::drain::compute_drain`] for the full story.
    pub fn base_drain_rate(&self) -> f64 {
        match self {
            InteractionKind::WorkMeeting => 25.0,
            InteractionKind::PublicEvent => 30.0,
            InteractionKind::SocialGathering => 20.0,
            InteractionKind::OnlineMeeting => 15.0,
            InteractionKind::PhoneCall => 10.0,
            InteractionKind::CloseFriends => 8.0,
            InteractionKind::FamilyTime => 12.0,
            InteractionKind::SoloTime => -15.0,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            InteractionKind::WorkMeeting => "work meeting",
            InteractionKind::SocialGathering => "social gathering",
            InteractionKind::CloseFriends => "time with close friends",
            InteractionKind::FamilyTime => "family time",
            InteractionKind::SoloTime => "solo time",
            InteractionKind::PublicEvent => "public event",
            InteractionKind::OnlineMeeting => "online meeting",
            InteractionKind::PhoneCall => "phone call",
        }
    }

    /// All kinds, in wire order.
    pub fn all() -> &'static [InteractionKind] {
        &[
            InteractionKind::WorkMeeting,
            InteractionKind::SocialGathering,
            InteractionKind::CloseFriends,
            InteractionKind::FamilyTime,
            InteractionKind::SoloTime,
            InteractionKind::PublicEvent,
            InteractionKind::OnlineMeeting,
            InteractionKind::PhoneCall,
        ]
    }
}

/// Setting in which an interaction took place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionContext {
    Work,
    Personal,
    Public,
    Intimate,
}

impl InteractionContext {
    /// Multiplier applied to the computed drain for this context.
    pub fn drain_multiplier(&self) -> f64 {
        match self {
            InteractionContext::Work => 1.3,
            InteractionContext::Public => 1.5,
            InteractionContext::Personal => 0.8,
            InteractionContext::Intimate => 0.6,
        }
    }
}

/// An immutable, append-only interaction log entry.
///
/// Timestamps cross the persistence boundary as ISO-8601 strings
/// (chrono's serde default for `DateTime<Utc>`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialInteraction {
    /// Unique identifier
    pub id: Uuid,
    /// When the interaction happened
    pub timestamp: DateTime<Utc>,
    /// Category of interaction
    pub kind: InteractionKind,
    /// Setting of the interaction
    pub context: InteractionContext,
    /// Duration in minutes (> 0)
    pub duration_min: u32,
    /// Subjective intensity, 1-10
    pub intensity: u8,
    /// Number of other people involved
    pub people_count: u32,
    /// Subjective enjoyment, 1-10
    pub enjoyment: u8,
    /// Battery level before the interaction, 0-100
    pub energy_before: u8,
    /// Battery level after the interaction, 0-100
    pub energy_after: u8,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Where it happened
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl SocialInteraction {
    /// Net battery change reported by the user for this interaction.
    pub fn energy_delta(&self) -> i32 {
        i32::from(self.energy_after) - i32::from(self.energy_before)
    }

    /// Whether the user came out of this interaction with more energy.
    pub fn is_recharging(&self) -> bool {
        self.energy_after > self.energy_before
    }

    /// Whether the user came out of this interaction with less energy.
    pub fn is_draining(&self) -> bool {
        self.energy_after < self.energy_before
    }
}

/// Unvalidated interaction data as supplied by the host UI.
///
/// `validate()` is the only way to turn a draft into a log entry, so a
/// rejected draft is never partially committed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractionDraft {
    /// Timestamp override; defaults to commit time when absent.
    pub timestamp: Option<DateTime<Utc>>,
    pub kind: Option<InteractionKind>,
    pub context: Option<InteractionContext>,
    pub duration_min: u32,
    pub intensity: u8,
    pub people_count: u32,
    pub enjoyment: u8,
    pub energy_before: u8,
    pub energy_after: u8,
    pub notes: Option<String>,
    pub location: Option<String>,
}

impl InteractionDraft {
    /// Validate the draft and stamp it into an immutable log entry.
    pub fn validate(self) -> Result<SocialInteraction, ValidationError> {
        if self.duration_min == 0 {
            return Err(ValidationError::NonPositiveDuration(self.duration_min));
        }
        check_range("intensity", i64::from(self.intensity), 1, 10)?;
        check_range("enjoyment", i64::from(self.enjoyment), 1, 10)?;
        check_range("energy_before", i64::from(self.energy_before), 0, 100)?;
        check_range("energy_after", i64::from(self.energy_after), 0, 100)?;

        Ok(SocialInteraction {
            id: Uuid::new_v4(),
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
            kind: self.kind.unwrap_or(InteractionKind::SocialGathering),
            context: self.context.unwrap_or(InteractionContext::Personal),
            duration_min: self.duration_min,
            intensity: self.intensity,
            people_count: self.people_count,
            enjoyment: self.enjoyment,
            energy_before: self.energy_before,
            energy_after: self.energy_after,
            notes: self.notes,
            location: self.location,
        })
    }
}

fn check_range(
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}
