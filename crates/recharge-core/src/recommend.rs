//! Context-aware recovery recommendations.
//!
//! Recommendations are deterministic and ephemeral: one fixed tier of
//! items is selected from the current level, a personalized item derived
//! from historical recovery effectiveness is appended last, and the list
//! is truncated to five entries in that order. Nothing here is persisted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::interaction::{InteractionKind, SocialInteraction};

/// Urgency of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationPriority {
    Urgent,
    High,
    Medium,
    Low,
}

/// Time horizon of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Immediate,
    ShortTerm,
    LongTerm,
}

/// A single ranked suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: Uuid,
    pub priority: RecommendationPriority,
    /// Short activity name
    pub activity: String,
    /// What to do and why
    pub description: String,
    /// Expected effect, phrased for display
    pub estimated_benefit: String,
    /// Suggested duration in minutes
    pub duration_min: u32,
    pub kind: RecommendationKind,
}

/// Maximum entries returned by [`RecommendationEngine::recommend`].
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Deterministic recommendation generator.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine;

impl RecommendationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Generate ranked suggestions for the current level and context.
    ///
    /// Never errors; an empty history still yields the tier items plus a
    /// generic personalized fallback.
    pub fn recommend(
        &self,
        current_level: f64,
        recent: &[SocialInteraction],
        hour_of_day: u8,
    ) -> Vec<Recommendation> {
        let mut items = self.tier_items(current_level);
        items.push(self.personalized_item(recent, hour_of_day));
        items.truncate(MAX_RECOMMENDATIONS);
        items
    }

    /// Exactly one tier's fixed item set, chosen by level; non-cumulative.
    fn tier_items(&self, level: f64) -> Vec<Recommendation> {
        if level < 30.0 {
            vec![
                item(
                    RecommendationPriority::Urgent,
                    RecommendationKind::Immediate,
                    "Immediate solo time",
                    "Step away from people right now and find a quiet spot",
                    "Stops the drain before it bottoms out",
                    30,
                ),
                item(
                    RecommendationPriority::Urgent,
                    RecommendationKind::Immediate,
                    "Fresh air",
                    "Take a short walk outside, away from conversation",
                    "Movement and daylight speed up recovery",
                    15,
                ),
                item(
                    RecommendationPriority::Urgent,
                    RecommendationKind::Immediate,
                    "Set a boundary",
                    "Decline or reschedule your next optional commitment",
                    "Protects the little energy you have left",
                    5,
                ),
            ]
        } else if level < 50.0 {
            vec![
                item(
                    RecommendationPriority::High,
                    RecommendationKind::ShortTerm,
                    "Creative solo activity",
                    "Spend some time on drawing, writing, music or another solo craft",
                    "Restores energy while keeping your mind engaged",
                    45,
                ),
                item(
                    RecommendationPriority::Medium,
                    RecommendationKind::Immediate,
                    "Mindfulness break",
                    "Ten minutes of breathing or meditation, screens away",
                    "Lowers the baseline drain of a busy day",
                    10,
                ),
            ]
        } else if level < 70.0 {
            vec![
                item(
                    RecommendationPriority::Low,
                    RecommendationKind::ShortTerm,
                    "Hobby time",
                    "Pick up a hobby you have been postponing",
                    "Keeps the battery topped up before it dips",
                    60,
                ),
                item(
                    RecommendationPriority::Medium,
                    RecommendationKind::Immediate,
                    "Reset your environment",
                    "Tidy your space, adjust lighting, put on calm music",
                    "A calmer environment slows passive drain",
                    15,
                ),
            ]
        } else {
            Vec::new()
        }
    }

    /// Personalized item from historical recovery effectiveness: the
    /// interaction kind with the highest mean energy gain.
    fn personalized_item(
        &self,
        recent: &[SocialInteraction],
        hour_of_day: u8,
    ) -> Recommendation {
        let when = match hour_of_day {
            0..=11 => "this morning",
            12..=19 => "this afternoon",
            _ => "before bed tonight",
        };

        match best_recharger(recent) {
            Some((kind, gain)) => item(
                RecommendationPriority::Medium,
                RecommendationKind::ShortTerm,
                kind.label(),
                &format!(
                    "Your history shows {} reliably recharges you; make room for it {when}",
                    kind.label()
                ),
                &format!("Typically worth about {gain:.0} battery points for you"),
                30,
            ),
            None => item(
                RecommendationPriority::Medium,
                RecommendationKind::ShortTerm,
                "Solo recharge walk",
                &format!("Take an unhurried walk by yourself {when}"),
                "A reliable default recharge while your history builds up",
                30,
            ),
        }
    }
}

/// Interaction kind with the highest mean energy gain among net-positive
/// interactions, with its mean gain.
fn best_recharger(recent: &[SocialInteraction]) -> Option<(InteractionKind, f64)> {
    let mut best: Option<(InteractionKind, f64)> = None;
    for kind in InteractionKind::all() {
        let gains: Vec<f64> = recent
            .iter()
            .filter(|i| i.kind == *kind && i.is_recharging())
            .map(|i| f64::from(i.energy_delta()))
            .collect();
        if gains.is_empty() {
            continue;
        }
        let mean = gains.iter().sum::<f64>() / gains.len() as f64;
        match best {
            Some((_, best_mean)) if mean <= best_mean => {}
            _ => best = Some((*kind, mean)),
        }
    }
    best
}

fn item(
    priority: RecommendationPriority,
    kind: RecommendationKind,
    activity: &str,
    description: &str,
    benefit: &str,
    duration_min: u32,
) -> Recommendation {
    Recommendation {
        id: Uuid::new_v4(),
        priority,
        activity: activity.to_string(),
        description: description.to_string(),
        estimated_benefit: benefit.to_string(),
        duration_min,
        kind,
    }
}
