//! Drain computation for logged interactions.
//!
//! `compute_drain` is a total, side-effect-free function from an
//! interaction to a battery cost. The returned value is informational:
//! the authoritative new level is always the caller-supplied
//! `energy_after` on the interaction record.

use crate::interaction::SocialInteraction;

/// Lower clamp of the computed drain.
pub const MIN_DRAIN: f64 = 1.0;
/// Upper clamp of the computed drain.
pub const MAX_DRAIN: f64 = 50.0;

/// Long sessions stop mattering past this many multiples of an hour.
const DURATION_FACTOR_CAP: f64 = 3.0;
/// Crowd effect saturates at this multiple.
const PEOPLE_FACTOR_CAP: f64 = 2.0;

/// Compute the battery cost of an interaction, clamped to [1, 50].
///
/// Known quirk, preserved on purpose: `SoloTime` has a negative base rate
/// (-15, it recharges), but the clamp floors the result to +1 like any
/// other interaction. Recharge credit reaches the battery only through
/// the user-reported `energy_after`, never through this value.
pub fn compute_drain(interaction: &SocialInteraction) -> f64 {
    let base = interaction.kind.base_drain_rate();
    let intensity = f64::from(interaction.intensity) / 10.0;
    let duration_factor =
        (f64::from(interaction.duration_min) / 60.0).min(DURATION_FACTOR_CAP);
    let people_factor =
        (f64::from(interaction.people_count) / 10.0).min(PEOPLE_FACTOR_CAP);
    let enjoyment_factor = (11.0 - f64::from(interaction.enjoyment)) / 10.0;
    let context = interaction.context.drain_multiplier();

    let drain = base * intensity * duration_factor * people_factor * enjoyment_factor * context;
    drain.clamp(MIN_DRAIN, MAX_DRAIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::{InteractionContext, InteractionDraft, InteractionKind};

    fn interaction(
        kind: InteractionKind,
        context: InteractionContext,
        duration_min: u32,
        intensity: u8,
        people_count: u32,
        enjoyment: u8,
    ) -> SocialInteraction {
        InteractionDraft {
            kind: Some(kind),
            context: Some(context),
            duration_min,
            intensity,
            people_count,
            enjoyment,
            energy_before: 75,
            energy_after: 60,
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn work_meeting_scenario() {
        // 25 * 0.8 * 1.0 * 0.5 * 0.8 * 1.3 = 10.4
        let i = interaction(
            InteractionKind::WorkMeeting,
            InteractionContext::Work,
            60,
            8,
            5,
            3,
        );
        let drain = compute_drain(&i);
        assert!((drain - 10.4).abs() < 1e-9);
    }

    #[test]
    fn duration_factor_caps_at_three_hours() {
        let short = interaction(
            InteractionKind::SocialGathering,
            InteractionContext::Public,
            180,
            5,
            10,
            5,
        );
        let long = interaction(
            InteractionKind::SocialGathering,
            InteractionContext::Public,
            600,
            5,
            10,
            5,
        );
        assert_eq!(compute_drain(&short), compute_drain(&long));
    }

    #[test]
    fn crowd_effect_caps_at_twenty_people() {
        let twenty = interaction(
            InteractionKind::PublicEvent,
            InteractionContext::Public,
            60,
            5,
            20,
            5,
        );
        let hundred = interaction(
            InteractionKind::PublicEvent,
            InteractionContext::Public,
            60,
            5,
            100,
            5,
        );
        assert_eq!(compute_drain(&twenty), compute_drain(&hundred));
    }

    #[test]
    fn solo_time_floors_to_one() {
        // The negative base rate is clamped up to MIN_DRAIN.
        let i = interaction(
            InteractionKind::SoloTime,
            InteractionContext::Intimate,
            90,
            3,
            0,
            9,
        );
        assert_eq!(compute_drain(&i), MIN_DRAIN);
    }

    #[test]
    fn heavy_session_clamps_to_fifty() {
        let i = interaction(
            InteractionKind::PublicEvent,
            InteractionContext::Public,
            300,
            10,
            50,
            1,
        );
        assert_eq!(compute_drain(&i), MAX_DRAIN);
    }

    #[test]
    fn zero_people_still_costs_at_least_one() {
        let i = interaction(
            InteractionKind::PhoneCall,
            InteractionContext::Personal,
            30,
            5,
            0,
            5,
        );
        assert_eq!(compute_drain(&i), MIN_DRAIN);
    }
}
