//! Integration tests for the battery engine lifecycle.

use chrono::{DateTime, Duration, TimeZone, Utc};
use recharge_core::{
    BatteryEngine, Command, Event, InteractionContext, InteractionDraft, InteractionKind,
    MemoryStore, PatternKind, RiskTier,
};

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
}

fn draft(
    at: DateTime<Utc>,
    kind: InteractionKind,
    context: InteractionContext,
    duration_min: u32,
    before: u8,
    after: u8,
) -> InteractionDraft {
    InteractionDraft {
        timestamp: Some(at),
        kind: Some(kind),
        context: Some(context),
        duration_min,
        intensity: 6,
        people_count: 4,
        enjoyment: 5,
        energy_before: before,
        energy_after: after,
        ..Default::default()
    }
}

#[test]
fn full_day_workflow() {
    let mut engine = BatteryEngine::new(Box::new(MemoryStore::new()));

    // Morning meeting drains, afternoon recovery tick restores some.
    engine
        .dispatch(Command::LogInteraction(draft(
            base(),
            InteractionKind::WorkMeeting,
            InteractionContext::Work,
            60,
            75,
            60,
        )))
        .unwrap();
    engine
        .dispatch(Command::LogInteraction(draft(
            base() + Duration::hours(2),
            InteractionKind::OnlineMeeting,
            InteractionContext::Work,
            30,
            60,
            50,
        )))
        .unwrap();
    assert_eq!(engine.state().current_level(), 50.0);

    // Two hours after the last interaction the cooldown has long
    // cleared; 1.5 hours past expiry at the default 8/h rate.
    let events = engine
        .dispatch(Command::RecoveryTick {
            now: base() + Duration::hours(4),
        })
        .unwrap();
    match &events[0] {
        Event::RecoveryApplied { level, .. } => {
            assert!((level - 62.0).abs() < 1e-9);
        }
        other => panic!("expected RecoveryApplied, got {other:?}"),
    }

    let metrics = engine.dashboard_metrics(base() + Duration::hours(4));
    assert_eq!(metrics.today_minutes, 90);
    assert_eq!(metrics.week_minutes, 90);
    assert_eq!(metrics.risk, RiskTier::Medium);

    // Limits now come from history, not defaults.
    let limits = engine.state().personal_limits;
    assert_eq!(limits.daily_interaction_limit_min, 108); // ceil(90 * 1.2)
}

#[test]
fn a_week_of_overload_shows_up_in_patterns() {
    let mut engine = BatteryEngine::new(Box::new(MemoryStore::new()));

    // Four packed days, each ending drained.
    for day in 0..4 {
        let day_start = base() + Duration::days(day);
        for slot in 0..7 {
            let before = 70u8.saturating_sub(slot * 6);
            engine
                .dispatch(Command::LogInteraction(draft(
                    day_start + Duration::hours(i64::from(slot)),
                    InteractionKind::SocialGathering,
                    InteractionContext::Public,
                    45,
                    before,
                    before - 6,
                )))
                .unwrap();
        }
    }

    let patterns = engine.analyze_patterns();
    assert!(patterns
        .iter()
        .any(|p| p.kind == PatternKind::InteractionOverload));
    for p in &patterns {
        assert!((0.0..=1.0).contains(&p.confidence));
    }
}

#[test]
fn recommendations_follow_the_level_down() {
    let mut engine = BatteryEngine::new(Box::new(MemoryStore::new()));
    let now = base();

    engine
        .dispatch(Command::LogInteraction(draft(
            now,
            InteractionKind::PublicEvent,
            InteractionContext::Public,
            120,
            60,
            25,
        )))
        .unwrap();

    let recs = engine.recommendations(now);
    assert_eq!(recs.len(), 4);
    assert!(recs.len() <= 5);

    // The urgent tier precedes the personalized entry.
    assert_eq!(
        format!("{:?}", recs[0].priority),
        "Urgent",
        "first item should be urgent at level 25"
    );
}

#[test]
fn assistant_falls_back_deterministically() {
    let engine = BatteryEngine::new(Box::new(MemoryStore::new()));
    let context = engine.assistant_context(base());
    assert!(context.contains("battery level: 75"));

    let reply = recharge_core::reply_or_fallback(
        &recharge_core::TemplateResponder::new(),
        "how are my limits?",
        &context,
    );
    assert!(reply.contains("battery level: 75"));
}
