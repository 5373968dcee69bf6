//! Log a social interaction from the command line.

use chrono::Utc;
use clap::Args;

use recharge_core::{
    Command, Event, InteractionContext, InteractionDraft, InteractionKind,
};

use super::open_engine;

#[derive(Args)]
pub struct LogArgs {
    /// Interaction kind (work-meeting, social-gathering, close-friends,
    /// family-time, solo-time, public-event, online-meeting, phone-call)
    #[arg(long)]
    pub kind: String,
    /// Interaction context (work, personal, public, intimate)
    #[arg(long, default_value = "personal")]
    pub context: String,
    /// Duration in minutes
    #[arg(long)]
    pub duration: u32,
    /// Intensity, 1-10
    #[arg(long)]
    pub intensity: u8,
    /// Number of other people involved
    #[arg(long, default_value_t = 0)]
    pub people: u32,
    /// Enjoyment, 1-10
    #[arg(long)]
    pub enjoyment: u8,
    /// Battery level before, 0-100
    #[arg(long)]
    pub before: u8,
    /// Battery level after, 0-100
    #[arg(long)]
    pub after: u8,
    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
    /// Location
    #[arg(long)]
    pub location: Option<String>,
}

fn parse_kind(kind: &str) -> Option<InteractionKind> {
    match kind.to_lowercase().replace('_', "-").as_str() {
        "work-meeting" | "meeting" => Some(InteractionKind::WorkMeeting),
        "social-gathering" | "gathering" => Some(InteractionKind::SocialGathering),
        "close-friends" | "friends" => Some(InteractionKind::CloseFriends),
        "family-time" | "family" => Some(InteractionKind::FamilyTime),
        "solo-time" | "solo" => Some(InteractionKind::SoloTime),
        "public-event" | "event" => Some(InteractionKind::PublicEvent),
        "online-meeting" | "online" => Some(InteractionKind::OnlineMeeting),
        "phone-call" | "call" => Some(InteractionKind::PhoneCall),
        _ => None,
    }
}

fn parse_context(context: &str) -> Option<InteractionContext> {
    match context.to_lowercase().as_str() {
        "work" => Some(InteractionContext::Work),
        "personal" => Some(InteractionContext::Personal),
        "public" => Some(InteractionContext::Public),
        "intimate" => Some(InteractionContext::Intimate),
        _ => None,
    }
}

pub fn run(args: LogArgs) -> Result<(), Box<dyn std::error::Error>> {
    let kind = parse_kind(&args.kind).ok_or_else(|| {
        format!("Invalid kind: '{}'. Use e.g. work-meeting or solo-time", args.kind)
    })?;
    let context = parse_context(&args.context).ok_or_else(|| {
        format!(
            "Invalid context: '{}'. Use work, personal, public or intimate",
            args.context
        )
    })?;

    let draft = InteractionDraft {
        timestamp: None,
        kind: Some(kind),
        context: Some(context),
        duration_min: args.duration,
        intensity: args.intensity,
        people_count: args.people,
        enjoyment: args.enjoyment,
        energy_before: args.before,
        energy_after: args.after,
        notes: args.notes,
        location: args.location,
    };

    let mut engine = open_engine()?;
    let events = engine.dispatch(Command::LogInteraction(draft))?;

    for event in &events {
        match event {
            Event::InteractionLogged { drain, level, .. } => {
                println!("Logged {} ({} min)", kind.label(), args.duration);
                println!("  Computed drain: {drain:.1} points");
                println!("  Battery now at {level:.0}%");
            }
            Event::LimitsUpdated { limits, .. } => {
                println!(
                    "  Limits updated: {} min/day, {} min/week",
                    limits.daily_interaction_limit_min, limits.weekly_interaction_limit_min
                );
            }
            _ => {}
        }
    }

    let metrics = engine.dashboard_metrics(Utc::now());
    if metrics.next_recovery_eta_min > 0 {
        println!(
            "  Passive recovery resumes in {} min",
            metrics.next_recovery_eta_min
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_aliases_parse() {
        assert_eq!(parse_kind("work-meeting"), Some(InteractionKind::WorkMeeting));
        assert_eq!(parse_kind("work_meeting"), Some(InteractionKind::WorkMeeting));
        assert_eq!(parse_kind("SOLO"), Some(InteractionKind::SoloTime));
        assert_eq!(parse_kind("call"), Some(InteractionKind::PhoneCall));
        assert_eq!(parse_kind("party"), None);
    }

    #[test]
    fn context_parses() {
        assert_eq!(parse_context("Work"), Some(InteractionContext::Work));
        assert_eq!(parse_context("intimate"), Some(InteractionContext::Intimate));
        assert_eq!(parse_context("outer-space"), None);
    }
}
