//! Display history-derived personal limits.

use super::open_engine;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine()?;
    let limits = engine.state().personal_limits;

    if json {
        println!("{}", serde_json::to_string_pretty(&limits)?);
        return Ok(());
    }

    println!("\nPersonal limits (derived from your last 30 days)\n");
    println!(
        "  Daily interaction budget:  {} min",
        limits.daily_interaction_limit_min
    );
    println!(
        "  Weekly interaction budget: {} min",
        limits.weekly_interaction_limit_min
    );
    println!(
        "  Typical recovery needed:   {} hours",
        limits.recovery_time_needed_hours
    );
    println!(
        "  Most enjoyable at around:  {}% battery",
        limits.optimal_social_level
    );
    Ok(())
}
