//! Display ranked recovery recommendations.

use chrono::Utc;

use recharge_core::RecommendationPriority;

use super::open_engine;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine()?;
    let recs = engine.recommendations(Utc::now());

    if json {
        println!("{}", serde_json::to_string_pretty(&recs)?);
        return Ok(());
    }

    println!("\nRecommendations\n");
    for (i, r) in recs.iter().enumerate() {
        println!(
            "  {}. {} [{}] ({} min)",
            i + 1,
            r.activity,
            priority_label(r.priority),
            r.duration_min
        );
        println!("     {}", r.description);
        println!("     {}", r.estimated_benefit);
    }
    Ok(())
}

fn priority_label(priority: RecommendationPriority) -> &'static str {
    match priority {
        RecommendationPriority::Urgent => "urgent",
        RecommendationPriority::High => "high",
        RecommendationPriority::Medium => "medium",
        RecommendationPriority::Low => "low",
    }
}
