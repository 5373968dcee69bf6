//! Display detected behavioral patterns.

use recharge_core::PatternKind;

use super::open_engine;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine()?;
    let mut patterns = engine.analyze_patterns();

    if json {
        println!("{}", serde_json::to_string_pretty(&patterns)?);
        return Ok(());
    }

    if patterns.is_empty() {
        println!("No patterns yet. Keep logging interactions to build history.");
        return Ok(());
    }

    // Most confident first for display; the analyzer itself does not rank.
    patterns.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    println!("\nDetected patterns\n");
    for p in &patterns {
        println!(
            "  [{}] {} ({:.0}% confidence)",
            kind_label(p.kind),
            p.summary,
            p.confidence * 100.0
        );
    }
    Ok(())
}

fn kind_label(kind: PatternKind) -> &'static str {
    match kind {
        PatternKind::RecoveryNeeded => "recovery",
        PatternKind::OptimalTiming => "timing",
        PatternKind::InteractionOverload => "overload",
        PatternKind::SocialDeficit => "deficit",
        PatternKind::EnergyCorrelation => "correlation",
    }
}
