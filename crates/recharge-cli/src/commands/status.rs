//! Battery dashboard with an ASCII level chart.

use chrono::{Local, Utc};

use recharge_core::{Command, LevelReading, RiskTier, Trend};

use super::open_engine;

pub fn run(no_tick: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = open_engine()?;
    let now = Utc::now();

    // The CLI is the host timer: each status check is a tick.
    if !no_tick {
        engine.dispatch(Command::RecoveryTick { now })?;
    }

    let metrics = engine.dashboard_metrics(now);

    println!("\nSocial Battery");
    println!("{}", "─".repeat(50));
    println!(
        "  Level:  {} {:.0}%",
        level_bar(metrics.current_level),
        metrics.current_level
    );
    println!("  Risk:   {}", risk_label(metrics.risk));
    println!("  Trend:  {}", trend_label(metrics.trend));
    println!("  Today:  {} social minutes", metrics.today_minutes);
    println!("  Week:   {} social minutes", metrics.week_minutes);
    if metrics.next_recovery_eta_min > 0 {
        println!(
            "  Recovery resumes in {} min",
            metrics.next_recovery_eta_min
        );
    } else {
        println!("  Recovering passively");
    }

    let readings = &engine.state().readings;
    if !readings.is_empty() {
        println!("{}", render_history_chart(readings));
    }

    Ok(())
}

fn level_bar(level: f64) -> String {
    let filled = ((level / 100.0) * 20.0).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(20 - filled.min(20)))
}

fn risk_label(risk: RiskTier) -> &'static str {
    match risk {
        RiskTier::Low => "low",
        RiskTier::Medium => "medium",
        RiskTier::High => "high",
        RiskTier::Critical => "critical -- step away soon",
    }
}

fn trend_label(trend: Trend) -> &'static str {
    match trend {
        Trend::Rising => "rising",
        Trend::Stable => "stable",
        Trend::Falling => "falling",
    }
}

/// Render the most recent level readings as an ASCII chart.
fn render_history_chart(readings: &[LevelReading]) -> String {
    let recent = &readings[readings.len().saturating_sub(12)..];
    let mut output = String::from("\nRecent levels:\n");
    output.push_str(&"─".repeat(50));
    output.push('\n');

    for r in recent {
        let bar_length = ((r.level / 100.0) * 30.0).round() as usize;
        let bar = "█".repeat(bar_length);
        let local = r.at.with_timezone(&Local);
        output.push_str(&format!(
            "{} {} {:.0}%\n",
            local.format("%m-%d %H:%M"),
            bar,
            r.level
        ));
    }

    output.push_str(&"─".repeat(50));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn level_bar_width_tracks_level() {
        assert_eq!(level_bar(0.0), "░".repeat(20));
        assert_eq!(level_bar(100.0), "█".repeat(20));
        assert!(level_bar(50.0).starts_with(&"█".repeat(10)));
    }

    #[test]
    fn history_chart_shows_recent_readings() {
        let base = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let readings: Vec<LevelReading> = (0..3)
            .map(|i| LevelReading {
                at: base + chrono::Duration::hours(i),
                level: 50.0 + i as f64 * 10.0,
            })
            .collect();
        let chart = render_history_chart(&readings);
        assert!(chart.contains("50%"));
        assert!(chart.contains("70%"));
        assert!(chart.contains("█"));
    }
}
