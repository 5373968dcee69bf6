//! Ask the assistant about the current battery state.
//!
//! Uses the deterministic template responder; a live generator is an
//! optional host integration and never required.

use chrono::Utc;

use recharge_core::{reply_or_fallback, TemplateResponder};

use super::open_engine;

pub fn run(question: &str) -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine()?;
    let context = engine.assistant_context(Utc::now());
    let reply = reply_or_fallback(&TemplateResponder::new(), question, &context);
    println!("{reply}");
    Ok(())
}
