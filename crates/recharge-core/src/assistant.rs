//! Assistant text-generation boundary.
//!
//! The LLM-backed assistant is an external capability behind the
//! [`ResponseGenerator`] trait. The core never depends on a live
//! generator succeeding: [`TemplateResponder`] is a deterministic
//! fallback, and [`reply_or_fallback`] degrades any generator failure
//! to it, so assistant behavior is fully testable offline.

use crate::error::CoreError;

/// A synchronous text generator. Implementations may call out to a
/// model service; they must not be required for core behavior.
pub trait ResponseGenerator: Send + Sync {
    /// Unique identifier (e.g. "template", "openai").
    fn name(&self) -> &str;

    /// Produce a reply to `prompt` given serialized battery `context`.
    fn generate_response(&self, prompt: &str, context: &str) -> Result<String, CoreError>;
}

/// Deterministic fallback generator; composes a reply from the supplied
/// context with no external calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateResponder;

impl TemplateResponder {
    pub fn new() -> Self {
        Self
    }

    fn compose(prompt: &str, context: &str) -> String {
        let mut reply = String::from("Here is where your battery stands:\n");
        reply.push_str(context.trim());
        if !prompt.trim().is_empty() {
            reply.push_str("\n\nYou asked: ");
            reply.push_str(prompt.trim());
            reply.push_str(
                "\nThe numbers above are the best guide I have; \
                 the recommendations list has concrete next steps.",
            );
        }
        reply
    }
}

impl ResponseGenerator for TemplateResponder {
    fn name(&self) -> &str {
        "template"
    }

    fn generate_response(&self, prompt: &str, context: &str) -> Result<String, CoreError> {
        Ok(Self::compose(prompt, context))
    }
}

/// Ask `generator` for a reply, degrading to the template fallback on
/// error or empty output.
pub fn reply_or_fallback(
    generator: &dyn ResponseGenerator,
    prompt: &str,
    context: &str,
) -> String {
    match generator.generate_response(prompt, context) {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => TemplateResponder::compose(prompt, context),
        Err(e) => {
            tracing::warn!(
                generator = generator.name(),
                error = %e,
                "text generator failed; using template fallback"
            );
            TemplateResponder::compose(prompt, context)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingGenerator;

    impl ResponseGenerator for FailingGenerator {
        fn name(&self) -> &str {
            "failing"
        }

        fn generate_response(&self, _: &str, _: &str) -> Result<String, CoreError> {
            Err(CoreError::Assistant {
                generator: "failing".into(),
                message: "service unavailable".into(),
            })
        }
    }

    #[test]
    fn template_is_deterministic() {
        let gen = TemplateResponder::new();
        let a = gen.generate_response("how am I doing?", "level: 60").unwrap();
        let b = gen.generate_response("how am I doing?", "level: 60").unwrap();
        assert_eq!(a, b);
        assert!(a.contains("level: 60"));
        assert!(a.contains("how am I doing?"));
    }

    #[test]
    fn generator_failure_degrades_to_template() {
        let reply = reply_or_fallback(&FailingGenerator, "status?", "level: 42");
        assert!(reply.contains("level: 42"));
    }

    #[test]
    fn empty_generator_output_degrades_to_template() {
        struct EmptyGenerator;
        impl ResponseGenerator for EmptyGenerator {
            fn name(&self) -> &str {
                "empty"
            }
            fn generate_response(&self, _: &str, _: &str) -> Result<String, CoreError> {
                Ok("   ".into())
            }
        }
        let reply = reply_or_fallback(&EmptyGenerator, "status?", "level: 42");
        assert!(reply.contains("level: 42"));
    }
}
