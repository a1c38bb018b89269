// src/assembler/prompt.rs
//! Provider-specific prompt construction.
//!
//! Pure functions: the same topic and context always produce the same
//! prompt text.

use crate::constants::PUBLICATION_NAME;
use crate::providers::Prompt;
use crate::types::{GenerationContext, ProviderId, Topic};

/// Builds the prompt one provider receives for a topic.
///
/// Each provider gets its own framing so the merged article reads as a
/// main analysis, an alternative take, and additional insights. Context
/// lines are appended only for the hints that are present.
pub fn build_prompt(
    provider: ProviderId,
    topic: &Topic,
    context: Option<&GenerationContext>,
) -> Prompt {
    let mut user = match provider {
        ProviderId::OpenAi => format!("Write an article about: {}", topic),
        ProviderId::Anthropic => format!(
            "Write a detailed article about {} in the style of {}",
            topic, PUBLICATION_NAME
        ),
        ProviderId::Gemini => format!(
            "Provide additional insights and lesser-known perspectives on {} for {}",
            topic, PUBLICATION_NAME
        ),
    };

    if let Some(context) = context {
        append_context(&mut user, context);
    }

    let prompt = Prompt::user(user);
    match provider {
        ProviderId::OpenAi => prompt.with_system(format!(
            "You are an expert content writer for {}.",
            PUBLICATION_NAME
        )),
        ProviderId::Anthropic | ProviderId::Gemini => prompt,
    }
}

fn append_context(prompt: &mut String, context: &GenerationContext) {
    if let Some(style) = context.style() {
        prompt.push_str("\n\nStyle: ");
        prompt.push_str(style);
    }
    if !context.themes.is_empty() {
        prompt.push_str("\nThemes to explore: ");
        prompt.push_str(&context.themes.join(", "));
    }
    if !context.references.is_empty() {
        prompt.push_str("\nReferences to consider: ");
        prompt.push_str(&context.references.join(", "));
    }
}
