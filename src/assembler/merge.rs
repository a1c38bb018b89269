// src/assembler/merge.rs
//! Merging provider outputs into one article.
//!
//! Plain concatenation: sections in provider priority order, one header
//! per section, then a footer naming the contributors. No deduplication.

use crate::constants::{SECTION_HEADERS, SECTION_SEPARATOR, SYSTEM_NAME};
use crate::types::ProviderId;
use chrono::NaiveDate;
use std::fmt::Write;

/// Header for the section at `position` among successful outputs.
pub fn section_header(position: usize) -> String {
    SECTION_HEADERS
        .get(position)
        .map(|header| header.to_string())
        .unwrap_or_else(|| format!("Further Perspective {}", position + 1))
}

/// Concatenates successful outputs under section headers and appends the footer.
///
/// `sections` must already be in priority order; headers are assigned by
/// position, so the first contributor always opens with "Main Analysis".
pub fn merge_sections(sections: &[(ProviderId, String)], generated_on: NaiveDate) -> String {
    let capacity = sections.iter().map(|(_, text)| text.len() + 64).sum::<usize>() + 128;
    let mut article = String::with_capacity(capacity);

    for (position, (_, text)) in sections.iter().enumerate() {
        if position > 0 {
            article.push_str(SECTION_SEPARATOR);
        }
        // Writing to a String cannot fail
        let _ = write!(article, "## {}\n\n{}", section_header(position), text.trim());
    }

    article.push_str(SECTION_SEPARATOR);
    article.push_str(&metadata_footer(sections, generated_on));
    article
}

fn metadata_footer(sections: &[(ProviderId, String)], generated_on: NaiveDate) -> String {
    let contributors = sections
        .iter()
        .map(|(provider, _)| provider.display_name())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "*Generated by {} using: {}*\n*Generation date: {}*",
        SYSTEM_NAME,
        contributors,
        generated_on.format("%Y-%m-%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_three_sections_in_priority_order() {
        let sections = vec![
            (ProviderId::OpenAi, "GPT body".to_string()),
            (ProviderId::Anthropic, "Claude body\n".to_string()),
            (ProviderId::Gemini, "Gemini body".to_string()),
        ];

        let article = merge_sections(&sections, date());

        assert_eq!(
            article,
            "## Main Analysis\n\nGPT body\n\n---\n\n\
             ## Alternative Perspective\n\nClaude body\n\n---\n\n\
             ## Additional Insights\n\nGemini body\n\n---\n\n\
             *Generated by AIRTH using: OpenAI GPT-4, Anthropic Claude, Google Gemini*\n\
             *Generation date: 2026-10-19*"
        );
        assert_eq!(article.matches("## ").count(), 3);
        assert_eq!(article.matches("*Generated by").count(), 1);
    }

    #[test]
    fn test_headers_follow_position_not_provider() {
        let sections = vec![(ProviderId::Gemini, "Only Gemini answered".to_string())];

        let article = merge_sections(&sections, date());

        assert!(article.starts_with("## Main Analysis\n\nOnly Gemini answered"));
        assert!(article.contains("using: Google Gemini*"));
    }

    #[test]
    fn test_headers_beyond_the_named_three() {
        assert_eq!(section_header(0), "Main Analysis");
        assert_eq!(section_header(2), "Additional Insights");
        assert_eq!(section_header(3), "Further Perspective 4");
    }
}
