//! Voice Command Parsing
//!
//! Maps a spoken transcript (already turned into text by the embedding
//! app) to a board intent. Matching is case-insensitive and tolerant of
//! filler words; anything unrecognized maps to `None` so the caller can
//! ignore it.
//!
//! When a card title itself contains a separator word ("in", "to"),
//! the last occurrence wins: "move check in desk in Done" names the
//! list "Done".

use regex::Regex;

use crate::domain::{DomainError, DomainResult};

/// A recognized board intent
#[derive(Debug, Clone, PartialEq)]
pub enum VoiceCommand {
    /// Create a card, optionally naming the destination list
    CreateCard {
        title: String,
        list_name: Option<String>,
    },
    /// Filter visible cards by a text query
    FilterCards { query: String },
    /// Drop the active filter
    ClearFilter,
}

/// Transcript-to-intent parser with precompiled patterns
pub struct VoiceParser {
    create_in_list: Regex,
    create_bare: Regex,
    filter: Regex,
    clear: Regex,
    show_all: Regex,
}

impl VoiceParser {
    pub fn new() -> DomainResult<Self> {
        Ok(Self {
            create_in_list: compile(
                r#"(?i)^(?:please\s+)?(?:create|add|make)\s+(?:a\s+|another\s+|new\s+)*card\s+(?:called\s+|named\s+|titled\s+|saying\s+)?['"]?(?P<title>.+)['"]?\s+(?:in|into|to|on)\s+(?:the\s+)?(?P<list>.+?)(?:\s+list)?\s*[.!]?$"#,
            )?,
            create_bare: compile(
                r#"(?i)^(?:please\s+)?(?:create|add|make)\s+(?:a\s+|another\s+|new\s+)*card\s+(?:called\s+|named\s+|titled\s+|saying\s+)?['"]?(?P<title>.+?)['"]?\s*[.!]?$"#,
            )?,
            filter: compile(
                r#"(?i)^(?:please\s+)?(?:show|find|filter|search)\s+(?:me\s+)?(?:all\s+)?(?:the\s+)?cards?\s+(?:containing|matching|mentioning|with|about|for)\s+['"]?(?P<query>.+?)['"]?\s*[.!]?$"#,
            )?,
            clear: compile(
                r"(?i)^(?:please\s+)?(?:clear|reset|remove)\s+(?:the\s+)?(?:search\s+|card\s+)?filters?\s*[.!]?$",
            )?,
            show_all: compile(
                r"(?i)^(?:please\s+)?show\s+(?:me\s+)?(?:all|everything)(?:\s+(?:the\s+)?cards?)?\s*[.!]?$",
            )?,
        })
    }

    /// Parse one transcript. Returns `None` for anything that is not a
    /// recognized command.
    pub fn parse(&self, transcript: &str) -> Option<VoiceCommand> {
        let text = transcript.trim();
        if text.is_empty() {
            return None;
        }

        if let Some(caps) = self.create_in_list.captures(text) {
            return Some(VoiceCommand::CreateCard {
                title: clean(&caps["title"]),
                list_name: Some(clean(&caps["list"])),
            });
        }
        if let Some(caps) = self.create_bare.captures(text) {
            return Some(VoiceCommand::CreateCard {
                title: clean(&caps["title"]),
                list_name: None,
            });
        }
        if let Some(caps) = self.filter.captures(text) {
            return Some(VoiceCommand::FilterCards {
                query: clean(&caps["query"]),
            });
        }
        if self.clear.is_match(text) || self.show_all.is_match(text) {
            return Some(VoiceCommand::ClearFilter);
        }
        None
    }
}

fn compile(pattern: &str) -> DomainResult<Regex> {
    Regex::new(pattern)
        .map_err(|e| DomainError::Internal(format!("Voice pattern failed to compile: {}", e)))
}

/// Strip surrounding quotes and whitespace from a captured fragment
fn clean(fragment: &str) -> String {
    fragment
        .trim()
        .trim_matches(|c| c == '\'' || c == '"')
        .trim()
        .to_string()
}
