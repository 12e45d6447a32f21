// Best-effort field heuristics over extracted résumé text.
// Every rule runs independently on the same input and never fails. A rule
// with no match leaves its field empty or at a sentinel value.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_CANDIDATE: &str = "Unknown candidate";

/// Upper bound, in characters, of `CandidateProfile::raw_text_snippet`.
pub const SNIPPET_CHARS: usize = 1000;

const LOG_PREVIEW_CHARS: usize = 500;

/// Skills looked up in the text, reported in this order.
pub const SKILL_VOCABULARY: &[&str] = &[
    "React", "Node", "Python", "Java", "SQL", "Docker", "AWS", "Figma", "UI/UX", "Excel", "Ventas",
];

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("email pattern compiles")
});

// Deliberately loose: dates and reference numbers can match too.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\+?[0-9]{1,4}[\s-]?)?(\(?[0-9]{2,4}\)?[\s-]?)?[0-9]{3,4}[\s-]?[0-9]{3,4}")
        .expect("phone pattern compiles")
});

/// Draft candidate fields guessed from one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub skills: Vec<String>,
    pub raw_text_snippet: String,
}

pub fn extract_profile(text: &str) -> CandidateProfile {
    let clean = collapse_whitespace(text);
    tracing::debug!(
        preview = %prefix_chars(&clean, LOG_PREVIEW_CHARS),
        "Extracted document text"
    );

    CandidateProfile {
        full_name: guess_name(text),
        email: first_match(&EMAIL_RE, text),
        phone: first_match(&PHONE_RE, text),
        skills: find_skills(text),
        raw_text_snippet: prefix_chars(&clean, SNIPPET_CHARS).to_string(),
    }
}

fn first_match(re: &Regex, text: &str) -> String {
    re.find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// First trimmed line longer than two characters with no `@` and no digit.
fn guess_name(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|line| {
            line.chars().count() > 2
                && !line.contains('@')
                && !line.chars().any(|c| c.is_ascii_digit())
        })
        .unwrap_or(UNKNOWN_CANDIDATE)
        .to_string()
}

fn find_skills(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    SKILL_VOCABULARY
        .iter()
        .filter(|skill| haystack.contains(&skill.to_lowercase()))
        .map(|skill| skill.to_string())
        .collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn prefix_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
