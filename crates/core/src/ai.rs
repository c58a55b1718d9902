//! Stub AI helpers.
//!
//! Each function waits a little to mimic a model round trip and then returns
//! a result computed locally from the input. Responses produced here are
//! flagged as stubs by the HTTP layer.

use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;
use tokio::time::sleep;

use crate::error::CoreError;

/// Characters stripped from Markdown before summarizing.
const MARKDOWN_SYMBOLS: &[char] = &['#', '*', '`'];

const SUMMARY_CHARS: usize = 200;
const TITLE_CHARS: usize = 50;
const FALLBACK_TITLE: &str = "Generated Title";

const SUMMARIZE_DELAY: Duration = Duration::from_millis(500);
const TITLE_DELAY: Duration = Duration::from_millis(300);
const IMPROVE_DELAY: Duration = Duration::from_millis(700);
const OUTLINE_DELAY: Duration = Duration::from_millis(600);
const RELATED_DELAY: Duration = Duration::from_millis(400);
const GRAMMAR_DELAY: Duration = Duration::from_millis(500);

/// Operations accepted by `POST /api/ai/summarize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AiAction {
    #[serde(rename = "summarize")]
    Summarize,
    #[serde(rename = "generateTitle")]
    GenerateTitle,
}

impl AiAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AiAction::Summarize => "summarize",
            AiAction::GenerateTitle => "generateTitle",
        }
    }

    /// Run the stub behind this action.
    pub async fn run(self, content: &str) -> String {
        match self {
            AiAction::Summarize => summarize_page(content).await,
            AiAction::GenerateTitle => generate_title(content).await,
        }
    }
}

impl FromStr for AiAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "summarize" => Ok(AiAction::Summarize),
            "generateTitle" => Ok(AiAction::GenerateTitle),
            _ => Err(CoreError::Validation(
                "Invalid action. Use \"summarize\" or \"generateTitle\"".into(),
            )),
        }
    }
}

/// Result of the grammar stub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrammarReport {
    pub issues: u32,
    pub suggestions: Vec<String>,
}

fn strip_markdown(text: &str) -> String {
    text.chars().filter(|c| !MARKDOWN_SYMBOLS.contains(c)).collect()
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Summary text without the simulated delay.
pub fn summary_of(content: &str) -> String {
    let stripped = strip_markdown(content);
    format!("{}...", truncate_chars(&stripped, SUMMARY_CHARS).trim())
}

/// Title text without the simulated delay.
pub fn title_of(content: &str) -> String {
    let first_line = content.split('\n').next().unwrap_or_default();
    if first_line.is_empty() {
        return FALLBACK_TITLE.to_string();
    }
    let stripped = strip_markdown(first_line);
    truncate_chars(&stripped, TITLE_CHARS).trim().to_string()
}

/// First 200 characters of the content, Markdown symbols removed, plus `...`.
pub async fn summarize_page(content: &str) -> String {
    tracing::debug!(len = content.len(), "AI stub: summarizing page");
    sleep(SUMMARIZE_DELAY).await;
    summary_of(content)
}

/// First line of the content, Markdown symbols removed, at most 50 characters.
pub async fn generate_title(content: &str) -> String {
    tracing::debug!(len = content.len(), "AI stub: generating title");
    sleep(TITLE_DELAY).await;
    title_of(content)
}

/// Returns the content unchanged.
pub async fn improve_writing(content: &str) -> String {
    tracing::debug!(len = content.len(), "AI stub: improving writing");
    sleep(IMPROVE_DELAY).await;
    content.to_string()
}

/// Fixed Markdown outline template for `topic`.
pub async fn generate_outline(topic: &str) -> String {
    tracing::debug!(topic, "AI stub: generating outline");
    sleep(OUTLINE_DELAY).await;
    format!(
        "# {topic}\n\n\
         ## Introduction\nBrief overview of {topic}\n\n\
         ## Key Concepts\n- Concept 1\n- Concept 2\n- Concept 3\n\n\
         ## Details\nDetailed explanation goes here\n\n\
         ## Examples\nPractical examples\n\n\
         ## Conclusion\nSummary of key points"
    )
}

pub async fn suggest_related_topics(_content: &str) -> Vec<String> {
    tracing::debug!("AI stub: suggesting related topics");
    sleep(RELATED_DELAY).await;
    (1..=3).map(|n| format!("Related Topic {n}")).collect()
}

/// Always reports a clean document.
pub async fn check_grammar(_content: &str) -> GrammarReport {
    tracing::debug!("AI stub: checking grammar");
    sleep(GRAMMAR_DELAY).await;
    GrammarReport {
        issues: 0,
        suggestions: Vec::new(),
    }
}
