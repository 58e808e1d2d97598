//! Typed inference requests and prompt construction
//!
//! The request body is a closed tagged enum over the known request kinds, so
//! an unknown `type` is rejected at deserialization instead of inside
//! business logic.

use crate::message::{ContentPart, Message};
use serde::Deserialize;

/// System preamble for JSON-only responses
const SYSTEM_PROMPT: &str = "You are a helpful assistant. Always respond with valid JSON only. \
     No markdown, no code fences, no explanation. Just the raw JSON.";

/// A typed inference request, dispatched on the `type` field
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InferenceRequest {
    /// Discover new candidate awards matching a free-text query
    Discover {
        /// Free-text search query
        query: String,
        /// Comma-separated names of awards already tracked
        #[serde(default)]
        existing: String,
    },
    /// Analyze submission requirements for a named award
    Analyze {
        /// Award name
        #[serde(rename = "awardName")]
        award_name: String,
        /// Award home page, when known
        #[serde(rename = "awardUrl", default)]
        award_url: Option<String>,
    },
    /// Summarize a manuscript and match it against awards
    Manuscript {
        /// Text extracted client-side (DOCX path)
        #[serde(rename = "manuscriptText", default)]
        manuscript_text: Option<String>,
        /// Base64-encoded document payload (PDF path)
        #[serde(rename = "manuscriptBase64", default)]
        manuscript_base64: Option<String>,
        /// Original file name, for the prompt only
        #[serde(rename = "fileName", default)]
        file_name: Option<String>,
    },
}

impl InferenceRequest {
    /// Request kind for logging
    pub fn kind(&self) -> &'static str {
        match self {
            InferenceRequest::Discover { .. } => "discover",
            InferenceRequest::Analyze { .. } => "analyze",
            InferenceRequest::Manuscript { .. } => "manuscript",
        }
    }

    /// Build the message sequence for this request.
    ///
    /// The system preamble is omitted for multi-part manuscript messages:
    /// some upstream proxies reject a system role when multimodal content is
    /// present.
    pub fn into_messages(self) -> Vec<Message> {
        match self {
            InferenceRequest::Discover { query, existing } => {
                let existing = if existing.is_empty() {
                    "none".to_string()
                } else {
                    existing
                };
                let prompt = format!(
                    "Find literary awards matching: \"{query}\"\n\n\
                     Context: indie publisher (Infinite Books), \"White Mirror Stories\" — \
                     SF/F short story collection.\n\
                     Already tracking: {existing}\n\n\
                     Return 3–5 NEW awards not already in the list above.\n\
                     JSON array only:\n\
                     [{{\"name\":\"...\",\"url\":\"...\",\"notes\":\"2-3 sentences on eligibility\",\"deadline\":\"...\"}}]"
                );
                vec![Message::system(SYSTEM_PROMPT), Message::user(prompt)]
            }
            InferenceRequest::Analyze {
                award_name,
                award_url,
            } => {
                let url_part = award_url
                    .filter(|u| !u.is_empty())
                    .map(|u| format!(" ({u})"))
                    .unwrap_or_default();
                let prompt = format!(
                    "List submission requirements for the literary award \"{award_name}\"{url_part}.\n\n\
                     Publisher context: indie (Infinite Books), submitting \"White Mirror Stories\" \
                     (SF/F short stories).\n\
                     Include: entry fees, physical copy requirements + mailing address, digital format, \
                     supporting docs, eligibility rules, deadlines.\n\n\
                     JSON array, max 8 items:\n\
                     [{{\"id\":\"1\",\"text\":\"Specific actionable requirement\",\"done\":false}}]"
                );
                vec![Message::system(SYSTEM_PROMPT), Message::user(prompt)]
            }
            InferenceRequest::Manuscript {
                manuscript_text,
                manuscript_base64,
                file_name,
            } => {
                let instructions = manuscript_prompt(file_name.as_deref().unwrap_or("manuscript"));

                if let Some(base64) = manuscript_base64.filter(|b| !b.is_empty()) {
                    // PDF path: document rides as a base64 data URL part
                    vec![Message::user_parts(vec![
                        ContentPart::pdf_base64(&base64),
                        ContentPart::text(instructions),
                    ])]
                } else {
                    // DOCX path: text was extracted client-side
                    let text = manuscript_text.unwrap_or_default();
                    let prompt =
                        format!("MANUSCRIPT TEXT:\n\n{text}\n\n---\n\n{instructions}");
                    vec![Message::system(SYSTEM_PROMPT), Message::user(prompt)]
                }
            }
        }
    }
}

fn manuscript_prompt(file_name: &str) -> String {
    format!(
        "Analyse this manuscript (\"{file_name}\") for an indie publisher seeking literary awards.\n\
         Then suggest 4–6 real awards that best match its genre, themes, length, and publisher type.\n\n\
         Return ONLY valid JSON (no markdown fences):\n\
         {{\"title\":\"...\",\"genres\":[\"...\"],\"themes\":[\"...\"],\"style\":\"...\",\"audience\":\"...\",\
         \"wordCount\":\"...\",\"matchedAwards\":[{{\"name\":\"...\",\"url\":\"...\",\"notes\":\"...\",\
         \"deadline\":\"...\",\"matchReason\":\"...\"}}]}}"
    )
}
