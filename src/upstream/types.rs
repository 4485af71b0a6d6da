//! Wire types for the OpenAI-compatible chat-completions contract

use serde::{Deserialize, Serialize};

/// Request payload sent to the upstream chat-completions endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f64,
}

impl CompletionRequest {
    /// Build a single-turn completion request carrying one user message
    pub fn user_turn(model: &str, content: &str, temperature: f64) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![Message {
                role: "user".to_string(),
                content: content.to_string(),
            }],
            temperature,
        }
    }
}

/// One conversation turn in the upstream payload
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    role: String,
    content: String,
}

/// Successful upstream response body
///
/// Only the fields the relay consumes are modeled; the provider sends more
/// (usage, ids, timestamps) and serde ignores them.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    choices: Vec<Choice>,
}

impl CompletionResponse {
    /// Extract the first completion choice's message content
    pub fn into_reply(self) -> Option<String> {
        self.choices.into_iter().next().map(|choice| choice.message.content)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ChoiceMessage {
    content: String,
}
