//! Conversational assistant grounded in one report.
//!
//! The assistant is stateless per call: every question carries the report
//! context and the recent history. Transcripts are never persisted.

use log::warn;
use pharmaguard_core::Report;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::consts::{ASSISTANT_EMPTY_REPLY, ASSISTANT_ERROR_REPLY, MAX_HISTORY_TURNS};
use super::errors::ServiceError;
use super::utils::{
    get_default_assistant_api, get_default_assistant_key, get_default_assistant_model,
};

const DEFAULT_MAX_TOKENS: u32 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        ChatMessage {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

///
/// The system prompt for questions about `report`.
///
pub fn assistant_context(report: &Report) -> String {
    format!(
        "You are a pharmacogenomics assistant helping a patient understand their results.\n\
         Drug: {}\n\
         Primary gene: {}\n\
         Phenotype: {}\n\
         Risk: {}\n\
         Recommendation: {}\n\
         Summary: {}\n\
         Answer in plain English, in 2-3 short sentences, without medical jargon.",
        report.drug.to_uppercase(),
        report.pharmacogenomic_profile.primary_gene,
        report.pharmacogenomic_profile.phenotype,
        report.risk_label(),
        report.clinical_recommendation.recommendation,
        report.llm_generated_explanation.summary,
    )
}

///
/// Answers one question given the context and prior turns.
///
/// `Ok(None)` means the service answered without any text.
///
pub trait AssistantService {
    fn reply(
        &self,
        context: &str,
        history: &[ChatMessage],
    ) -> Result<Option<String>, ServiceError>;
}

/// [`AssistantService`] over an HTTP messages endpoint.
#[derive(Clone, Debug)]
pub struct HttpAssistant {
    endpoint: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
    client: Client,
}

impl HttpAssistant {
    pub fn new(endpoint: &str) -> Self {
        HttpAssistant {
            endpoint: endpoint.to_string(),
            api_key: None,
            model: get_default_assistant_model(),
            max_tokens: DEFAULT_MAX_TOKENS,
            client: Client::new(),
        }
    }

    /// Configure from `PHARMAGUARD_ASSISTANT_*` environment variables.
    pub fn from_env() -> Result<Self, ServiceError> {
        let endpoint = get_default_assistant_api().ok_or_else(|| {
            ServiceError::NotConfigured("PHARMAGUARD_ASSISTANT_API is not set".to_string())
        })?;
        let mut assistant = HttpAssistant::new(&endpoint);
        assistant.api_key = get_default_assistant_key();
        Ok(assistant)
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn payload(&self, context: &str, history: &[ChatMessage]) -> Value {
        json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "system": context,
            "messages": history,
        })
    }
}

/// Text of the first content block, if any.
fn first_text(body: &Value) -> Option<String> {
    body.get("content")?
        .get(0)?
        .get("text")?
        .as_str()
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

impl AssistantService for HttpAssistant {
    fn reply(
        &self,
        context: &str,
        history: &[ChatMessage],
    ) -> Result<Option<String>, ServiceError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&self.payload(context, history));
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
                details: response.text().unwrap_or_default(),
            });
        }

        let body: Value = response.json()?;
        Ok(first_text(&body))
    }
}

///
/// A running chat about one report.
///
#[derive(Clone, Debug)]
pub struct Conversation {
    context: String,
    welcome: Option<ChatMessage>,
    turns: Vec<ChatMessage>,
}

impl Conversation {
    /// Start a chat with a greeting that is shown but never sent.
    pub fn open(report: &Report) -> Self {
        let welcome = format!(
            "Hi! I can answer questions about your {} results. What would you like to know?",
            report.drug.to_uppercase()
        );
        Conversation {
            context: assistant_context(report),
            welcome: Some(ChatMessage::assistant(welcome)),
            turns: Vec::new(),
        }
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    /// Everything to display, greeting included.
    pub fn transcript(&self) -> Vec<&ChatMessage> {
        self.welcome.iter().chain(self.turns.iter()).collect()
    }

    /// The most recent turns, as sent with the next question. The window
    /// never opens on an assistant turn.
    pub fn history(&self) -> &[ChatMessage] {
        let window = self.turns.len().saturating_sub(MAX_HISTORY_TURNS);
        let start = self.turns[window..]
            .iter()
            .position(|turn| turn.role == ChatRole::User)
            .map_or(self.turns.len(), |offset| window + offset);
        &self.turns[start..]
    }

    ///
    /// Ask a question and record the answer. Failures become a fixed
    /// apology so the chat can carry on.
    ///
    /// # Arguments
    /// - message: the user's question; blank messages are ignored
    /// - service: the assistant to ask
    ///
    /// # Returns
    /// - the recorded reply, or `None` for a blank message
    pub fn send(&mut self, message: &str, service: &dyn AssistantService) -> Option<&str> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }
        self.turns.push(ChatMessage::user(message));

        let reply = match service.reply(&self.context, self.history()) {
            Ok(Some(text)) => text,
            Ok(None) => ASSISTANT_EMPTY_REPLY.to_string(),
            Err(e) => {
                warn!("Assistant request failed: {}", e);
                ASSISTANT_ERROR_REPLY.to_string()
            }
        };
        self.turns.push(ChatMessage::assistant(reply));
        self.turns.last().map(|turn| turn.content.as_str())
    }
}
